//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing engine and config reloads produce:
//!     → tracing events (debug per decision, trace per rule, warn on bad patterns)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber, level from RUST_LOG or config)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - Structured fields (route, rule, path) instead of formatted strings

pub mod logging;

pub use logging::init_logging;
