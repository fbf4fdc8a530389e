//! HTTP request abstraction.
//!
//! # Data Flow
//! ```text
//! axum::http::Request<B> or MatchRequest
//!     → request.rs (ServerRequest view: method, path, host, headers,
//!       server params)
//!     → routing engine
//! ```

pub mod request;

pub use request::{MatchRequest, ServerParams, ServerRequest};
