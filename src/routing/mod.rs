//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, host, path, headers, server params)
//!     → matcher.rs (first routable route in insertion order)
//!     → rules (evaluate every constraint against a working copy)
//!     → Return: matched Route or RoutingError
//!
//! Route Table Construction (at startup / on reload):
//!     RouteConfig[] or RouteBuilder calls
//!     → route.rs (immutable Route records)
//!     → collection.rs (name-keyed, insertion-ordered)
//!     → snapshot.rs (publish as one immutable generation)
//! ```
//!
//! # Design Decisions
//! - Route tables are built up front and never mutated while matching
//! - No sorting or prioritisation: insertion order is the only order
//! - The first routable route decides the outcome

pub mod builder;
pub mod collection;
pub mod matcher;
pub mod route;
pub mod snapshot;

pub use builder::RouteBuilder;
pub use collection::RouteCollection;
pub use matcher::{Matcher, UrlMatcher};
pub use route::{Handler, Params, Route, Transport};
pub use snapshot::SharedMatcher;
