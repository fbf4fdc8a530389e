//! Request-to-route matching engine.
//!
//! Routes are kept in an insertion-ordered collection; a chain of rules
//! (path, host, method, content negotiation, transport security) decides
//! whether the first routable route handles a request.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod routing;
pub mod rules;

pub use config::RouterConfig;
pub use error::{RoutingError, RoutingResult};
pub use http::{MatchRequest, ServerParams, ServerRequest};
pub use routing::{Matcher, Route, RouteBuilder, RouteCollection, SharedMatcher, UrlMatcher};
pub use rules::{Rule, RuleCollection};
