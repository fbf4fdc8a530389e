//! Matching rules.
//!
//! # Data Flow
//! ```text
//! Matcher picks a candidate route
//!     → collection.rs (ordered rules, lazy factories resolved on first use)
//!     → each rule checks one constraint:
//!         - path.rs    (URI path against the route template)
//!         - host.rs    (URI host against the route host pattern)
//!         - allows.rs  (HTTP method)
//!         - accepts.rs (Accept header negotiation)
//!         - secure.rs  (transport security)
//!     → first `false` rejects the candidate
//! ```
//!
//! # Design Decisions
//! - Open trait so applications can add their own rules
//! - Rules never touch the request; only the path rule writes captures
//!   into the matcher's working copy of the route
//! - Patterns are compiled per evaluation, nothing is cached

use std::fmt;

use crate::http::ServerRequest;
use crate::routing::Route;

pub mod accepts;
pub mod allows;
pub mod collection;
pub mod host;
pub mod path;
pub mod secure;

pub use accepts::Accepts;
pub use allows::Allows;
pub use collection::RuleCollection;
pub use host::Host;
pub use path::Path;
pub use secure::Secure;

/// A predicate deciding whether a route's constraint holds for a request.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Returns true if the route satisfies this rule for the request.
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool;

    /// Identity reported when this rule rejects a route.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MatchRequest;

    #[derive(Debug)]
    struct AlwaysFalse;

    impl Rule for AlwaysFalse {
        fn matches(&self, _request: &dyn ServerRequest, _route: &mut Route) -> bool {
            false
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        let rule: Box<dyn Rule> = Box::new(AlwaysFalse);
        assert!(rule.name().ends_with("AlwaysFalse"));
        assert!(!rule.matches(&MatchRequest::new("/"), &mut Route::new("r", "/")));
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(Path::default().name(), "Path");
        assert_eq!(Host.name(), "Host");
        assert_eq!(Allows.name(), "Allows");
        assert_eq!(Accepts.name(), "Accepts");
        assert_eq!(Secure.name(), "Secure");
    }
}
