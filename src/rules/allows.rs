//! Method rule.

use crate::http::ServerRequest;
use crate::routing::Route;
use crate::rules::Rule;

/// Method assumed when the request does not report one.
const DEFAULT_METHOD: &str = "GET";

/// Checks the request method against the route's allowed methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allows;

impl Allows {
    pub const NAME: &'static str = "Allows";
}

impl Rule for Allows {
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool {
        if route.allows().is_empty() {
            return true;
        }

        let method = match request.method() {
            "" => DEFAULT_METHOD,
            m => m,
        };
        // Case-sensitive, like HTTP method tokens
        route.allows().iter().any(|allowed| allowed == method)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MatchRequest;
    use crate::routing::RouteBuilder;

    #[test]
    fn test_unconstrained() {
        let mut route = Route::new("r", "/");
        assert!(Allows.matches(&MatchRequest::new("/").with_method("DELETE"), &mut route));
    }

    #[test]
    fn test_post_only() {
        let mut route = RouteBuilder::new().post("create", "/items");

        assert!(!Allows.matches(&MatchRequest::new("/items"), &mut route));
        assert!(Allows.matches(&MatchRequest::new("/items").with_method("POST"), &mut route));
        assert!(!Allows.matches(&MatchRequest::new("/items").with_method("post"), &mut route));
    }

    #[test]
    fn test_empty_method_defaults_to_get() {
        let mut route = RouteBuilder::new().get("list", "/items");
        assert!(Allows.matches(&MatchRequest::new("/items"), &mut route));
        assert!(!Allows.matches(&MatchRequest::new("/items").with_method("HEAD"), &mut route));
    }
}
