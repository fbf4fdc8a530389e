//! Shared fixtures for integration tests.

use route_matcher::config::{parse_config, RouterConfig};
use route_matcher::UrlMatcher;

/// A small route table exercising every rule.
pub const ROUTES: &str = r#"
[[routes]]
name = "blog.generate"
path = "/blog/{id}/edit"
routable = false

[[routes]]
name = "api.users.read"
path = "/users/{id}"
host = "api.example.com"
allows = ["GET", "HEAD"]
accepts = ["application/json"]
secure = "secure"
requirements = { id = '\d+' }

[[routes]]
name = "files"
path = "/files"
wildcard = "rest"
"#;

/// Parse a route table, panicking on invalid fixtures.
#[allow(dead_code)]
pub fn config(source: &str) -> RouterConfig {
    parse_config(source).expect("fixture route table must be valid")
}

/// Matcher over the given route table with the standard rules.
pub fn matcher(source: &str) -> UrlMatcher {
    config(source).build_matcher()
}
