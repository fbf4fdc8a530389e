//! Host rule.
//!
//! Dots in the route host are literal; the pattern is anchored at both ends.

use regex::Regex;

use crate::http::ServerRequest;
use crate::routing::Route;
use crate::rules::Rule;

/// Matches the request URI host against the route's host pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct Host;

impl Host {
    pub const NAME: &'static str = "Host";

    /// Build the anchored regex source for a route host.
    pub fn pattern(host: &str) -> String {
        format!("^{}$", host.replace('.', "\\."))
    }
}

impl Rule for Host {
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool {
        if route.host().is_empty() {
            return true;
        }

        let pattern = Self::pattern(route.host());
        match Regex::new(&pattern) {
            Ok(regex) => regex.is_match(request.host()),
            Err(e) => {
                tracing::warn!(route = %route.name(), pattern = %pattern, error = %e, "Invalid host pattern");
                false
            }
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
