//! Atomically replaceable matcher snapshot.
//!
//! Route tables are rebuilt off to the side and published as a whole;
//! in-flight matches keep the snapshot they started with.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::RoutingResult;
use crate::http::ServerRequest;
use crate::routing::matcher::{Matcher, UrlMatcher};
use crate::routing::Route;

/// Holds the current matcher generation.
#[derive(Debug)]
pub struct SharedMatcher {
    current: ArcSwap<UrlMatcher>,
    generation: AtomicU64,
}

impl SharedMatcher {
    pub fn new(matcher: UrlMatcher) -> Self {
        Self {
            current: ArcSwap::from_pointee(matcher),
            generation: AtomicU64::new(0),
        }
    }

    /// The snapshot in effect right now.
    pub fn load(&self) -> Arc<UrlMatcher> {
        self.current.load_full()
    }

    /// Replace the snapshot. Returns the new generation number.
    pub fn publish(&self, matcher: UrlMatcher) -> u64 {
        let routes = matcher.routes().count();
        self.current.store(Arc::new(matcher));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::info!(generation, routes, "Published route table");
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

impl Matcher for SharedMatcher {
    fn match_request(&self, request: &dyn ServerRequest) -> RoutingResult<Route> {
        self.current.load().match_request(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MatchRequest;
    use crate::routing::RouteCollection;

    fn table(name: &str) -> UrlMatcher {
        let mut routes = RouteCollection::new();
        routes.add(Route::new(name, "/"));
        UrlMatcher::with_standard_rules(routes, "")
    }

    #[test]
    fn test_publish_swaps_table() {
        let shared = SharedMatcher::new(table("v1"));
        let held = shared.load();

        assert_eq!(shared.publish(table("v2")), 1);
        assert_eq!(shared.generation(), 1);

        let matched = shared.match_request(&MatchRequest::new("/")).unwrap();
        assert_eq!(matched.name(), "v2");

        // Earlier snapshot stays usable
        assert_eq!(held.match_request(&MatchRequest::new("/")).unwrap().name(), "v1");
    }
}
