//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route collection in insertion order
//! - Skip routes that only exist for reverse path generation
//! - Evaluate the rule chain against a working copy of the first routable route
//!
//! # Design Decisions
//! - Only the first routable route is examined; a rule rejection ends the
//!   match with `RuleNotAllowed` instead of falling through to later routes
//! - Rules run against a clone, so the stored route is never mutated
//! - `&self` only: safe to share across threads while the tables are not
//!   being modified

use std::fmt;

use crate::error::{RoutingError, RoutingResult};
use crate::http::ServerRequest;
use crate::routing::{Route, RouteCollection};
use crate::rules::RuleCollection;

/// Resolves a request to a single route.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the matched route, with any captures attached to its attributes.
    fn match_request(&self, request: &dyn ServerRequest) -> RoutingResult<Route>;
}

/// Matches requests against a route collection using a rule chain.
#[derive(Debug)]
pub struct UrlMatcher {
    routes: RouteCollection,
    rules: RuleCollection,
}

impl UrlMatcher {
    pub fn new(routes: RouteCollection, rules: RuleCollection) -> Self {
        Self { routes, rules }
    }

    /// Matcher using the standard rule chain with the given base path.
    pub fn with_standard_rules(routes: RouteCollection, base_path: &str) -> Self {
        Self::new(routes, RuleCollection::standard(base_path))
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    pub fn rules(&self) -> &RuleCollection {
        &self.rules
    }

    fn apply_rules(&self, request: &dyn ServerRequest, route: &mut Route) -> RoutingResult<()> {
        for entry in self.rules.iter() {
            let (key, rule) = entry?;
            if !rule.matches(request, route) {
                tracing::debug!(
                    path = %request.path(),
                    route = %route.name(),
                    rule = rule.name(),
                    "Rule rejected route"
                );
                return Err(RoutingError::RuleNotAllowed {
                    path: request.path().to_string(),
                    rule: rule.name().to_string(),
                    route: route.name().to_string(),
                });
            }
            tracing::trace!(route = %route.name(), rule = rule.name(), key, "Rule passed");
        }
        Ok(())
    }
}

impl Matcher for UrlMatcher {
    fn match_request(&self, request: &dyn ServerRequest) -> RoutingResult<Route> {
        for (name, prototype) in self.routes.iter() {
            if !prototype.is_routable() {
                tracing::trace!(route = %name, "Skipping non-routable route");
                continue;
            }

            let mut route = prototype.clone();
            self.apply_rules(request, &mut route)?;

            tracing::debug!(path = %request.path(), route = %name, "Matched route");
            return Ok(route);
        }

        tracing::debug!(path = %request.path(), "No routable route");
        Err(RoutingError::ResourceNotFound {
            path: request.path().to_string(),
        })
    }
}
