//! Ordered, name-keyed route storage.
//!
//! # Design Decisions
//! - Iteration follows insertion order
//! - Re-adding a name replaces the route but keeps its original slot
//! - Lookups by name fail with `RouteNotFound` rather than returning `None`

use indexmap::IndexMap;

use crate::error::{RoutingError, RoutingResult};
use crate::routing::route::Route;

/// Insertion-ordered collection of routes keyed by name.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: IndexMap<String, Route>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any route with the same name in place.
    pub fn add(&mut self, route: Route) {
        let name = route.name().to_string();
        if let Some(previous) = self.routes.insert(name, route) {
            tracing::debug!(route = %previous.name(), "Replaced existing route");
        }
    }

    /// Merge another collection in its own order, with the same replace policy.
    pub fn add_collection(&mut self, other: RouteCollection) {
        for (_, route) in other.routes {
            self.add(route);
        }
    }

    pub fn count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> RoutingResult<&Route> {
        self.routes
            .get(name)
            .ok_or_else(|| RoutingError::RouteNotFound { name: name.to_string() })
    }

    /// Iterate `(name, route)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.routes.iter(),
        }
    }
}

/// Borrowing iterator over a [`RouteCollection`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, Route>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Route);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, route)| (name.as_str(), route))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = (&'a str, &'a Route);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Route> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut collection = RouteCollection::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<Route> for RouteCollection {
    fn extend<I: IntoIterator<Item = Route>>(&mut self, iter: I) {
        for route in iter {
            self.add(route);
        }
    }
}
