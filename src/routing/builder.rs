//! Fluent route construction.
//!
//! A `RouteBuilder` holds shared constraints (prefixes, host, content types,
//! security) and stamps out routes that inherit them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::routing::route::{Handler, Params, Route, Transport};

/// Builder producing routes with shared prefixes and constraints.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    name_prefix: String,
    path_prefix: String,
    handler: Option<Handler>,
    host: String,
    accepts: Vec<String>,
    allows: Vec<String>,
    attributes: Params,
    defaults: Params,
    auth: Params,
    requirements: BTreeMap<String, String>,
    secure: Transport,
    wildcard: Option<String>,
    routable: bool,
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteBuilder {
    pub fn new() -> Self {
        Self {
            name_prefix: String::new(),
            path_prefix: String::new(),
            handler: None,
            host: String::new(),
            accepts: Vec::new(),
            allows: Vec::new(),
            attributes: Params::new(),
            defaults: Params::new(),
            auth: Params::new(),
            requirements: BTreeMap::new(),
            secure: Transport::Any,
            wildcard: None,
            routable: true,
        }
    }

    /// Start from the constraints of an existing route. Name and path are
    /// supplied again when the new route is built.
    pub fn from_route(route: &Route) -> Self {
        Self {
            name_prefix: String::new(),
            path_prefix: String::new(),
            handler: route.handler.clone(),
            host: route.host.clone(),
            accepts: route.accepts.clone(),
            allows: route.allows.clone(),
            attributes: route.attributes.clone(),
            defaults: route.defaults.clone(),
            auth: route.auth.clone(),
            requirements: route.requirements.clone(),
            secure: route.secure,
            wildcard: route.wildcard.clone(),
            routable: route.routable,
        }
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Append accepted content types.
    pub fn accepts<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepts.extend(types.into_iter().map(Into::into));
        self
    }

    /// Append allowed methods.
    pub fn allows<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allows.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn default_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into(), value);
        self
    }

    /// Replace the auth payload.
    pub fn auth(mut self, auth: Params) -> Self {
        self.auth = auth;
        self
    }

    pub fn requirement(mut self, param: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.requirements.insert(param.into(), pattern.into());
        self
    }

    pub fn secure(mut self, secure: Transport) -> Self {
        self.secure = secure;
        self
    }

    pub fn wildcard(mut self, name: impl Into<String>) -> Self {
        self.wildcard = Some(name.into());
        self
    }

    pub fn routable(mut self, routable: bool) -> Self {
        self.routable = routable;
        self
    }

    /// Build a route inheriting every constraint of this builder.
    pub fn route(&self, name: &str, path: &str) -> Route {
        Route {
            name: format!("{}{}", self.name_prefix, name),
            path: format!("{}{}", self.path_prefix.trim_end_matches('/'), path),
            handler: self.handler.clone(),
            host: self.host.clone(),
            accepts: self.accepts.clone(),
            allows: self.allows.clone(),
            attributes: self.attributes.clone(),
            defaults: self.defaults.clone(),
            auth: self.auth.clone(),
            requirements: self.requirements.clone(),
            secure: self.secure,
            wildcard: self.wildcard.clone(),
            routable: self.routable,
        }
    }

    fn method_route(&self, method: &str, name: &str, path: &str) -> Route {
        let mut route = self.route(name, path);
        route.allows = vec![method.to_string()];
        route
    }

    pub fn get(&self, name: &str, path: &str) -> Route {
        self.method_route("GET", name, path)
    }

    pub fn post(&self, name: &str, path: &str) -> Route {
        self.method_route("POST", name, path)
    }

    pub fn put(&self, name: &str, path: &str) -> Route {
        self.method_route("PUT", name, path)
    }

    pub fn patch(&self, name: &str, path: &str) -> Route {
        self.method_route("PATCH", name, path)
    }

    pub fn delete(&self, name: &str, path: &str) -> Route {
        self.method_route("DELETE", name, path)
    }

    pub fn head(&self, name: &str, path: &str) -> Route {
        self.method_route("HEAD", name, path)
    }

    pub fn options(&self, name: &str, path: &str) -> Route {
        self.method_route("OPTIONS", name, path)
    }
}
