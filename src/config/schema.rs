//! Configuration schema definitions.
//!
//! This module defines the route-table file format. All types derive Serde
//! traits for deserialization from TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::{Handler, Params, Route, RouteBuilder, RouteCollection, Transport, UrlMatcher};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Matching engine settings.
    pub matcher: MatcherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in matching order.
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    /// Build the route collection in file order.
    pub fn route_collection(&self) -> RouteCollection {
        self.routes.iter().map(RouteConfig::to_route).collect()
    }

    /// Build a matcher with the standard rule chain.
    pub fn build_matcher(&self) -> UrlMatcher {
        UrlMatcher::with_standard_rules(self.route_collection(), &self.matcher.base_path)
    }
}

/// Matching engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MatcherConfig {
    /// Prefix prepended to every route path (e.g., "/app").
    pub base_path: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Unique route name.
    pub name: String,

    /// Path template, `{param}` placeholders allowed.
    pub path: String,

    /// Handler identifier. Defaults to the route name.
    #[serde(default)]
    pub handler: Option<String>,

    /// Host pattern to match.
    #[serde(default)]
    pub host: Option<String>,

    /// Accepted content types.
    #[serde(default)]
    pub accepts: Vec<String>,

    /// Allowed HTTP methods.
    #[serde(default)]
    pub allows: Vec<String>,

    #[serde(default)]
    pub attributes: Params,

    #[serde(default)]
    pub defaults: Params,

    #[serde(default)]
    pub auth: Params,

    /// Per-parameter regex patterns.
    #[serde(default)]
    pub requirements: BTreeMap<String, String>,

    /// Transport requirement: "any", "secure" or "insecure".
    #[serde(default)]
    pub secure: Transport,

    /// Name of the trailing catch-all capture.
    #[serde(default)]
    pub wildcard: Option<String>,

    /// False for routes used only for path generation.
    #[serde(default = "default_routable")]
    pub routable: bool,
}

fn default_routable() -> bool {
    true
}

impl RouteConfig {
    /// Convert to a route. The handler payload is the handler identifier.
    pub fn to_route(&self) -> Route {
        let handler = self.handler.clone().unwrap_or_else(|| self.name.clone());

        let mut builder = RouteBuilder::new()
            .handler(Handler::new(handler))
            .host(self.host.clone().unwrap_or_default())
            .accepts(self.accepts.iter().cloned())
            .allows(self.allows.iter().cloned())
            .auth(self.auth.clone())
            .secure(self.secure)
            .routable(self.routable);

        for (key, value) in &self.attributes {
            builder = builder.attribute(key.clone(), value.clone());
        }
        for (key, value) in &self.defaults {
            builder = builder.default_value(key.clone(), value.clone());
        }
        for (param, pattern) in &self.requirements {
            builder = builder.requirement(param.clone(), pattern.clone());
        }
        if let Some(wildcard) = &self.wildcard {
            builder = builder.wildcard(wildcard.clone());
        }

        builder.route(&self.name, &self.path)
    }
}
