//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route names are present and unique
//! - Check patterns compile (requirements, hosts, wildcard names)
//! - Check methods and content types are well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::str::FromStr;

use axum::http::Method;
use regex::Regex;
use thiserror::Error;

use crate::config::schema::{RouteConfig, RouterConfig};
use crate::rules::path::is_param_name;
use crate::rules::Host;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name '{name}' is defined more than once")]
    DuplicateRouteName { name: String },

    #[error("route '{route}': path '{path}' must start with '/'")]
    InvalidPath { route: String, path: String },

    #[error("route '{route}': requirement for '{param}' is not a valid pattern: {reason}")]
    InvalidRequirement {
        route: String,
        param: String,
        reason: String,
    },

    #[error("route '{route}': host '{host}' is not a valid pattern: {reason}")]
    InvalidHost {
        route: String,
        host: String,
        reason: String,
    },

    #[error("route '{route}': '{method}' is not a valid HTTP method")]
    InvalidMethod { route: String, method: String },

    #[error("route '{route}': '{content_type}' is not of the form type/subtype")]
    InvalidContentType { route: String, content_type: String },

    #[error("route '{route}': wildcard '{wildcard}' is not a valid capture name")]
    InvalidWildcard { route: String, wildcard: String },

    #[error("base path '{base_path}' must start with '/' and not end with '/'")]
    InvalidBasePath { base_path: String },

    #[error("unknown log level '{level}'")]
    InvalidLogLevel { level: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base_path = &config.matcher.base_path;
    if !base_path.is_empty() && (!base_path.starts_with('/') || base_path.ends_with('/')) {
        errors.push(ValidationError::InvalidBasePath {
            base_path: base_path.clone(),
        });
    }

    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel {
            level: config.observability.log_level.clone(),
        });
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !seen.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                name: route.name.clone(),
            });
        }
        validate_route(route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let name = || route.name.clone();

    if !route.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath {
            route: name(),
            path: route.path.clone(),
        });
    }

    for (param, pattern) in &route.requirements {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::InvalidRequirement {
                route: name(),
                param: param.clone(),
                reason: e.to_string(),
            });
        }
    }

    if let Some(host) = route.host.as_deref().filter(|h| !h.is_empty()) {
        if let Err(e) = Regex::new(&Host::pattern(host)) {
            errors.push(ValidationError::InvalidHost {
                route: name(),
                host: host.to_string(),
                reason: e.to_string(),
            });
        }
    }

    for method in &route.allows {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                route: name(),
                method: method.clone(),
            });
        }
    }

    for content_type in &route.accepts {
        let well_formed = content_type
            .split_once('/')
            .is_some_and(|(kind, sub_kind)| !kind.is_empty() && !sub_kind.is_empty());
        if !well_formed {
            errors.push(ValidationError::InvalidContentType {
                route: name(),
                content_type: content_type.clone(),
            });
        }
    }

    if let Some(wildcard) = &route.wildcard {
        if !is_param_name(wildcard) {
            errors.push(ValidationError::InvalidWildcard {
                route: name(),
                wildcard: wildcard.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> RouterConfig {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_valid_config() {
        let config = parse(
            r#"
            [[routes]]
            name = "home"
            path = "/"
            allows = ["GET"]
            accepts = ["text/html"]
            host = "example.com"
            wildcard = "rest"
            "#,
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = parse(
            r#"
            [matcher]
            base_path = "app/"

            [observability]
            log_level = "loud"

            [[routes]]
            name = "a"
            path = "no-slash"
            allows = ["GE T"]
            accepts = ["json"]
            requirements = { id = "(" }
            wildcard = "1rest"

            [[routes]]
            name = "a"
            path = "/a"

            [[routes]]
            name = ""
            path = "/b"
            host = "("
            "#,
        );

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::InvalidBasePath { base_path: "app/".into() }));
        assert!(errors.contains(&ValidationError::InvalidLogLevel { level: "loud".into() }));
        assert!(errors.contains(&ValidationError::InvalidPath {
            route: "a".into(),
            path: "no-slash".into()
        }));
        assert!(errors.contains(&ValidationError::InvalidMethod {
            route: "a".into(),
            method: "GE T".into()
        }));
        assert!(errors.contains(&ValidationError::InvalidContentType {
            route: "a".into(),
            content_type: "json".into()
        }));
        assert!(errors.contains(&ValidationError::InvalidWildcard {
            route: "a".into(),
            wildcard: "1rest".into()
        }));
        assert!(errors.contains(&ValidationError::DuplicateRouteName { name: "a".into() }));
        assert!(errors.contains(&ValidationError::EmptyRouteName { index: 2 }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidRequirement { param, .. } if param == "id")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidHost { host, .. } if host == "(")));
        assert_eq!(errors.len(), 10);
    }
}
