//! Error definitions for route matching.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced while matching requests or looking up routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No routable candidate existed in the collection.
    #[error("No routes found for \"{path}\".")]
    ResourceNotFound { path: String },

    /// The evaluated candidate was rejected by a rule.
    #[error("{path} FAILED {rule} ON {route}")]
    RuleNotAllowed {
        path: String,
        rule: String,
        route: String,
    },

    /// Named lookup in a route collection found nothing.
    #[error("No route found for \"{name}\".")]
    RouteNotFound { name: String },

    /// A lazily-constructed rule slot produced something that is not a rule.
    ///
    /// Untyped factories only recognise the built-in rules, `Arc<dyn Rule>`
    /// and `Box<dyn Rule>`. A custom rule type returned by value lands here
    /// too; register it with `RuleCollection::append_factory` or return it
    /// as `Arc<dyn Rule>`.
    #[error("Expected Rule, got {produced} for key {key}")]
    RuleNotFound { produced: String, key: usize },
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

impl RoutingError {
    /// Recommended HTTP status for this failure.
    ///
    /// Rejections by the content-negotiation rule map to 406, every other
    /// rule rejection to 405.
    pub fn status(&self) -> StatusCode {
        match self {
            RoutingError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            RoutingError::RuleNotAllowed { rule, .. } if rule == crate::rules::Accepts::NAME => {
                StatusCode::NOT_ACCEPTABLE
            }
            RoutingError::RuleNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RoutingError::RouteNotFound { .. } | RoutingError::RuleNotFound { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Configuration or programming errors that should never reach end users.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RoutingError::RuleNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = RoutingError::ResourceNotFound { path: "/x".into() };
        assert_eq!(err.to_string(), "No routes found for \"/x\".");

        let err = RoutingError::RuleNotAllowed {
            path: "/x".into(),
            rule: "Allows".into(),
            route: "home".into(),
        };
        assert_eq!(err.to_string(), "/x FAILED Allows ON home");

        let err = RoutingError::RuleNotFound { produced: "u32".into(), key: 2 };
        assert_eq!(err.to_string(), "Expected Rule, got u32 for key 2");
    }

    #[test]
    fn test_status_mapping() {
        let not_found = RoutingError::ResourceNotFound { path: "/".into() };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let not_acceptable = RoutingError::RuleNotAllowed {
            path: "/".into(),
            rule: "Accepts".into(),
            route: "r".into(),
        };
        assert_eq!(not_acceptable.status(), StatusCode::NOT_ACCEPTABLE);

        let not_allowed = RoutingError::RuleNotAllowed {
            path: "/".into(),
            rule: "Allows".into(),
            route: "r".into(),
        };
        assert_eq!(not_allowed.status(), StatusCode::METHOD_NOT_ALLOWED);

        let broken = RoutingError::RuleNotFound { produced: "()".into(), key: 0 };
        assert!(broken.is_fatal());
        assert!(!not_found.is_fatal());
    }
}
