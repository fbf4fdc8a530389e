//! Route definition.
//!
//! # Responsibilities
//! - Describe one addressable endpoint and its matching constraints
//! - Carry opaque caller payloads (handler, attributes, defaults, auth)
//!
//! # Design Decisions
//! - Immutable after construction; only a matcher's working copy has its
//!   attributes extended (path captures)
//! - Cloning deep-copies collections but shares the handler via `Arc`
//! - Serializable except for the handler, which is application-owned

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque key/value map carried on a route.
pub type Params = BTreeMap<String, Value>;

/// Application-supplied handler payload, never interpreted by the matcher.
#[derive(Clone)]
pub struct Handler(Arc<dyn Any + Send + Sync>);

impl Handler {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the payload as `T` if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// True if both handles point at the same payload.
    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.downcast_ref::<String>() {
            Some(id) => f.debug_tuple("Handler").field(id).finish(),
            None => f.write_str("Handler(..)"),
        }
    }
}

/// Transport security requirement of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Either transport is acceptable.
    #[default]
    Any,
    /// Only requests over a secure transport match.
    Secure,
    /// Only requests over a plain transport match.
    Insecure,
}

impl Transport {
    /// The required secure state, `None` when unconstrained.
    pub fn required(self) -> Option<bool> {
        match self {
            Transport::Any => None,
            Transport::Secure => Some(true),
            Transport::Insecure => Some(false),
        }
    }
}

impl From<Option<bool>> for Transport {
    fn from(secure: Option<bool>) -> Self {
        match secure {
            None => Transport::Any,
            Some(true) => Transport::Secure,
            Some(false) => Transport::Insecure,
        }
    }
}

/// A named route definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub(crate) name: String,
    pub(crate) path: String,
    #[serde(skip)]
    pub(crate) handler: Option<Handler>,
    #[serde(default)]
    pub(crate) host: String,
    #[serde(default)]
    pub(crate) accepts: Vec<String>,
    #[serde(default)]
    pub(crate) allows: Vec<String>,
    #[serde(default)]
    pub(crate) attributes: Params,
    #[serde(default)]
    pub(crate) defaults: Params,
    #[serde(default)]
    pub(crate) auth: Params,
    #[serde(default)]
    pub(crate) requirements: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) secure: Transport,
    #[serde(default)]
    pub(crate) wildcard: Option<String>,
    #[serde(default = "default_routable")]
    pub(crate) routable: bool,
}

fn default_routable() -> bool {
    true
}

impl Route {
    /// Create an unconstrained, routable route with no handler.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    /// Host pattern, empty when unconstrained.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn accepts(&self) -> &[String] {
        &self.accepts
    }

    pub fn allows(&self) -> &[String] {
        &self.allows
    }

    pub fn attributes(&self) -> &Params {
        &self.attributes
    }

    /// Mutable attributes, used to attach match results to a working copy.
    pub fn attributes_mut(&mut self) -> &mut Params {
        &mut self.attributes
    }

    pub fn defaults(&self) -> &Params {
        &self.defaults
    }

    pub fn auth(&self) -> &Params {
        &self.auth
    }

    pub fn requirements(&self) -> &BTreeMap<String, String> {
        &self.requirements
    }

    pub fn secure(&self) -> Transport {
        self.secure
    }

    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref().filter(|w| !w.is_empty())
    }

    /// False for routes that only exist for reverse path generation.
    pub fn is_routable(&self) -> bool {
        self.routable
    }

    /// Attribute value, falling back to the declared default.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).or_else(|| self.defaults.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clone_shares_handler_and_copies_attributes() {
        let mut route = Route::new("blog.read", "/blog/{id}");
        route.handler = Some(Handler::new("BlogController::read".to_string()));

        let mut copy = route.clone();
        copy.attributes_mut().insert("id".into(), json!("42"));

        assert!(route.attributes().is_empty());
        assert_eq!(copy.param("id"), Some(&json!("42")));
        assert!(route.handler().unwrap().ptr_eq(copy.handler().unwrap()));
        assert_eq!(
            copy.handler().unwrap().downcast_ref::<String>().map(String::as_str),
            Some("BlogController::read")
        );
    }

    #[test]
    fn test_param_falls_back_to_defaults() {
        let mut route = Route::new("list", "/list");
        route.defaults.insert("page".into(), json!(1));
        assert_eq!(route.param("page"), Some(&json!(1)));
        assert_eq!(route.param("missing"), None);
    }

    #[test]
    fn test_serde_skips_handler() {
        let mut route = Route::new("home", "/");
        route.handler = Some(Handler::new(7u32));
        route.secure = Transport::Secure;

        let encoded = serde_json::to_value(&route).unwrap();
        assert!(encoded.get("handler").is_none());
        assert_eq!(encoded["secure"], json!("secure"));

        let decoded: Route = serde_json::from_value(json!({"name": "home", "path": "/"})).unwrap();
        assert!(decoded.is_routable());
        assert!(decoded.handler().is_none());
        assert_eq!(decoded.secure(), Transport::Any);
    }

    #[test]
    fn test_empty_wildcard_is_none() {
        let mut route = Route::new("files", "/files");
        route.wildcard = Some(String::new());
        assert_eq!(route.wildcard(), None);
    }
}
