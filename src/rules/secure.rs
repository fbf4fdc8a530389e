//! Transport security rule.

use crate::http::{ServerParams, ServerRequest};
use crate::routing::Route;
use crate::rules::Rule;

const HTTPS_PORT: u16 = 443;

/// Compares the route's transport requirement with how the request arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secure;

impl Secure {
    pub const NAME: &'static str = "Secure";

    /// True if either server signal reports a secure transport.
    pub fn is_secure(params: &ServerParams) -> bool {
        params.https.as_deref() == Some("on") || params.server_port == Some(HTTPS_PORT)
    }
}

impl Rule for Secure {
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool {
        match route.secure().required() {
            None => true,
            Some(required) => required == Self::is_secure(&request.server_params()),
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
