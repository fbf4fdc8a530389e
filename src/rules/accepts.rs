//! Content negotiation rule.
//!
//! # Responsibilities
//! - Decide whether the request's Accept header admits one of the route's
//!   content types
//!
//! # Design Decisions
//! - All Accept values are joined with `;` and searched as one string
//! - `*/*` is probed first so catch-all clients always pass
//! - A candidate `type/subtype` also matches `type/*` in the header
//! - Only an explicit `q=0.0` on the matched entry excludes it

use regex::Regex;

use crate::http::ServerRequest;
use crate::routing::Route;
use crate::rules::Rule;

const ACCEPT: &str = "Accept";
const ANY_TYPE: &str = "*/*";

/// Negotiates the route's content types against the Accept header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accepts;

impl Accepts {
    pub const NAME: &'static str = "Accepts";

    /// Test a single `type/subtype` against the combined header string.
    fn accepts_type(content_type: &str, header: &str) -> bool {
        let Some((kind, sub_kind)) = content_type.split_once('/') else {
            return false;
        };

        let pattern = format!(
            r"{}/({}|\*)(;q=(\d\.\d))?",
            regex::escape(kind),
            regex::escape(sub_kind)
        );
        let regex = match Regex::new(&pattern) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(content_type = %content_type, error = %e, "Invalid content type pattern");
                return false;
            }
        };

        match regex.captures(header) {
            None => false,
            Some(captures) => match captures.get(3) {
                Some(quality) => quality.as_str() != "0.0",
                None => true,
            },
        }
    }
}

impl Rule for Accepts {
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool {
        let values = request.header_values(ACCEPT);
        if route.accepts().is_empty() && values.is_empty() {
            return true;
        }

        let header = values.join(";");
        if Self::accepts_type(ANY_TYPE, &header) {
            return true;
        }

        route
            .accepts()
            .iter()
            .any(|content_type| Self::accepts_type(content_type, &header))
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
