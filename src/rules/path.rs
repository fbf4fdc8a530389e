//! Path rule.
//!
//! # Responsibilities
//! - Compile the route template into an anchored regex
//! - Expand `{name}` placeholders, honouring per-parameter requirements
//! - Append an optional trailing wildcard capture
//! - Attach captured values to the route's attributes
//!
//! # Design Decisions
//! - The base path is a constructor argument, never global state
//! - Literal template text is escaped; only placeholders become patterns
//! - An uncompilable pattern fails the rule instead of erroring the match

use regex::Regex;
use serde_json::Value;

use crate::http::ServerRequest;
use crate::routing::Route;
use crate::rules::Rule;

/// Pattern used for placeholders without an explicit requirement.
const DEFAULT_SEGMENT: &str = "[^/]+";

/// Matches the request path against the route's path template.
///
/// Template text outside `{name}` placeholders matches literally, so a path
/// such as `/users/\d+` only matches that exact string. Constrain a segment
/// with a placeholder and a requirement instead: path `/users/{id}` with
/// requirement `id = "\d+"`.
#[derive(Debug, Clone, Default)]
pub struct Path {
    base_path: String,
}

impl Path {
    pub const NAME: &'static str = "Path";

    /// Create a path rule that prefixes every route template with `base_path`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Build the anchored regex source for a route.
    pub fn pattern(&self, route: &Route) -> String {
        let template = format!("{}{}", self.base_path, route.path());
        let mut regex = expand_template(&template, route);

        if let Some(wildcard) = route.wildcard() {
            let trimmed = regex.trim_end_matches('/').len();
            regex.truncate(trimmed);
            regex.push_str(&format!("(/(?P<{}>.*))?", wildcard));
        }

        format!("^{}$", regex)
    }
}

/// Escape literal text and turn `{name}` placeholders into named groups.
fn expand_template(template: &str, route: &Route) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        let name = &rest[open + 1..close];
        if !is_param_name(name) {
            // Only the brace is literal; a placeholder may still open after it.
            out.push_str(&regex::escape(&rest[..=open]));
            rest = &rest[open + 1..];
            continue;
        }

        out.push_str(&regex::escape(&rest[..open]));
        let body = route
            .requirements()
            .get(name)
            .map(String::as_str)
            .unwrap_or(DEFAULT_SEGMENT);
        out.push_str(&format!("(?P<{}>{})", name, body));
        rest = &rest[close + 1..];
    }

    out.push_str(&regex::escape(rest));
    out
}

/// Placeholder names follow regex group naming: `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Rule for Path {
    fn matches(&self, request: &dyn ServerRequest, route: &mut Route) -> bool {
        let pattern = self.pattern(route);
        let regex = match Regex::new(&pattern) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(route = %route.name(), pattern = %pattern, error = %e, "Invalid path pattern");
                return false;
            }
        };

        let Some(captures) = regex.captures(request.path()) else {
            return false;
        };

        for name in regex.capture_names().flatten() {
            if let Some(value) = captures.name(name) {
                route
                    .attributes_mut()
                    .insert(name.to_string(), Value::String(value.as_str().to_string()));
            }
        }
        true
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
