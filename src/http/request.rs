//! Request abstraction consumed by the matching engine.
//!
//! # Responsibilities
//! - Expose routing-relevant information (method, path, host)
//! - Repeatable header lookup (for `Accept`)
//! - Server parameters (HTTPS flag, server port)
//!
//! # Design Decisions
//! - The engine only sees `dyn ServerRequest`, never a concrete request type
//! - `axum::http::Request` is supported directly; server parameters come from
//!   a `ServerParams` extension, or are derived from the URI when absent
//! - `MatchRequest` is an owned request for the CLI and tests

use axum::http::{header, uri::InvalidUri, Request, Uri};

/// Server-provided transport parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerParams {
    /// Value of the HTTPS flag (`"on"` when the request arrived over TLS).
    pub https: Option<String>,
    /// Port the server accepted the request on.
    pub server_port: Option<u16>,
}

impl ServerParams {
    /// Parameters for a request received over TLS on the given port.
    pub fn secure(port: u16) -> Self {
        Self {
            https: Some("on".to_string()),
            server_port: Some(port),
        }
    }

    /// Parameters for a plain-text request on the given port.
    pub fn plain(port: u16) -> Self {
        Self {
            https: None,
            server_port: Some(port),
        }
    }
}

/// Read-only view of an incoming request.
pub trait ServerRequest {
    /// HTTP method. May be empty when the transport did not report one.
    fn method(&self) -> &str;

    /// URI path component.
    fn path(&self) -> &str;

    /// URI host component, empty when unknown.
    fn host(&self) -> &str;

    /// All values of the named header, in arrival order.
    fn header_values(&self, name: &str) -> Vec<String>;

    /// Transport parameters reported by the server.
    fn server_params(&self) -> ServerParams;
}

impl<B> ServerRequest for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn host(&self) -> &str {
        if let Some(host) = self.uri().host() {
            return host;
        }
        // Origin-form URIs carry the authority in the Host header.
        self.headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(strip_port)
            .unwrap_or_default()
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.headers()
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    fn server_params(&self) -> ServerParams {
        if let Some(params) = self.extensions().get::<ServerParams>() {
            return params.clone();
        }
        let uri = self.uri();
        ServerParams {
            https: (uri.scheme_str() == Some("https")).then(|| "on".to_string()),
            server_port: uri.port_u16(),
        }
    }
}

/// Strip a trailing `:port` from a Host header value.
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        // IPv6 literal, keep the brackets
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, _)) => host,
        None => authority,
    }
}

/// Owned request description.
#[derive(Debug, Clone, Default)]
pub struct MatchRequest {
    method: String,
    path: String,
    host: String,
    headers: Vec<(String, String)>,
    server: ServerParams,
}

impl MatchRequest {
    /// Request for a bare path with no method, host or headers.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Parse an absolute or origin-form URI.
    ///
    /// An `https` scheme sets the HTTPS flag; an explicit port sets the
    /// server port.
    pub fn from_uri(uri: &str) -> Result<Self, InvalidUri> {
        let uri: Uri = uri.parse()?;
        let mut request = Self::new(uri.path());
        request.host = uri.host().unwrap_or_default().to_string();
        request.server = ServerParams {
            https: (uri.scheme_str() == Some("https")).then(|| "on".to_string()),
            server_port: uri.port_u16(),
        };
        Ok(request)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Add a header value. Repeated names keep every value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_server_params(mut self, server: ServerParams) -> Self {
        self.server = server;
        self
    }
}

impl ServerRequest for MatchRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn header_values(&self, name: &str) -> Vec<String> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn server_params(&self) -> ServerParams {
        self.server.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_http_request_view() {
        let req = Request::builder()
            .method("POST")
            .uri("https://api.example.com/users/7")
            .header("Accept", "application/json")
            .header("Accept", "text/html")
            .body(Body::default())
            .unwrap();

        assert_eq!(ServerRequest::method(&req), "POST");
        assert_eq!(ServerRequest::path(&req), "/users/7");
        assert_eq!(ServerRequest::host(&req), "api.example.com");
        assert_eq!(
            req.header_values("accept"),
            vec!["application/json".to_string(), "text/html".to_string()]
        );
        assert_eq!(req.server_params().https.as_deref(), Some("on"));
    }

    #[test]
    fn test_host_header_fallback() {
        let req = Request::builder()
            .uri("/status")
            .header("Host", "internal.local:8080")
            .body(Body::default())
            .unwrap();
        assert_eq!(ServerRequest::host(&req), "internal.local");

        let req = Request::builder()
            .uri("/status")
            .header("Host", "[::1]:8080")
            .body(Body::default())
            .unwrap();
        assert_eq!(ServerRequest::host(&req), "[::1]");
    }

    #[test]
    fn test_server_params_extension_wins() {
        let mut req = Request::builder()
            .uri("http://example.com/")
            .body(Body::default())
            .unwrap();
        req.extensions_mut().insert(ServerParams::secure(443));
        assert_eq!(req.server_params(), ServerParams::secure(443));
    }

    #[test]
    fn test_match_request_from_uri() {
        let req = MatchRequest::from_uri("http://example.com:8443/a/b")
            .unwrap()
            .with_header("Accept", "*/*");
        assert_eq!(req.path(), "/a/b");
        assert_eq!(req.host(), "example.com");
        assert_eq!(req.method(), "");
        assert_eq!(req.server_params().server_port, Some(8443));
        assert!(req.server_params().https.is_none());
        assert_eq!(req.header_values("ACCEPT"), vec!["*/*".to_string()]);
    }
}
