//! End-to-end matching against TOML route tables.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use route_matcher::http::ServerParams;
use route_matcher::{MatchRequest, Matcher, RouteBuilder, RoutingError, UrlMatcher};
use serde_json::json;

mod common;

fn api_request(uri: &str) -> Request<Body> {
    let mut req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("Accept", "application/json")
        .body(Body::default())
        .unwrap();
    req.extensions_mut().insert(ServerParams::secure(443));
    req
}

#[test]
fn test_first_routable_route_matches() {
    let matcher = common::matcher(common::ROUTES);

    let route = matcher
        .match_request(&api_request("https://api.example.com/users/42"))
        .unwrap();
    assert_eq!(route.name(), "api.users.read");
    assert_eq!(route.attributes().get("id"), Some(&json!("42")));
    assert_eq!(
        route.handler().and_then(|h| h.downcast_ref::<String>()).map(String::as_str),
        Some("api.users.read")
    );
}

#[test]
fn test_rejection_names_rule_and_route() {
    let matcher = common::matcher(common::ROUTES);

    let cases = [
        ("https://evilapi.example.com/users/42", "Host"),
        ("https://api.example.com/users/abc", "Path"),
        ("https://api.example.com/files/a", "Path"),
    ];
    for (uri, rule) in cases {
        let err = matcher.match_request(&api_request(uri)).unwrap_err();
        match err {
            RoutingError::RuleNotAllowed { rule: failed, route, .. } => {
                assert_eq!(failed, rule, "uri {}", uri);
                assert_eq!(route, "api.users.read");
            }
            other => panic!("unexpected error for {}: {:?}", uri, other),
        }
    }
}

#[test]
fn test_later_perfect_match_is_not_used() {
    // "files" would match /files/a/b, but the first routable route is examined alone.
    let matcher = common::matcher(common::ROUTES);
    let err = matcher
        .match_request(&MatchRequest::new("/files/a/b"))
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(matches!(err, RoutingError::RuleNotAllowed { ref route, .. } if route == "api.users.read"));
}

#[test]
fn test_method_and_transport_failures() {
    let matcher = common::matcher(common::ROUTES);

    let mut post = api_request("https://api.example.com/users/1");
    *post.method_mut() = axum::http::Method::POST;
    let err = matcher.match_request(&post).unwrap_err();
    assert!(matches!(err, RoutingError::RuleNotAllowed { ref rule, .. } if rule == "Allows"));

    let plain = Request::builder()
        .uri("http://api.example.com/users/1")
        .header("Accept", "application/json")
        .body(Body::default())
        .unwrap();
    let err = matcher.match_request(&plain).unwrap_err();
    assert!(matches!(err, RoutingError::RuleNotAllowed { ref rule, .. } if rule == "Secure"));
}

#[test]
fn test_negotiation_failure_maps_to_406() {
    let matcher = common::matcher(common::ROUTES);
    let mut req = Request::builder()
        .uri("https://api.example.com/users/1")
        .header("Accept", "application/json;q=0.0")
        .body(Body::default())
        .unwrap();
    req.extensions_mut().insert(ServerParams::secure(443));

    let err = matcher.match_request(&req).unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_ACCEPTABLE);
}

#[test]
fn test_wildcard_route() {
    let matcher = common::matcher(
        r#"
        [[routes]]
        name = "files"
        path = "/files"
        wildcard = "rest"
        "#,
    );

    let root = matcher.match_request(&MatchRequest::new("/files")).unwrap();
    assert!(root.attributes().get("rest").is_none());

    let nested = matcher.match_request(&MatchRequest::new("/files/a/b/c")).unwrap();
    assert_eq!(nested.attributes().get("rest"), Some(&json!("a/b/c")));

    let err = matcher.match_request(&MatchRequest::new("/filesx")).unwrap_err();
    assert!(matches!(err, RoutingError::RuleNotAllowed { ref rule, .. } if rule == "Path"));
}

#[test]
fn test_base_path() {
    let matcher = common::matcher(
        r#"
        [matcher]
        base_path = "/app"

        [[routes]]
        name = "home"
        path = "/home"
        "#,
    );
    assert!(matcher.match_request(&MatchRequest::new("/app/home")).is_ok());
    assert!(matcher.match_request(&MatchRequest::new("/home")).is_err());
}

#[test]
fn test_only_generation_routes() {
    let matcher = common::matcher(
        r#"
        [[routes]]
        name = "a"
        path = "/a"
        routable = false
        "#,
    );
    let err = matcher.match_request(&MatchRequest::new("/a")).unwrap_err();
    assert_eq!(err, RoutingError::ResourceNotFound { path: "/a".into() });
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_replaced_route_keeps_position() {
    let mut routes = common::config(common::ROUTES).route_collection();
    routes.add(RouteBuilder::new().route("api.users.read", "/people/{id}"));

    let order: Vec<_> = routes.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(order, vec!["blog.generate", "api.users.read", "files"]);

    let matcher = UrlMatcher::with_standard_rules(routes, "");
    let route = matcher.match_request(&MatchRequest::new("/people/7")).unwrap();
    assert_eq!(route.name(), "api.users.read");
    assert_eq!(route.attributes().get("id"), Some(&json!("7")));
}
