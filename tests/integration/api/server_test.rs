//! Integration tests for the router shell: health, fallback, CORS, config

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serial_test::serial;

use crate::common::*;
use pulsechat::backend::server::config::load_config;
use pulsechat::backend::server::create_app;
use pulsechat::shared::{AppConfig, Environment};

#[tokio::test]
async fn test_health_reports_disabled_database() {
    let app = TestApp::without_database();

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "disabled");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::without_database();

    let response = app.get("/api/does-not-exist", None).await;

    assert_error(&response, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = TestApp::without_database();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/auth/login")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn test_cors_ignores_other_origins() {
    let app = TestApp::without_database();

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    // Only the configured origin is ever named; browsers reject the mismatch
    let allowed = response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN);
    assert_eq!(
        allowed.and_then(|value| value.to_str().ok()),
        Some("http://localhost:5173")
    );
    assert!(response
        .headers
        .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .iter()
        .all(|value| value != "http://evil.example"));
}

#[tokio::test]
async fn test_wrong_method_uses_error_envelope() {
    let app = TestApp::without_database();

    let response = app.get("/api/auth/login", None).await;

    assert_error_message(
        &response,
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "Method not allowed",
    );
}

#[tokio::test]
async fn test_wrong_method_on_protected_route_skips_auth() {
    let app = TestApp::without_database();

    let response = app
        .send(request(Method::DELETE, "/api/messages/users", None, None))
        .await;

    assert_error(&response, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_production_serves_spa_fallback() {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>pulsechat</html>").unwrap();
    let static_path = static_dir.path().to_path_buf();

    let app = TestApp::build(None, move |builder| {
        builder
            .environment(Environment::Production)
            .static_dir(static_path)
    });

    let response = app
        .send(request(Method::GET, "/chat/some-client-route", None, None))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // API routes still win over the fallback
    let health = app.get("/health", None).await;
    assert_eq!(health.body["status"], "ok");
}

#[tokio::test]
async fn test_create_app_rejects_invalid_config() {
    let config = AppConfig {
        bcrypt_cost: 2,
        ..AppConfig::default()
    };

    assert!(create_app(config).await.is_err());
}

#[tokio::test]
async fn test_create_app_without_database() {
    let uploads = tempfile::tempdir().unwrap();
    let config = AppConfig {
        upload_dir: uploads.path().join("nested"),
        ..AppConfig::default()
    };

    let app = create_app(config).await.expect("valid config");
    drop(app);

    assert!(uploads.path().join("nested").is_dir());
}

#[test]
#[serial]
fn test_load_config_from_environment() {
    std::env::set_var("PORT", "6100");
    std::env::set_var("SESSION_TTL_DAYS", "3");
    std::env::remove_var("APP_ENV");
    std::env::remove_var("NODE_ENV");

    let config = load_config().expect("valid environment");

    std::env::remove_var("PORT");
    std::env::remove_var("SESSION_TTL_DAYS");

    assert_eq!(config.port, 6100);
    assert_eq!(config.session_ttl_days, 3);
    assert_eq!(config.environment, Environment::Development);
}

#[test]
#[serial]
fn test_load_config_rejects_bad_port() {
    std::env::set_var("PORT", "not-a-port");

    let result = load_config();

    std::env::remove_var("PORT");

    assert!(result.is_err());
}
