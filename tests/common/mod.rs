//! Common test utilities and helpers
//!
//! This module provides shared utilities for all integration tests:
//! - Building the router around a temporary upload directory
//! - Sending requests and decoding JSON bodies
//! - Database fixtures gated on `DATABASE_URL`
//! - Session cookie helpers
//! - Error envelope assertions

#![allow(dead_code)]


pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use pulsechat::backend::routes::create_router;
use pulsechat::backend::server::AppState;
use pulsechat::shared::{AppConfig, AppConfigBuilder};

/// Router plus the state behind it
///
/// Uploaded files land in a temporary directory removed on drop.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub uploads: TempDir,
}

impl TestApp {
    /// App without a database
    pub fn without_database() -> Self {
        Self::build(None, |builder| builder)
    }

    /// App backed by `pool`
    pub fn with_database(pool: PgPool) -> Self {
        Self::build(Some(pool), |builder| builder)
    }

    /// App with extra configuration applied
    pub fn build(
        pool: Option<PgPool>,
        configure: impl FnOnce(AppConfigBuilder) -> AppConfigBuilder,
    ) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload directory");
        let builder = AppConfig::builder()
            .jwt_secret("integration-test-secret")
            .upload_dir(uploads.path())
            .bcrypt_cost(4);
        let config = configure(builder).build().expect("Invalid test configuration");

        let state = AppState::new(config, pool);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            uploads,
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, None, cookie)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::POST, uri, Some(body), cookie)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::PUT, uri, Some(body), cookie)).await
    }
}

/// Decoded response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Build a request with an optional JSON body and session cookie
pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}
