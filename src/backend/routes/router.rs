/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (auth, messaging, events)
 * 3. Uploaded images under the configured prefix
 * 4. Fallback: the built frontend in production, JSON 404 otherwise
 *
 * A known path with the wrong method answers 405 in the same JSON envelope.
 *
 * # Layers
 *
 * Every route shares the body size limit, CORS and request tracing.
 */

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// Health check (GET /health)
pub async fn health(State(db_pool): State<Option<PgPool>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: if db_pool.is_some() { "connected" } else { "disabled" },
    })
}

async fn not_found() -> BackendError {
    BackendError::not_found("Not found")
}

async fn method_not_allowed() -> BackendError {
    BackendError::method_not_allowed()
}

/// CORS for the single configured browser origin, with credentials
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::error!("CORS_ORIGIN is not a valid header value; cross-origin requests disabled");
            layer
        }
    }
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing services and configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = Router::new().route("/health", get(health));

    let router = configure_api_routes(router, &app_state);

    let router = router.nest_service(
        &config.upload_url_prefix,
        ServeDir::new(&config.upload_dir),
    );

    let router = router.method_not_allowed_fallback(method_not_allowed);

    let router = if config.environment.is_production() {
        let index = config.static_dir.join("index.html");
        tracing::info!("Serving frontend from {}", config.static_dir.display());
        router.fallback_service(ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)))
    } else {
        router.fallback(not_found)
    };

    router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(&config.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
