/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Connect to the database and run migrations (optional)
 * 3. Make sure the upload directory exists
 * 4. Create the application state and router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::{AppConfig, ConfigError};

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// Only invalid configuration is an error. The server is resilient to the
/// rest:
/// - Missing database: Server continues without database features
/// - Migration failures: Logged but don't prevent startup
/// - Upload directory creation failure: Logged; uploads will fail per request
pub async fn create_app(config: AppConfig) -> Result<Router<()>, ConfigError> {
    config.validate()?;
    tracing::info!("Initializing PulseChat backend server");

    let db_pool = load_database(config.database_url.as_deref()).await;

    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        tracing::error!(
            "Failed to create upload directory {}: {}",
            config.upload_dir.display(),
            e
        );
    }

    let app_state = AppState::new(config, db_pool);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    Ok(app)
}
