/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The optional database pool
 * - Session token settings
 * - The presence registry for real-time delivery
 * - The image store used for uploads
 * - The loaded configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust,ignore
 * use pulsechat::backend::realtime::PresenceRegistry;
 * use axum::extract::State;
 *
 * async fn handler(State(presence): State<PresenceRegistry>) {
 *     let online = presence.online_users();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::sessions::SessionConfig;
use crate::backend::error::BackendError;
use crate::backend::realtime::PresenceRegistry;
use crate::backend::uploads::{ImageStore, LocalImageStore};
use crate::shared::AppConfig;

/// Application state shared by every handler
///
/// # Fields
///
/// * `db_pool` - Optional PostgreSQL connection pool
/// * `sessions` - JWT and cookie settings
/// * `presence` - Online users and their event channels
/// * `images` - Storage for uploaded images
/// * `config` - Loaded application configuration
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured or unreachable.
    /// Database-backed handlers answer 503 in that case.
    pub db_pool: Option<PgPool>,

    pub sessions: SessionConfig,

    pub presence: PresenceRegistry,

    pub images: Arc<dyn ImageStore>,

    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build state with the local image store from `config`
    pub fn new(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        let images = LocalImageStore::new(config.upload_dir.clone(), config.upload_url_prefix.clone());
        Self::with_image_store(config, db_pool, Arc::new(images))
    }

    /// Build state with a custom image store
    pub fn with_image_store(
        config: AppConfig,
        db_pool: Option<PgPool>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            db_pool,
            sessions: SessionConfig::from_config(&config),
            presence: PresenceRegistry::new(),
            images,
            config: Arc::new(config),
        }
    }

    /// The database pool, or 503 when persistence is disabled
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            tracing::warn!("Database-backed request while the database is not configured");
            BackendError::service_unavailable("Database is not available")
        })
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for SessionConfig {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

/// Implement FromRef for PresenceRegistry
///
/// This allows the event stream and the send handler to reach the
/// registry without the entire `AppState`.
impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ImageStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.images.clone()
    }
}
