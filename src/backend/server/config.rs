/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration:
 * the typed `AppConfig` read from environment variables and the optional
 * PostgreSQL connection.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (after `.env` has been
 * applied by the binary), with defaults suited to local development.
 *
 * # Error Handling
 *
 * Invalid configuration values stop startup. A missing or unreachable
 * database does not: the pool is set to `None` and database-backed
 * endpoints answer 503.
 */

use std::str::FromStr;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, Environment};

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

const MAX_DB_CONNECTIONS: u32 = 10;

fn parse_var<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

/// Build configuration from a variable lookup
///
/// `lookup` returns the value of a variable, or `None` when unset.
pub fn config_from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = AppConfigBuilder::default();

    if let Some(env) = lookup("APP_ENV").or_else(|| lookup("NODE_ENV")) {
        builder = builder.environment(Environment::parse(&env));
    }
    if let Some(port) = lookup("PORT") {
        builder = builder.port(parse_var("PORT", port)?);
    }
    if let Some(url) = lookup("DATABASE_URL") {
        builder = builder.database_url(url);
    }
    if let Some(secret) = lookup("JWT_SECRET") {
        builder = builder.jwt_secret(secret);
    }
    if let Some(origin) = lookup("CORS_ORIGIN") {
        builder = builder.cors_origin(origin);
    }
    if let Some(dir) = lookup("UPLOAD_DIR") {
        builder = builder.upload_dir(dir);
    }
    if let Some(prefix) = lookup("UPLOAD_URL_PREFIX") {
        builder = builder.upload_url_prefix(prefix);
    }
    if let Some(dir) = lookup("STATIC_DIR") {
        builder = builder.static_dir(dir);
    }
    if let Some(bytes) = lookup("MAX_BODY_BYTES") {
        builder = builder.max_body_bytes(parse_var("MAX_BODY_BYTES", bytes)?);
    }
    if let Some(days) = lookup("SESSION_TTL_DAYS") {
        builder = builder.session_ttl_days(parse_var("SESSION_TTL_DAYS", days)?);
    }
    if let Some(cost) = lookup("BCRYPT_COST") {
        builder = builder.bcrypt_cost(parse_var("BCRYPT_COST", cost)?);
    }

    builder.build()
}

/// Load configuration from the process environment
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config = config_from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!(
        environment = ?config.environment,
        port = config.port,
        database = config.database_url.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Connects to the configured PostgreSQL URL
/// 2. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured or the connection fails
///
/// # Errors
///
/// Errors are logged but do not prevent server startup.
pub async fn load_database(database_url: Option<&str>) -> DatabaseConfig {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
