//! Application configuration module
//!
//! Provides configuration types for the application. Values are usually
//! filled from environment variables by the server, but the builder can
//! be used directly in tests.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_UPLOAD_URL_PREFIX: &str = "/uploads";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Longest accepted session lifetime
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// Secret used when none is configured outside production
pub const DEVELOPMENT_JWT_SECRET: &str = "pulsechat-development-secret";

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    /// Any other named deployment (staging, test, ...)
    Other,
}

impl Environment {
    /// Parse an `APP_ENV`/`NODE_ENV` value
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("production") {
            Environment::Production
        } else if value.eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Other
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// Port the HTTP server binds to
    pub port: u16,
    /// Postgres connection string; `None` runs without persistence
    pub database_url: Option<String>,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Origin allowed to make credentialed cross-origin requests
    pub cors_origin: String,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL prefix uploaded images are served under
    pub upload_url_prefix: String,
    /// Built frontend served in production
    pub static_dir: PathBuf,
    /// Maximum accepted request body size
    pub max_body_bytes: usize,
    pub session_ttl_days: i64,
    pub bcrypt_cost: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: DEFAULT_PORT,
            database_url: None,
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            upload_url_prefix: DEFAULT_UPLOAD_URL_PREFIX.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Session cookies carry `Secure` everywhere except development
    pub fn secure_cookies(&self) -> bool {
        !self.environment.is_development()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.environment.is_production() && self.jwt_secret == DEVELOPMENT_JWT_SECRET {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !self.upload_url_prefix.starts_with('/') || self.upload_url_prefix.len() < 2 {
            return Err(ConfigError::InvalidValue {
                key: "UPLOAD_URL_PREFIX",
                value: self.upload_url_prefix.clone(),
            });
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.session_ttl_days <= 0 || self.session_ttl_days > MAX_SESSION_TTL_DAYS {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_TTL_DAYS",
                value: self.session_ttl_days.to_string(),
            });
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_BODY_BYTES",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    environment: Option<Environment>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    cors_origin: Option<String>,
    upload_dir: Option<PathBuf>,
    upload_url_prefix: Option<String>,
    static_dir: Option<PathBuf>,
    max_body_bytes: Option<usize>,
    session_ttl_days: Option<i64>,
    bcrypt_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn upload_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_url_prefix = Some(prefix.into());
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = Some(bytes);
        self
    }

    pub fn session_ttl_days(mut self, days: i64) -> Self {
        self.session_ttl_days = Some(days);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build the configuration, filling defaults and validating the result
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let environment = self.environment.unwrap_or_default();

        let jwt_secret = match self.jwt_secret {
            Some(secret) => secret,
            None if environment.is_production() => {
                return Err(ConfigError::MissingValue("JWT_SECRET"))
            }
            None => defaults.jwt_secret,
        };

        let config = AppConfig {
            environment,
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url.filter(|url| !url.trim().is_empty()),
            jwt_secret,
            cors_origin: self.cors_origin.unwrap_or(defaults.cors_origin),
            upload_dir: self.upload_dir.unwrap_or(defaults.upload_dir),
            upload_url_prefix: self
                .upload_url_prefix
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upload_url_prefix),
            static_dir: self.static_dir.unwrap_or(defaults.static_dir),
            max_body_bytes: self.max_body_bytes.unwrap_or(defaults.max_body_bytes),
            session_ttl_days: self.session_ttl_days.unwrap_or(defaults.session_ttl_days),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
