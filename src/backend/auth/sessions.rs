/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions,
 * and the `token` cookie that carries them.
 */

use axum::http::{header, HeaderMap, HeaderValue};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::AppConfig;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Session token settings
#[derive(Clone)]
pub struct SessionConfig {
    secret: String,
    ttl_seconds: i64,
    secure: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionConfig {
    /// Create session settings
    ///
    /// # Arguments
    /// * `secret` - HMAC secret
    /// * `ttl_days` - Token and cookie lifetime
    /// * `secure` - Whether the cookie carries `Secure`
    pub fn new(secret: impl Into<String>, ttl_days: i64, secure: bool) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: ttl_days.saturating_mul(SECONDS_PER_DAY),
            secure,
        }
    }

    /// Session settings derived from the application config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.session_ttl_days,
            config.secure_cookies(),
        )
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID (UUID)
    ///
    /// # Returns
    /// JWT token string
    pub fn create_token(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_seconds),
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(Algorithm::HS256), &claims, &key)
    }

    /// Verify and decode a JWT token
    ///
    /// # Returns
    /// Decoded claims, or an error for a bad signature or expired token
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and extract the user ID
    pub fn user_id_from_token(&self, token: &str) -> Option<Uuid> {
        let claims = self.verify_token(token).ok()?;
        Uuid::parse_str(&claims.sub).ok()
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl_seconds)
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_session_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
            SESSION_COOKIE, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Build a `Set-Cookie` header for a new session
    pub fn session_header(&self, user_id: Uuid) -> Result<HeaderValue, SessionError> {
        let token = self.create_token(user_id).map_err(SessionError::Token)?;
        HeaderValue::from_str(&self.session_cookie(&token)).map_err(|_| SessionError::Header)
    }

    /// Build a `Set-Cookie` header that ends the session
    pub fn clear_header(&self) -> Result<HeaderValue, SessionError> {
        HeaderValue::from_str(&self.clear_session_cookie()).map_err(|_| SessionError::Header)
    }
}

/// Failure to issue a session cookie
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to sign session token: {0}")]
    Token(jsonwebtoken::errors::Error),
    #[error("Session cookie is not a valid header value")]
    Header,
}

impl From<SessionError> for crate::backend::error::BackendError {
    fn from(err: SessionError) -> Self {
        crate::backend::error::BackendError::internal(err.to_string())
    }
}

/// Read the session token from the `Cookie` header
///
/// Returns `None` when the cookie is absent or empty.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
