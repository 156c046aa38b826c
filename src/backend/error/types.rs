/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Types
 *
 * - `Api` - An error with a stable machine-readable code
 * - `Database` - A failed query; reported as an internal error
 * - `SharedError` - Validation and serialization errors from the shared module
 *
 * # Error Codes
 *
 * Every response carries one of the codes in `ErrorCode`. The code decides
 * the HTTP status, so clients can branch on either.
 */

use thiserror::Error;
use axum::http::StatusCode;
use serde_json::Value;
use crate::shared::SharedError;

/// Machine-readable error codes sent in the error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    UserExists,
    UploadFailed,
    Unauthorized,
    InvalidCredentials,
    UserNotFound,
    NotFound,
    MethodNotAllowed,
    PayloadTooLarge,
    ServiceUnavailable,
    InternalServerError,
}

impl ErrorCode {
    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UserExists => "USER_EXISTS",
            Self::UploadFailed => "UPLOAD_FAILED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// HTTP status the code is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError | Self::UserExists | Self::UploadFailed => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Message sent for every internal failure; the cause is only logged
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// This enum represents all possible errors that can occur in the backend.
/// Each variant can be converted to an HTTP response.
///
/// # Usage
///
/// ```rust
/// use pulsechat::backend::error::BackendError;
///
/// let err = BackendError::validation("Password must be at least 8 characters long");
/// let err = BackendError::unauthorized("Authentication token is missing.");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error with an explicit code, message and optional details
    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        details: Option<Value>,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create an error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a details object to an `Api` error
    pub fn with_details(self, details: Value) -> Self {
        match self {
            Self::Api { code, message, .. } => Self::Api {
                code,
                message,
                details: Some(details),
            },
            other => other,
        }
    }

    /// Create a new validation error (400)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Validation error naming the offending field (400)
    pub fn validation_field(field: &str, message: impl Into<String>) -> Self {
        Self::validation(message).with_details(serde_json::json!({ "field": field }))
    }

    /// Signup with an email that is already registered (400)
    pub fn user_exists(email: &str) -> Self {
        Self::new(ErrorCode::UserExists, "User with this email already exists")
            .with_details(serde_json::json!({ "email": email }))
    }

    /// Image upload failure (400)
    pub fn upload_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UploadFailed, message)
    }

    /// Missing or invalid session (401)
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Wrong password on login (401)
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "Invalid email or password")
    }

    /// Unknown user (404)
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "User not found")
    }

    /// Generic missing resource (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Known path, wrong HTTP method (405)
    pub fn method_not_allowed() -> Self {
        Self::new(ErrorCode::MethodNotAllowed, "Method not allowed")
    }

    /// Request body over the configured limit (413)
    pub fn payload_too_large() -> Self {
        Self::new(
            ErrorCode::PayloadTooLarge,
            "Payload too large. Please use a smaller image.",
        )
    }

    /// A dependency such as the database is not configured (503)
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Internal failure; `message` is logged, never sent (500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }

    /// The error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Api { code, .. } => *code,
            Self::Database(_) => ErrorCode::InternalServerError,
            Self::SharedError(SharedError::ValidationError { .. }) => ErrorCode::ValidationError,
            Self::SharedError(SharedError::SerializationError { .. }) => {
                ErrorCode::InternalServerError
            }
            Self::SerializationError(_) => ErrorCode::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.code().status()
    }

    /// Get the client-facing error message
    ///
    /// Internal errors always report the generic message.
    pub fn message(&self) -> String {
        if self.code() == ErrorCode::InternalServerError {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// Optional details object for the envelope
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::Api { details, .. } => details.clone(),
            Self::SharedError(err) => err
                .field()
                .map(|field| serde_json::json!({ "field": field })),
            _ => None,
        }
    }
}
