/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be converted to HTTP responses and other formats.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "success": false,
 *   "error": { "code": "VALIDATION_ERROR", "message": "...", "details": {} }
 * }
 * ```
 * `details` is omitted when the error carries none.
 */

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;

impl BackendError {
    /// Build the JSON error envelope for this error
    pub fn envelope(&self) -> serde_json::Value {
        let mut error = serde_json::json!({
            "code": self.code().as_str(),
            "message": self.message(),
        });
        if let Some(details) = self.details() {
            error["details"] = details;
        }
        serde_json::json!({ "success": false, "error": error })
    }
}

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side failures are logged with their full cause before the
    /// generic envelope is sent.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(self.envelope())).into_response()
    }
}

impl From<JsonRejection> for BackendError {
    /// Map body extraction failures onto the error envelope
    ///
    /// Bodies over the size limit answer 413; anything else that cannot be
    /// read as JSON is a validation error.
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return BackendError::payload_too_large();
        }
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        BackendError::validation("Invalid request body")
    }
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
