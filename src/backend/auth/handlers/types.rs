/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Request fields are optional so that missing values can be reported with a
 * proper validation error instead of a generic body rejection.
 */

use serde::{Deserialize, Serialize};

use crate::shared::PublicUser;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// User's email address
    pub email: Option<String>,
    /// Display name, at least 3 characters after trimming
    pub full_name: Option<String>,
    /// User's password (will be hashed before storage)
    pub password: Option<String>,
    /// Optional profile picture as a data URI or URL
    pub profile_pic: Option<String>,
}

impl SignupRequest {
    /// Names of required fields that are absent or empty, in wire order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", &self.email),
            ("fullName", &self.full_name),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile update request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New picture as a data URI or URL
    pub profile_pic: Option<String>,
}

/// Auth response
///
/// Returned by signup, login, profile update and check. The session itself
/// travels in the `token` cookie, never in the body.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: PublicUser) -> Self {
        Self {
            success: true,
            message: message.into(),
            user,
        }
    }
}

/// Response with only a status message
#[derive(Serialize, Deserialize, Debug)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}
