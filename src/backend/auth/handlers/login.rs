/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by normalized email
 * 2. Verify password using bcrypt
 * 3. Set the session cookie
 * 4. Return the user's profile
 *
 * # Security
 *
 * - Passwords are verified using bcrypt on the blocking pool
 * - User passwords are never returned in responses
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Json},
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::validation::normalize_email;

/// Login handler
///
/// # Arguments
///
/// * `State(state)` - Application state
/// * `payload` - Login request containing email and password
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Email or password missing
/// * `404 USER_NOT_FOUND` - No account for this email
/// * `401 INVALID_CREDENTIALS` - Password does not match
/// * `503 SERVICE_UNAVAILABLE` - Database is not configured
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "securepassword123"
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (normalize_email(&email), password)
        }
        _ => {
            tracing::warn!("Login with missing credentials");
            return Err(BackendError::validation("Email and password are required"));
        }
    };

    tracing::info!("Login attempt for email: {}", email);

    let pool = state.pool()?;
    let user = get_user_by_email(pool, &email).await?.ok_or_else(|| {
        tracing::warn!("Login for unknown email: {}", email);
        BackendError::user_not_found()
    })?;

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::invalid_credentials());
    }

    let cookie = state.sessions.session_header(user.id)?;

    tracing::info!("User logged in successfully: {}", user.email);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse::new("Login successful", user.to_public())),
    ))
}
