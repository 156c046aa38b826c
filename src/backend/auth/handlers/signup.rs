/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Report missing fields
 * 2. Validate password length, email format and full name
 * 3. Check if user already exists
 * 4. Hash password using bcrypt
 * 5. Store the profile picture if one was sent as a data URI
 * 6. Create user in database
 * 7. Set the session cookie and return the profile
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with the configured cost
 * - Passwords are never returned in responses
 * - The session token travels only in an HttpOnly cookie
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard, is_data_uri, AVATARS_FOLDER};
use crate::shared::validation::{normalize_email, validate_signup_fields};

/// Sign up handler
///
/// # Arguments
///
/// * `State(state)` - Application state
/// * `payload` - Signup request containing email, full name and password
///
/// # Returns
///
/// 201 with the new user's profile and a `Set-Cookie` header
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Missing fields, short password, bad email or name
/// * `400 USER_EXISTS` - Email already registered
/// * `400 UPLOAD_FAILED` - Profile picture could not be stored
/// * `503 SERVICE_UNAVAILABLE` - Database is not configured
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "fullName": "Ada Lovelace",
///   "password": "securepassword123"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BackendError> {
    let Json(request) = payload?;

    let missing = request.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Signup with missing fields");
        return Err(BackendError::validation("All fields are required")
            .with_details(serde_json::json!({ "missingFields": missing })));
    }

    let email = request.email.as_deref().unwrap_or_default();
    let full_name = request.full_name.as_deref().unwrap_or_default();
    let password = request.password.clone().unwrap_or_default();

    validate_signup_fields(email, full_name, &password).inspect_err(|e| {
        tracing::warn!(field = ?e.field(), "Signup validation failed");
    })?;

    let email = normalize_email(email);
    let full_name = full_name.trim();
    tracing::info!("Signup request for email: {}", email);

    let pool = state.pool()?;

    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::user_exists(&email));
    }

    let password_hash = hash_password(password, state.config.bcrypt_cost).await?;

    let (profile_pic, uploaded) = match request.profile_pic.as_deref().map(str::trim) {
        Some(pic) if is_data_uri(pic) => {
            let stored = state
                .images
                .store(pic, AVATARS_FOLDER)
                .await
                .map_err(|e| {
                    tracing::warn!("Failed to store profile picture: {}", e);
                    BackendError::upload_failed("Failed to upload profile picture")
                })?;
            (stored.url, true)
        }
        Some(pic) => (pic.to_string(), false),
        None => (String::new(), false),
    };

    let user = match create_user(pool, &email, full_name, &password_hash, &profile_pic).await {
        Ok(user) => user,
        Err(e) => {
            if uploaded {
                discard(state.images.as_ref(), &profile_pic).await;
            }
            if is_unique_violation(&e) {
                tracing::warn!("Email registered concurrently: {}", email);
                return Err(BackendError::user_exists(&email));
            }
            return Err(e.into());
        }
    };

    let cookie = state.sessions.session_header(user.id)?;

    tracing::info!("User created successfully: {} ({})", user.full_name, user.email);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse::new("User created successfully", user.to_public())),
    ))
}
