/**
 * Profile Handlers
 *
 * - `update_profile` - PUT /api/auth/update-profile, replaces the profile picture
 * - `check_auth` - GET /api/auth/check, returns the signed-in user
 *
 * Both routes sit behind the auth middleware, so the caller is known.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, UpdateProfileRequest};
use crate::backend::auth::users::update_profile_pic;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard, AVATARS_FOLDER};

/// Update profile picture handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - `profilePic` missing or empty
/// * `400 UPLOAD_FAILED` - The image could not be stored
/// * `404 USER_NOT_FOUND` - The account vanished after authentication
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;

    let source = request
        .profile_pic
        .as_deref()
        .map(str::trim)
        .filter(|pic| !pic.is_empty())
        .ok_or_else(|| {
            BackendError::validation_field(
                "profilePic",
                "Profile picture URL is required and must be a string",
            )
        })?;

    let pool = state.pool()?;

    let stored = state
        .images
        .store(source, AVATARS_FOLDER)
        .await
        .map_err(|e| {
            tracing::warn!(user_id = %auth.user_id, "Failed to store profile picture: {}", e);
            BackendError::upload_failed("Failed to upload profile picture")
        })?;

    let user = match update_profile_pic(pool, auth.user_id, &stored.url).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            discard(state.images.as_ref(), &stored.url).await;
            return Err(BackendError::user_not_found());
        }
        Err(e) => {
            discard(state.images.as_ref(), &stored.url).await;
            return Err(e.into());
        }
    };

    // The replaced avatar is no longer referenced
    let previous = auth.user.profile_pic.as_str();
    if !previous.is_empty() && previous != user.profile_pic {
        discard(state.images.as_ref(), previous).await;
    }

    tracing::info!(user_id = %user.id, "Profile picture updated");

    Ok(Json(AuthResponse::new(
        "Profile updated successfully",
        user.to_public(),
    )))
}

/// Check authentication handler
///
/// Reaching this handler means the middleware accepted the session.
pub async fn check_auth(AuthUser(auth): AuthUser) -> Json<AuthResponse> {
    Json(AuthResponse::new("User is authenticated", auth.user))
}
