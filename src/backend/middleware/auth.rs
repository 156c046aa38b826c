/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It reads the session token from the `token`
 * cookie, verifies it, loads the user and hands the profile to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::token_from_headers;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::PublicUser;

/// Authenticated user attached to the request by the middleware
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub user: PublicUser,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Reads the `token` cookie (401 when missing)
/// 2. Verifies signature and expiry (401 when invalid)
/// 3. Loads the user named by the token (404 when gone)
/// 4. Attaches the user to request extensions for use in handlers
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = token_from_headers(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session cookie");
        BackendError::unauthorized("Authentication token is missing.")
    })?;

    let user_id = app_state.sessions.user_id_from_token(&token).ok_or_else(|| {
        tracing::warn!("Rejected session token");
        BackendError::unauthorized("Invalid or expired authentication token.")
    })?;

    let pool = app_state.pool()?;
    let user = get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id = %user_id, "Session for a user that no longer exists");
        BackendError::user_not_found()
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        user: user.to_public(),
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Authentication token is missing.")
            })?;

        Ok(AuthUser(user))
    }
}
