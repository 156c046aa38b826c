//! Logout Handler
//!
//! POST /api/auth/logout expires the session cookie. It needs no session,
//! so logging out twice is harmless.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};

use crate::backend::auth::handlers::types::StatusResponse;
use crate::backend::auth::sessions::SessionConfig;
use crate::backend::error::BackendError;

/// Logout handler
pub async fn logout(
    State(sessions): State<SessionConfig>,
) -> Result<impl IntoResponse, BackendError> {
    let cookie = sessions.clear_header()?;
    tracing::info!("Session cookie cleared");

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(StatusResponse {
            success: true,
            message: "Logout successful".to_string(),
        }),
    ))
}
