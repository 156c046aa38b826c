//! Messaging HTTP Handlers
//!
//! This module contains the HTTP handlers for the contacts sidebar and
//! direct messages. All of them sit behind the auth middleware.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::{get_user_by_id, list_other_users};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::uploads::{discard, CHAT_IMAGES_FOLDER};
use crate::shared::messaging::{ChatMessage, SendMessageRequest};
use crate::shared::{RealtimeEvent, UserSummary};

/// Parse a user id path segment
fn parse_user_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| {
        tracing::warn!("Invalid user id in path: {}", raw);
        BackendError::validation_field("id", "Invalid user id")
    })
}

/// List users for the sidebar (GET /api/messages/users)
///
/// # Errors
///
/// * `404 NOT_FOUND` - The caller is the only user
pub async fn get_sidebar_users(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let pool = state.pool()?;
    let users = list_other_users(pool, auth.user_id).await?;

    non_empty_sidebar(users).map(Json)
}

/// An empty contact list is reported as 404
fn non_empty_sidebar(users: Vec<UserSummary>) -> Result<Vec<UserSummary>, BackendError> {
    if users.is_empty() {
        return Err(BackendError::not_found("No users found"));
    }
    Ok(users)
}

/// Get the conversation with another user (GET /api/messages/{id})
pub async fn get_messages(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(other_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let other_id = parse_user_id(&other_id)?;
    let pool = state.pool()?;

    let messages = db::get_conversation(pool, auth.user_id, other_id).await?;
    tracing::debug!(
        user_id = %auth.user_id,
        other_id = %other_id,
        count = messages.len(),
        "Loaded conversation"
    );

    Ok(Json(messages))
}

/// Send a message (POST /api/messages/send/{id})
///
/// The stored message is pushed to the receiver's open event streams.
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Bad id, or neither text nor image
/// * `404 USER_NOT_FOUND` - Receiver does not exist
/// * `400 UPLOAD_FAILED` - Attachment could not be stored
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(receiver_id): Path<String>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    let receiver_id = parse_user_id(&receiver_id)?;
    let Json(request) = payload?;

    if request.text().is_none() && request.image().is_none() {
        return Err(BackendError::validation("Message must contain text or an image"));
    }

    let pool = state.pool()?;

    if get_user_by_id(pool, receiver_id).await?.is_none() {
        tracing::warn!(receiver_id = %receiver_id, "Message to unknown user");
        return Err(BackendError::user_not_found());
    }

    let image_url = match request.image() {
        Some(image) => {
            let stored = state
                .images
                .store(image, CHAT_IMAGES_FOLDER)
                .await
                .map_err(|e| {
                    tracing::warn!("Error uploading image: {}", e);
                    BackendError::upload_failed("Failed to upload image")
                })?;
            Some(stored.url)
        }
        None => None,
    };

    let message = match db::insert_message(
        pool,
        auth.user_id,
        receiver_id,
        request.text().unwrap_or_default(),
        image_url.as_deref(),
    )
    .await
    {
        Ok(message) => message,
        Err(e) => {
            if let Some(url) = &image_url {
                discard(state.images.as_ref(), url).await;
            }
            return Err(e.into());
        }
    };

    let delivered = state
        .presence
        .push_to_user(receiver_id, RealtimeEvent::new_message(&message)?);

    tracing::info!(
        message_id = %message.id,
        sender_id = %auth.user_id,
        receiver_id = %receiver_id,
        delivered,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(message)))
}
