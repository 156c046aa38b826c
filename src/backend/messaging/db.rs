//! Database operations for messaging
//!
//! This module contains database operations for direct messages.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::messaging::ChatMessage;

/// Persist a new message
///
/// # Arguments
/// * `text` - Message text, empty for image-only messages
/// * `image` - URL of the stored attachment
pub async fn insert_message(
    pool: &PgPool,
    sender_id: Uuid,
    receiver_id: Uuid,
    text: &str,
    image: Option<&str>,
) -> Result<ChatMessage, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO messages (id, sender_id, receiver_id, text, image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, sender_id, receiver_id, text, image, created_at, updated_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(sender_id)
    .bind(receiver_id)
    .bind(text)
    .bind(image)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get every message exchanged between two users, oldest first
pub async fn get_conversation(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, sender_id, receiver_id, text, image, created_at, updated_at
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC, id ASC
        "#
    )
    .bind(user_a)
    .bind(user_b)
    .fetch_all(pool)
    .await
}
