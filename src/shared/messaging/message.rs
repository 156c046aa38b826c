//! Chat Message Data Structure
//!
//! Represents a direct message between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a direct message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct ChatMessage {
    /// Unique message ID
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// User the message is addressed to
    pub receiver_id: Uuid,
    /// Message text, empty for image-only messages
    #[serde(default)]
    pub text: String,
    /// URL of the attached image, if any
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the current time
    pub fn new(sender_id: Uuid, receiver_id: Uuid, text: String, image: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            text,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this message belongs to the conversation between two users
    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Request body for sending a message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Image as a data URI or an already hosted URL
    #[serde(default)]
    pub image: Option<String>,
}

impl SendMessageRequest {
    /// Trimmed-empty text counts as absent
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }
}
