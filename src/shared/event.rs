/**
 * Real-time Event System
 *
 * This module defines the events pushed to connected clients over the
 * event stream: new direct messages and presence updates.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::messaging::ChatMessage;

/// Type of real-time event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    /// A direct message addressed to the subscriber
    #[serde(rename = "newMessage")]
    NewMessage,
    /// The current list of online user ids
    #[serde(rename = "getOnlineUsers")]
    OnlineUsers,
}

impl EventType {
    /// Name used on the wire (the SSE `event:` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::NewMessage => "newMessage",
            EventType::OnlineUsers => "getOnlineUsers",
        }
    }
}

/// Real-time event delivered to subscribers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// Timestamp when event occurred (RFC3339)
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a new-message event carrying the message itself
    pub fn new_message(message: &ChatMessage) -> Result<Self, serde_json::Error> {
        Ok(Self::new(EventType::NewMessage, serde_json::to_value(message)?))
    }

    /// Create a presence event listing online user ids
    pub fn online_users(user_ids: &[Uuid]) -> Self {
        let ids: Vec<String> = user_ids.iter().map(Uuid::to_string).collect();
        Self::new(EventType::OnlineUsers, serde_json::json!(ids))
    }

    /// Serialize only the payload, which is what clients receive as event data
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }
}
