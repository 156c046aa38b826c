//! Messaging Module
//!
//! This module handles the contacts sidebar and direct messages.
//!
//! - **`db`** - Message persistence
//! - **`handlers`** - HTTP handlers under `/api/messages`

pub mod handlers;
pub mod db;

pub use handlers::{get_messages, get_sidebar_users, send_message};
