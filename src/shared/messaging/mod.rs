//! Messaging Module
//!
//! Data structures for direct messaging:
//!
//! - `ChatMessage` - A message from one user to another
//! - `SendMessageRequest` - Body of the send endpoint
//!
//! # Usage
//!
//! ```rust
//! use pulsechat::shared::messaging::{ChatMessage, SendMessageRequest};
//! ```

pub mod message;

pub use message::{ChatMessage, SendMessageRequest};
