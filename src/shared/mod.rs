//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and its clients. These types are serialized over the JSON API
//! and the Server-Sent Events stream.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. Field names follow the camelCase wire
//! format that browser clients expect.

/// User profile types
pub mod user;

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Input validation helpers
pub mod validation;

/// Application configuration
pub mod config;

/// Direct message types
pub mod messaging;

/// Re-export commonly used types for convenience
pub use user::{PublicUser, UserSummary};
pub use event::{RealtimeEvent, EventType};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment};
pub use messaging::ChatMessage;
