//! Real-time Update Module
//!
//! Presence tracking and live delivery of events to connected users.
//!
//! # Architecture
//!
//! - **`broadcast`** - `PresenceRegistry`: connection counting and per-user channels
//! - **`subscription`** - Server-Sent Events handler
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Presence registry and delivery
//! └── subscription.rs - SSE subscription handler
//! ```
//!
//! # Real-time System
//!
//! The real-time system uses Server-Sent Events (SSE) for one-way
//! communication from server to client. Clients send messages over the
//! regular JSON API and receive pushes over the stream.
//!
//! # Example
//!
//! ```rust
//! use pulsechat::backend::realtime::PresenceRegistry;
//! use pulsechat::shared::RealtimeEvent;
//! use uuid::Uuid;
//!
//! let presence = PresenceRegistry::new();
//! let user = Uuid::new_v4();
//! let _subscription = presence.connect(user);
//! assert_eq!(presence.online_users(), vec![user]);
//! presence.push_to_user(user, RealtimeEvent::online_users(&[user]));
//! ```

/// Presence registry and event delivery
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{PresenceRegistry, Subscription};
pub use subscription::handle_realtime_subscription;
