//! Backend Module
//!
//! This module contains all server-side code for PulseChat. It provides an
//! Axum HTTP server with cookie-based authentication, one-to-one messaging,
//! image uploads and real-time delivery over Server-Sent Events.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Signup, login, logout, profile updates, JWT session cookies
//! - **`messaging`** - Sidebar users, conversation history, sending messages
//! - **`uploads`** - Image storage for avatars and chat images
//! - **`realtime`** - Presence registry and the SSE event stream
//! - **`middleware`** - Session cookie verification for protected routes
//! - **`error`** - Backend error type and the JSON error envelope
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── messaging/      - Message handlers and persistence
//! ├── uploads/        - Image storage
//! ├── realtime/       - Presence and event streaming
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share one `AppState`:
//! - The optional PostgreSQL pool (endpoints answer 503 without it)
//! - Session settings (JWT secret, cookie lifetime)
//! - The presence registry, one broadcast channel per online user
//! - The image store
//!
//! # Real-time Delivery
//!
//! A client opens `GET /api/events` after authenticating. While at least one
//! stream is open the user counts as online. Sending a message pushes a
//! `newMessage` event to the receiver's open streams; presence changes push
//! `getOnlineUsers` to everyone.
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsechat::backend::server::create_app;
//! use pulsechat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::default()).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time presence and event streaming
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// One-to-one messaging
pub mod messaging;

/// Image uploads
pub mod uploads;

/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use realtime::{handle_realtime_subscription, PresenceRegistry};
pub use error::BackendError;
