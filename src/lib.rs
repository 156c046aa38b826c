// Increase recursion limit for complex async operations
#![recursion_limit = "256"]

//! PulseChat - Main Library
//!
//! PulseChat is a real-time one-to-one messaging service built with Rust.
//! Users sign up, log in with a cookie-backed session, see who is online,
//! and exchange text and image messages that are pushed live to the
//! recipient.
//!
//! # Overview
//!
//! This library provides the core functionality for PulseChat, including:
//! - Account signup, login, logout and profile pictures
//! - Direct messaging with persisted history
//! - Presence tracking and live delivery over Server-Sent Events
//! - Local image storage for avatars and chat attachments
//!
//! # Module Structure
//!
//! - **`shared`** - Types serialized over the API
//!   - User profiles, chat messages, real-time events
//!   - Input validation and configuration
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routing
//!   - Authentication and session cookies
//!   - Postgres persistence via sqlx
//!   - Presence registry and event streams
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server build (enables backend modules, on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use pulsechat::backend::server::init::create_app;
//! use pulsechat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().build()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Server state is shared through `AppState`, which is cheap to clone.
//! Presence is kept behind a mutex and events fan out through
//! `tokio::sync::broadcast` channels.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`
//! - Every API failure is answered with the same JSON error envelope

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
