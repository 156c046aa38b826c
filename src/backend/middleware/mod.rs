//! Middleware Module
//!
//! This module contains HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Cookie session middleware for protecting routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use pulsechat::backend::middleware::auth_middleware;
//!
//! let protected = router.layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
