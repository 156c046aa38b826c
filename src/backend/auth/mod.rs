//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`password`** - bcrypt hashing on the blocking pool
//! - **`sessions`** - JWT tokens and the session cookie
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: User provides email, name and password → User created → cookie set
//! 2. **Login**: User provides email and password → Credentials verified → cookie set
//! 3. **Protected routes**: Cookie verified by the auth middleware → user attached
//! 4. **Logout**: Cookie expired
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs carried in an HttpOnly, SameSite=Strict cookie
//! - Tokens expire after the configured number of days (7 by default)

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{check_auth, login, logout, signup, update_profile};
pub use sessions::SessionConfig;
