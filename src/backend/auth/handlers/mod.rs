//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - User authentication handler
//! ├── logout.rs   - Session removal handler
//! └── profile.rs  - Profile update and auth check handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`logout`** - POST /api/auth/logout
//! - **`update_profile`** - PUT /api/auth/update-profile (protected)
//! - **`check_auth`** - GET /api/auth/check (protected)

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Profile handlers
pub mod profile;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, SignupRequest, StatusResponse, UpdateProfileRequest};

// Re-export handlers
pub use signup::signup;
pub use login::login;
pub use logout::logout;
pub use profile::{check_auth, update_profile};
