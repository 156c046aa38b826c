//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, health check, static files and layers
//! - **`api_routes`** - API endpoints (auth, messaging, events)
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use pulsechat::backend::routes::create_router;
//! use pulsechat::backend::server::state::AppState;
//! use pulsechat::shared::AppConfig;
//!
//! let app_state = AppState::new(AppConfig::default(), None);
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
