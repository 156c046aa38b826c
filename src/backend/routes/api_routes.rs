/**
 * API Route Handlers
 *
 * This module wires API endpoints to their handlers.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Clear the session cookie
 *
 * ## Authentication (protected)
 * - `PUT /api/auth/update-profile` - Replace the profile picture
 * - `GET /api/auth/check` - Current user
 *
 * ## Messaging (protected)
 * - `GET /api/messages/users` - Sidebar users
 * - `GET /api/messages/{id}` - Conversation with a user
 * - `POST /api/messages/send/{id}` - Send a message
 *
 * ## Real-time (protected)
 * - `GET /api/events` - Server-Sent Events stream
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{check_auth, login, logout, signup, update_profile};
use crate::backend::messaging::{get_messages, get_sidebar_users, send_message};
use crate::backend::middleware::auth_middleware;
use crate::backend::realtime::handle_realtime_subscription;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected routes share one `auth_middleware` layer. It is applied with
/// `route_layer`, so unknown paths still reach the fallback instead of
/// answering 401.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout));

    let protected = Router::new()
        .route("/api/auth/update-profile", put(update_profile))
        .route("/api/auth/check", get(check_auth))
        .route("/api/messages/users", get(get_sidebar_users))
        .route("/api/messages/{id}", get(get_messages))
        .route("/api/messages/send/{id}", post(send_message))
        .route("/api/events", get(handle_realtime_subscription))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(public).merge(protected)
}
