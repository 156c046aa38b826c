/**
 * Real-time Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/api/events` endpoint. Opening the stream marks the caller online;
 * closing it (or losing the connection) marks them offline again.
 *
 * # Events
 *
 * - `getOnlineUsers` - JSON array of online user ids
 * - `newMessage` - A `ChatMessage` addressed to the caller
 *
 * # Connection Management
 *
 * - Connections are kept alive with SSE comments every 15 seconds
 * - Lagged events are logged but don't cause connection drops
 */

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};

use crate::backend::middleware::AuthUser;
use crate::backend::realtime::broadcast::PresenceRegistry;

/// Interval between keep-alive comments
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Handle real-time subscription (GET /api/events)
///
/// # Returns
///
/// Server-Sent Events stream with presence updates and new messages
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: getOnlineUsers
/// data: ["5f0c...","9a1e..."]
///
/// event: newMessage
/// data: {"_id":"...","senderId":"...","text":"hi",...}
/// ```
pub async fn handle_realtime_subscription(
    State(presence): State<PresenceRegistry>,
    AuthUser(auth): AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!(user_id = %auth.user_id, "[Realtime] Event stream opened");

    let subscription = presence.connect(auth.user_id);

    // The subscription (and with it the presence guard) lives as long as the stream
    let stream = stream::unfold(subscription, |mut subscription| async move {
        loop {
            let event = subscription.recv().await?;

            let data = match event.payload_json() {
                Ok(data) => data,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to serialize event: {:?}", e);
                    continue;
                }
            };

            let sse_event = Event::default().event(event.event_type.as_str()).data(data);
            return Some((Ok(sse_event), subscription));
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL))
}
