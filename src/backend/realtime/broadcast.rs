/**
 * Presence Tracking and Event Broadcasting
 *
 * This module tracks which users hold a live event stream and delivers
 * real-time events to them. Each online user owns a
 * `tokio::sync::broadcast` channel; every open stream of that user is a
 * receiver on it.
 *
 * # Presence
 *
 * Connections are counted per user, so several tabs of one user count
 * once. The online list is broadcast to everyone when a user's first
 * connection opens and when their last connection closes.
 *
 * # Delivery
 *
 * Delivery is best effort. Events for an offline user are dropped, and a
 * receiver that falls behind skips what it missed.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::RealtimeEvent;

/// Buffered events per user before slow receivers start lagging
const USER_CHANNEL_CAPACITY: usize = 64;

struct UserChannel {
    connections: usize,
    tx: broadcast::Sender<RealtimeEvent>,
}

#[derive(Default)]
struct PresenceInner {
    users: HashMap<Uuid, UserChannel>,
}

impl PresenceInner {
    fn online_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.users.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Send the current online list to every connection
    fn broadcast_online(&self) {
        let event = RealtimeEvent::online_users(&self.online_ids());
        for channel in self.users.values() {
            let _ = channel.tx.send(event.clone());
        }
    }
}

/// Registry of online users and their event channels
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    inner: Arc<Mutex<PresenceInner>>,
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("online", &self.online_users().len())
            .finish()
    }
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PresenceInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a live connection for a user
    ///
    /// The returned subscription keeps the user online until it is dropped.
    pub fn connect(&self, user_id: Uuid) -> Subscription {
        let mut inner = self.lock();

        let (receiver, first) = match inner.users.get_mut(&user_id) {
            Some(channel) => {
                channel.connections += 1;
                (channel.tx.subscribe(), false)
            }
            None => {
                let (tx, rx) = broadcast::channel(USER_CHANNEL_CAPACITY);
                inner.users.insert(user_id, UserChannel { connections: 1, tx });
                (rx, true)
            }
        };

        if first {
            tracing::info!(user_id = %user_id, online = inner.users.len(), "User connected");
            inner.broadcast_online();
        } else if let Some(channel) = inner.users.get(&user_id) {
            // Another tab; only this user's streams need the current list
            let _ = channel.tx.send(RealtimeEvent::online_users(&inner.online_ids()));
        }

        Subscription {
            receiver,
            _guard: ConnectionGuard {
                registry: self.clone(),
                user_id,
            },
        }
    }

    fn disconnect(&self, user_id: Uuid) {
        let mut inner = self.lock();

        let last = match inner.users.get_mut(&user_id) {
            Some(channel) => {
                channel.connections = channel.connections.saturating_sub(1);
                channel.connections == 0
            }
            None => return,
        };

        if last {
            inner.users.remove(&user_id);
            tracing::info!(user_id = %user_id, online = inner.users.len(), "User disconnected");
            inner.broadcast_online();
        }
    }

    /// Deliver an event to every live connection of a user
    ///
    /// # Returns
    ///
    /// Number of receivers that got the event (0 if the user is offline)
    pub fn push_to_user(&self, user_id: Uuid, event: RealtimeEvent) -> usize {
        let inner = self.lock();
        match inner.users.get(&user_id) {
            Some(channel) => match channel.tx.send(event) {
                Ok(count) => {
                    tracing::debug!(user_id = %user_id, receivers = count, "Event pushed");
                    count
                }
                Err(_) => 0,
            },
            None => {
                tracing::debug!(user_id = %user_id, "User offline, event dropped");
                0
            }
        }
    }

    /// Sorted ids of users with at least one live connection
    pub fn online_users(&self) -> Vec<Uuid> {
        self.lock().online_ids()
    }

    pub fn is_online(&self, user_id: Uuid) -> bool {
        self.lock().users.contains_key(&user_id)
    }
}

/// Marks a user offline again when the connection ends
struct ConnectionGuard {
    registry: PresenceRegistry,
    user_id: Uuid,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.registry.disconnect(self.user_id);
    }
}

/// A live connection's view of its user's events
pub struct Subscription {
    receiver: broadcast::Receiver<RealtimeEvent>,
    _guard: ConnectionGuard,
}

impl Subscription {
    /// Wait for the next event
    ///
    /// Lagged events are skipped. Returns `None` once the channel closes.
    pub async fn recv(&mut self) -> Option<RealtimeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Receiver lagged, skipped {} events", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take an already queued event without waiting
    pub fn try_recv(&mut self) -> Option<RealtimeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}
