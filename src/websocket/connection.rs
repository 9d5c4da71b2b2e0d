use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::types::WsEvent;

pub type WsSender = mpsc::UnboundedSender<WsEvent>;

/// Maps online users to their live delivery channel. Owned by the
/// connection-handling layer; the delivery pipeline only does point-in-time
/// lookups through it. Absence means offline; nothing is queued or retried.
#[derive(Clone)]
pub struct PresenceRegistry {
    connections: Arc<DashMap<Uuid, WsSender>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Register a user's live channel, replacing any previous one.
    pub fn add_connection(&self, user_id: Uuid, sender: WsSender) {
        self.connections.insert(user_id, sender);
        tracing::info!("User {} connected via WebSocket", user_id);
    }

    /// Drop a user's channel.
    pub fn remove_connection(&self, user_id: &Uuid) {
        self.connections.remove(user_id);
        tracing::info!("User {} disconnected from WebSocket", user_id);
    }

    /// Push an event to a specific user. Returns false when the user has no
    /// active channel or the channel is gone; callers treat that as a
    /// best-effort miss, never an error.
    pub fn send_to_user(&self, user_id: &Uuid, event: WsEvent) -> bool {
        if let Some(sender) = self.connections.get(user_id) {
            sender.send(event).is_ok()
        } else {
            false
        }
    }

    /// Push an event to every connected user.
    pub fn broadcast(&self, event: WsEvent) {
        for entry in self.connections.iter() {
            let _ = entry.value().send(event.clone());
        }
    }

    pub fn is_online(&self, user_id: &Uuid) -> bool {
        self.connections.contains_key(user_id)
    }

    /// Ids of every currently connected user.
    pub fn online_users(&self) -> Vec<Uuid> {
        self.connections.iter().map(|entry| *entry.key()).collect()
    }

    pub fn online_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
