/// WebSocket connection hub
///
/// Tracks every connected session and broadcasts post updates to all of
/// them. The push channel has no per-post subscriptions: every client sees
/// every `postUpdated` event and reconciles its own view.
use feed_events::ServerMessage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Type alias for the per-connection push sender
pub type PushSender = mpsc::UnboundedSender<ServerMessage>;

/// Manages active WebSocket connections
///
/// Thread-safe registry using Arc<RwLock<>> for shared state.
#[derive(Clone)]
pub struct UpdateHub {
    connections: Arc<RwLock<HashMap<u64, PushSender>>>,
    next_id: Arc<AtomicU64>,
}

impl UpdateHub {
    /// Create a new UpdateHub
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Register a connection
    ///
    /// Returns a connection id used for cleanup.
    pub async fn subscribe(&self, sender: PushSender) -> u64 {
        let connection_id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut connections = self.connections.write().await;
        connections.insert(connection_id, sender);

        connection_id
    }

    /// Remove a connection
    pub async fn unsubscribe(&self, connection_id: u64) {
        let mut connections = self.connections.write().await;
        connections.remove(&connection_id);
    }

    /// Push a message to every connected session
    pub async fn broadcast(&self, message: ServerMessage) {
        let connections = self.connections.read().await;

        for sender in connections.values() {
            // Send errors mean the session is already gone; its own
            // cleanup removes the entry
            let _ = sender.send(message.clone());
        }
    }

    /// Number of active connections
    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for UpdateHub {
    fn default() -> Self {
        Self::new()
    }
}
