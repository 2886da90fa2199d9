use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use skillswap_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated user ID. `None` for connections that upgraded without
    /// a valid token; those receive heartbeats but no feed events.
    pub user_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: Option<DbId>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send a message to all connections belonging to a specific user.
    ///
    /// A user may be connected from several tabs or devices; each gets the
    /// message. Returns the number of connections the message was sent to.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.user_id == Some(user_id) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Returns the number of connections pinged so the heartbeat task can
    /// log activity without re-taking the lock.
    pub async fn ping_all(&self) -> usize {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
        conns.len()
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_to_user_targets_only_their_connections() {
        let manager = WsManager::new();
        let mut alice_rx = manager.add("conn-a".to_string(), Some(1)).await;
        let mut bob_rx = manager.add("conn-b".to_string(), Some(2)).await;
        let mut anon_rx = manager.add("conn-c".to_string(), None).await;

        let sent = manager
            .send_to_user(1, Message::Text("hello".to_string().into()))
            .await;
        assert_eq!(sent, 1);

        assert!(alice_rx.try_recv().is_ok());
        assert!(bob_rx.try_recv().is_err());
        assert!(anon_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_closes_and_clears_connections() {
        let manager = WsManager::new();
        let mut rx = manager.add("conn-a".to_string(), Some(1)).await;
        assert_eq!(manager.connection_count().await, 1);

        manager.shutdown_all().await;
        assert_eq!(manager.connection_count().await, 0);
        assert!(matches!(rx.try_recv(), Ok(Message::Close(None))));
    }
}
