use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, ServerMessage};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Исходящие очереди открытых WebSocket соединений.
#[derive(Default)]
pub struct ConnectionTable {
    connections: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.connections.insert(connection, tx);
    }

    pub fn remove(&self, connection: &ConnectionId) {
        self.connections.remove(connection);
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn send_message(&self, connection: ConnectionId, msg: &ServerMessage) -> bool {
        let Some(peer) = self.connections.get(&connection) else {
            warn!(
                "Attempted to send signal to disconnected connection {}",
                connection
            );
            return false;
        };

        match msg.encode() {
            Ok(json) => match peer.send(Message::Text(json.into())) {
                Ok(()) => true,
                Err(e) => {
                    error!("Failed to send WS message to {}: {:?}", connection, e);
                    false
                }
            },
            Err(e) => {
                error!("Failed to serialize signal message: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl SignalingOutput for ConnectionTable {
    async fn send(&self, connection: ConnectionId, msg: ServerMessage) -> bool {
        self.send_message(connection, &msg)
    }
}
