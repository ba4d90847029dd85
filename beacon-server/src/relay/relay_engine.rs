use crate::room::ConnectionState;
use crate::signaling::SignalingOutput;
use beacon_core::{ConnectionId, RelayPayload, ServerMessage};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Пересылка сигнальных сообщений между подключениями одного хаба.
pub struct RelayEngine<'a> {
    connections: &'a HashMap<ConnectionId, ConnectionState>,
    signaling: &'a dyn SignalingOutput,
}

impl<'a> RelayEngine<'a> {
    pub fn new(
        connections: &'a HashMap<ConnectionId, ConnectionState>,
        signaling: &'a dyn SignalingOutput,
    ) -> Self {
        Self {
            connections,
            signaling,
        }
    }

    /// Передаёт тело ровно одному адресату, подставляя отправителя.
    /// Если адресат не подключён, сообщение отбрасывается; отправитель об этом не узнаёт.
    pub async fn relay(
        &self,
        sender: ConnectionId,
        target: ConnectionId,
        payload: RelayPayload,
    ) -> bool {
        let kind = payload.kind();

        if !self.connections.contains_key(&target) {
            warn!(
                "Dropping {} from {}: target {} is not attached",
                kind, sender, target
            );
            return false;
        }

        let delivered = self
            .signaling
            .send(target, payload.into_message(sender))
            .await;

        if delivered {
            debug!("Relayed {} from {} to {}", kind, sender, target);
        }
        delivered
    }

    /// Рассылает уведомление об уходе всем остальным подключениям хаба, не только комнате.
    pub async fn notify_departure(&self, departed: ConnectionId) -> usize {
        let mut notified = 0;

        for connection in self.connections.keys().filter(|c| **c != departed) {
            if self
                .signaling
                .send(*connection, ServerMessage::UserLeft(departed))
                .await
            {
                notified += 1;
            }
        }

        notified
    }
}
