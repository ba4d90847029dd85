use crate::error::RegistryError;
use crate::relay::RelayEngine;
use crate::room::connection_state::ConnectionState;
use crate::room::context::RoomContext;
use crate::room::hub_command::HubCommand;
use crate::room::registry::{Registry, RoomSnapshot};
use crate::room::room_behavior::RoomBehavior;
use crate::signaling::SignalingOutput;
use beacon_core::{ConnectionId, RelayPayload, RoomId, ServerMessage};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct HubSnapshot {
    pub model: &'static str,
    pub connections: usize,
    pub rooms: BTreeMap<RoomId, RoomSnapshot>,
}

/// Цикл событий одной модели комнат.
///
/// Хаб единолично владеет учётом комнат и обрабатывает команды по одной,
/// поэтому вход, пересылка и уход не перемешиваются между подключениями.
pub struct Hub {
    behavior: Box<dyn RoomBehavior>,
    registry: Registry,
    connections: HashMap<ConnectionId, ConnectionState>,
    command_rx: mpsc::Receiver<HubCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Hub {
    pub fn new(
        behavior: Box<dyn RoomBehavior>,
        command_rx: mpsc::Receiver<HubCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        let registry = Registry::with_capacity(behavior.capacity());

        Self {
            behavior,
            registry,
            connections: HashMap::new(),
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Hub '{}' event loop started", self.behavior.name());

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!(
            "Command channel closed. Hub '{}' event loop finished",
            self.behavior.name()
        );
    }

    async fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Attach { connection } => {
                debug!("Connection {} attached", connection);
                self.connections
                    .entry(connection)
                    .or_insert(ConnectionState::Unjoined);
            }

            HubCommand::Join {
                connection,
                room_id,
                initiator,
            } => {
                self.handle_join(connection, room_id, initiator).await;
            }

            HubCommand::Relay {
                sender,
                target,
                payload,
            } => {
                self.handle_relay(sender, target, payload).await;
            }

            HubCommand::Leave { connection } => {
                let Some(ConnectionState::Joined) = self.connections.get(&connection) else {
                    debug!("Ignoring leave from {}: not in a room", connection);
                    return;
                };
                self.depart(connection).await;
                self.connections
                    .insert(connection, ConnectionState::Departed);
            }

            HubCommand::Disconnect { connection } => {
                self.depart(connection).await;
                if self.connections.remove(&connection).is_some() {
                    info!("Connection {} disconnected", connection);
                }
            }

            HubCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
        }
    }

    async fn handle_join(&mut self, connection: ConnectionId, room_id: RoomId, initiator: bool) {
        match self.connections.get(&connection) {
            None => {
                warn!("Join to '{}' from unattached connection {}", room_id, connection);
                return;
            }
            Some(ConnectionState::Departed) => {
                warn!(
                    "Connection {} already left its room, ignoring join to '{}'",
                    connection, room_id
                );
                return;
            }
            Some(ConnectionState::Unjoined | ConnectionState::Joined) => {}
        }

        match self.registry.join(connection, &room_id) {
            Ok(previous) => {
                self.connections.insert(connection, ConnectionState::Joined);
                info!(
                    "Connection {} joined '{}' (initiator: {})",
                    connection, room_id, initiator
                );

                let mut ctx =
                    RoomContext::new(&room_id, &mut self.registry, self.signaling.as_ref());
                self.behavior
                    .on_join(&mut ctx, connection, previous, initiator)
                    .await;
            }
            Err(err @ RegistryError::RoomFull { .. }) => {
                info!("Refusing {}: {}", connection, err);
                self.signaling
                    .send(connection, ServerMessage::RoomFull)
                    .await;
            }
            Err(err @ RegistryError::AlreadyJoined { .. }) => {
                warn!("Rejected join to '{}': {}", room_id, err);
            }
        }
    }

    async fn handle_relay(
        &mut self,
        sender: ConnectionId,
        target: ConnectionId,
        payload: RelayPayload,
    ) {
        if !self.connections.contains_key(&sender) {
            warn!(
                "Dropping {} from unattached connection {}",
                payload.kind(),
                sender
            );
            return;
        }

        RelayEngine::new(&self.connections, self.signaling.as_ref())
            .relay(sender, target, payload)
            .await;
    }

    /// Убирает подключение из комнаты и сообщает остальным. Без комнаты ничего не делает.
    async fn depart(&mut self, connection: ConnectionId) {
        let Some(room_id) = self.registry.leave(&connection) else {
            return;
        };

        let notified = RelayEngine::new(&self.connections, self.signaling.as_ref())
            .notify_departure(connection)
            .await;

        info!(
            "Connection {} left '{}', notified {} connection(s)",
            connection, room_id, notified
        );
    }

    fn snapshot(&self) -> HubSnapshot {
        HubSnapshot {
            model: self.behavior.name(),
            connections: self.connections.len(),
            rooms: self.registry.snapshot(),
        }
    }
}
