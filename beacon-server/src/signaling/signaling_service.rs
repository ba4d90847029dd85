use crate::config::HeartbeatConfig;
use crate::room::{Hub, HubCommand, HubSnapshot, RoomBehavior};
use crate::signaling::ConnectionTable;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, ServerMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::error;

/// Точка входа транспорта в хаб: таблица соединений и канал команд.
#[derive(Clone)]
pub struct SignalingService {
    table: Arc<ConnectionTable>,
    heartbeat: HeartbeatConfig,
    pub(crate) hub_tx: mpsc::Sender<HubCommand>,
}

impl SignalingService {
    pub fn new(hub_tx: mpsc::Sender<HubCommand>, heartbeat: HeartbeatConfig) -> Self {
        Self {
            table: Arc::new(ConnectionTable::new()),
            heartbeat,
            hub_tx,
        }
    }

    /// Создаёт хаб с заданной моделью комнат и запускает его цикл событий.
    pub fn spawn(
        behavior: Box<dyn RoomBehavior>,
        command_buffer: usize,
        heartbeat: HeartbeatConfig,
    ) -> Self {
        let (hub_tx, hub_rx) = mpsc::channel(command_buffer);
        let service = Self::new(hub_tx, heartbeat);

        let hub = Hub::new(behavior, hub_rx, service.table.clone());
        tokio::spawn(hub.run());

        service
    }

    pub fn heartbeat(&self) -> &HeartbeatConfig {
        &self.heartbeat
    }

    pub fn add_connection(&self, connection: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.table.add(connection, tx);
    }

    pub fn remove_connection(&self, connection: &ConnectionId) {
        self.table.remove(connection);
    }

    pub fn send_signal(&self, connection: ConnectionId, msg: ServerMessage) -> bool {
        self.table.send_message(connection, &msg)
    }

    /// Передаёт команду хабу. `false`, если цикл хаба уже завершён.
    pub async fn dispatch(&self, cmd: HubCommand) -> bool {
        if let Err(e) = self.hub_tx.send(cmd).await {
            error!("Hub died: {}", e);
            return false;
        }
        true
    }

    pub async fn snapshot(&self) -> Option<HubSnapshot> {
        let (reply, rx) = oneshot::channel();
        if !self.dispatch(HubCommand::Snapshot { reply }).await {
            return None;
        }
        rx.await.ok()
    }
}
