use crate::room::registry::Registry;
use crate::signaling::SignalingOutput;
use beacon_core::{ConnectionId, RoomId, ServerMessage};

/// Контекст обработки входа в комнату: доступ к учёту комнаты и отправке сообщений.
/// Живёт только на время одного события хаба.
pub struct RoomContext<'a> {
    room_id: &'a RoomId,
    registry: &'a mut Registry,
    signaling: &'a dyn SignalingOutput,
}

impl<'a> RoomContext<'a> {
    pub(crate) fn new(
        room_id: &'a RoomId,
        registry: &'a mut Registry,
        signaling: &'a dyn SignalingOutput,
    ) -> Self {
        Self {
            room_id,
            registry,
            signaling,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        self.room_id
    }

    /// Отправить сообщение конкретному подключению.
    pub async fn send(&self, connection: ConnectionId, msg: ServerMessage) -> bool {
        self.signaling.send(connection, msg).await
    }

    pub fn initiator(&self) -> Option<ConnectionId> {
        self.registry.initiator(self.room_id)
    }

    pub fn set_initiator(&mut self, connection: ConnectionId) -> Option<ConnectionId> {
        self.registry.set_initiator(self.room_id, connection)
    }
}
