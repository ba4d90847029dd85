use beacon_core::{ConnectionId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("room '{room_id}' is full ({capacity} members)")]
    RoomFull { room_id: RoomId, capacity: usize },
    #[error("connection {connection} is already in room '{room_id}'")]
    AlreadyJoined {
        connection: ConnectionId,
        room_id: RoomId,
    },
}
