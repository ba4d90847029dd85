use crate::error::RegistryError;
use beacon_core::{ConnectionId, RoomId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Участники комнаты в порядке входа и, для звёздной модели, инициатор комнаты.
#[derive(Debug, Default, Clone)]
pub struct Room {
    members: Vec<ConnectionId>,
    initiator: Option<ConnectionId>,
}

impl Room {
    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    pub fn initiator(&self) -> Option<ConnectionId> {
        self.initiator
    }

    pub fn contains(&self, connection: &ConnectionId) -> bool {
        self.members.contains(connection)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub members: Vec<ConnectionId>,
    pub initiator: Option<ConnectionId>,
}

/// Учёт комнат: комната -> участники и обратный индекс подключение -> комната.
///
/// Оба отображения меняются только вместе, внутри `join` и `leave`.
/// Комнаты создаются при первом входе и не удаляются, пустая комната просто остаётся в таблице.
#[derive(Debug, Default)]
pub struct Registry {
    capacity: Option<usize>,
    rooms: HashMap<RoomId, Room>,
    membership: HashMap<ConnectionId, RoomId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity = None` означает комнаты без ограничения размера.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Добавляет подключение в комнату и возвращает список участников до входа.
    pub fn join(
        &mut self,
        connection: ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, RegistryError> {
        if let Some(current) = self.membership.get(&connection) {
            return Err(RegistryError::AlreadyJoined {
                connection,
                room_id: current.clone(),
            });
        }

        let room = self.rooms.entry(room_id.clone()).or_default();

        if let Some(capacity) = self.capacity.filter(|cap| room.members.len() >= *cap) {
            return Err(RegistryError::RoomFull {
                room_id: room_id.clone(),
                capacity,
            });
        }

        let previous = room.members.clone();
        room.members.push(connection);
        self.membership.insert(connection, room_id.clone());

        Ok(previous)
    }

    /// Убирает подключение из его комнаты. Повторный вызов ничего не делает и возвращает `None`.
    pub fn leave(&mut self, connection: &ConnectionId) -> Option<RoomId> {
        let room_id = self.membership.remove(connection)?;

        if let Some(room) = self.rooms.get_mut(&room_id) {
            room.members.retain(|member| member != connection);
            if room.initiator.as_ref() == Some(connection) {
                room.initiator = None;
            }
        }

        Some(room_id)
    }

    /// Назначает инициатора комнаты и возвращает предыдущего. Последний заявивший побеждает.
    pub fn set_initiator(
        &mut self,
        room_id: &RoomId,
        connection: ConnectionId,
    ) -> Option<ConnectionId> {
        let room = self.rooms.get_mut(room_id)?;
        room.initiator.replace(connection)
    }

    pub fn initiator(&self, room_id: &RoomId) -> Option<ConnectionId> {
        self.rooms.get(room_id).and_then(Room::initiator)
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn room_of(&self, connection: &ConnectionId) -> Option<&RoomId> {
        self.membership.get(connection)
    }

    pub fn snapshot(&self) -> BTreeMap<RoomId, RoomSnapshot> {
        self.rooms
            .iter()
            .map(|(room_id, room)| {
                (
                    room_id.clone(),
                    RoomSnapshot {
                        members: room.members.clone(),
                        initiator: room.initiator,
                    },
                )
            })
            .collect()
    }
}
