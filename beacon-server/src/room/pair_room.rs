use crate::room::context::RoomContext;
use crate::room::room_behavior::RoomBehavior;
use async_trait::async_trait;
use beacon_core::{ConnectionId, ServerMessage};
use tracing::debug;

pub const DEFAULT_PAIR_CAPACITY: usize = 2;

/// Комната на двоих: новичок получает список тех, кто уже внутри.
/// Остальных участников не уведомляем, новичок сам отправляет offer.
pub struct PairRoom {
    capacity: usize,
}

impl PairRoom {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for PairRoom {
    fn default() -> Self {
        Self::new(DEFAULT_PAIR_CAPACITY)
    }
}

#[async_trait]
impl RoomBehavior for PairRoom {
    fn name(&self) -> &'static str {
        "pair"
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    async fn on_join(
        &self,
        ctx: &mut RoomContext<'_>,
        connection: ConnectionId,
        previous: Vec<ConnectionId>,
        _initiator: bool,
    ) {
        debug!(
            "Sending {} existing peer(s) of '{}' to {}",
            previous.len(),
            ctx.room_id(),
            connection
        );
        ctx.send(connection, ServerMessage::AllPeers(previous)).await;
    }
}
