use crate::room::context::RoomContext;
use crate::room::room_behavior::RoomBehavior;
use async_trait::async_trait;
use beacon_core::{ConnectionId, ServerMessage};
use tracing::{info, warn};

/// Комната-звезда: инициатор узнаёт о каждом новом участнике и сам ведёт согласование.
/// Новичкам список участников не отправляется.
#[derive(Default)]
pub struct StarRoom;

#[async_trait]
impl RoomBehavior for StarRoom {
    fn name(&self) -> &'static str {
        "star"
    }

    async fn on_join(
        &self,
        ctx: &mut RoomContext<'_>,
        connection: ConnectionId,
        _previous: Vec<ConnectionId>,
        initiator: bool,
    ) {
        if initiator {
            if let Some(replaced) = ctx.set_initiator(connection) {
                info!(
                    "Initiator of '{}' changed from {} to {}",
                    ctx.room_id(),
                    replaced,
                    connection
                );
            } else {
                info!("{} is the initiator of '{}'", connection, ctx.room_id());
            }
            return;
        }

        let Some(initiator) = ctx.initiator() else {
            warn!(
                "No initiator in '{}' to announce {} to",
                ctx.room_id(),
                connection
            );
            return;
        };

        ctx.send(initiator, ServerMessage::PeerConnected(connection))
            .await;
    }
}
