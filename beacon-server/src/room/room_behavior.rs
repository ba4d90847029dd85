use crate::room::context::RoomContext;
use async_trait::async_trait;
use beacon_core::ConnectionId;

/// Модель комнаты: что сообщить участникам, когда новое подключение принято в комнату.
#[async_trait]
pub trait RoomBehavior: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Максимум участников в комнате, `None` без ограничения.
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Вызывается после того, как `connection` записан в комнату.
    /// `previous` содержит участников в порядке входа, без самого `connection`.
    async fn on_join(
        &self,
        ctx: &mut RoomContext<'_>,
        connection: ConnectionId,
        previous: Vec<ConnectionId>,
        initiator: bool,
    );
}
