use async_trait::async_trait;
use beacon_core::{ConnectionId, ServerMessage};

/// Трейт, который должна реализовать внешняя система (WebSocket сервер),
/// чтобы хаб мог отправлять сообщения подключениям.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Отправить сообщение конкретному подключению.
    /// Возвращает `false`, если подключения уже нет и сообщение отброшено.
    async fn send(&self, connection: ConnectionId, msg: ServerMessage) -> bool;
}
