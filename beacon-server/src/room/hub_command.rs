use crate::room::hub::HubSnapshot;
use beacon_core::{ClientMessage, ConnectionId, RelayPayload, RoomId};
use tokio::sync::oneshot;

/// Команды, поступающие в хаб от транспорта (WebSocket).
#[derive(Debug)]
pub enum HubCommand {
    /// Новое подключение, ещё не вошедшее в комнату.
    Attach { connection: ConnectionId },

    /// Запрос на вход в комнату. `initiator` заявляет клиент, сервер его не проверяет.
    Join {
        connection: ConnectionId,
        room_id: RoomId,
        initiator: bool,
    },

    /// Переслать тело адресату.
    Relay {
        sender: ConnectionId,
        target: ConnectionId,
        payload: RelayPayload,
    },

    /// Явный выход из комнаты, соединение остаётся открытым.
    Leave { connection: ConnectionId },

    /// Сигнал о разрыве WebSocket соединения.
    Disconnect { connection: ConnectionId },

    /// Снимок состояния хаба.
    Snapshot { reply: oneshot::Sender<HubSnapshot> },
}

impl HubCommand {
    pub fn from_client(connection: ConnectionId, msg: ClientMessage) -> Option<Self> {
        match msg {
            ClientMessage::JoinRoom(join) => Some(HubCommand::Join {
                connection,
                room_id: join.room_id,
                initiator: join.init,
            }),
            ClientMessage::LeaveRoom => Some(HubCommand::Leave { connection }),
            relayed => relayed
                .into_relay()
                .map(|(target, payload)| HubCommand::Relay {
                    sender: connection,
                    target,
                    payload,
                }),
        }
    }
}
