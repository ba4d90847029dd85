use crate::model::connection::ConnectionId;
use crate::model::relay::RelayPayload;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ошибка разбора входящего кадра. Такие кадры отбрасываются, соединение остаётся открытым.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("room id must not be empty")]
    EmptyRoomId,
    #[error("answer names neither userToSignal nor callerID")]
    MissingAnswerTarget,
}

/// Тело `join_room`. Клиенты парной модели присылают голую строку с номером комнаты,
/// клиенты звезды присылают объект `{roomID, init}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JoinData")]
pub struct JoinRequest {
    #[serde(rename = "roomID")]
    pub room_id: RoomId,
    pub init: bool,
}

impl JoinRequest {
    pub fn new(room_id: impl Into<RoomId>, init: bool) -> Self {
        Self {
            room_id: room_id.into(),
            init,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JoinData {
    Bare(RoomId),
    Full {
        #[serde(rename = "roomID")]
        room_id: RoomId,
        #[serde(default)]
        init: bool,
    },
}

impl From<JoinData> for JoinRequest {
    fn from(data: JoinData) -> Self {
        match data {
            JoinData::Bare(room_id) => Self {
                room_id,
                init: false,
            },
            JoinData::Full { room_id, init } => Self { room_id, init },
        }
    }
}

/// События, которые присылает клиент.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "join_room")]
    JoinRoom(JoinRequest),
    #[serde(rename = "leave_room")]
    LeaveRoom,
    #[serde(rename = "sending_sdp_offer")]
    SdpOffer {
        #[serde(rename = "userToSignal")]
        user_to_signal: ConnectionId,
        #[serde(rename = "callerID", default, skip_serializing_if = "Option::is_none")]
        caller_id: Option<ConnectionId>,
        signal: Value,
    },
    #[serde(rename = "sending_sdp_answer")]
    SdpAnswer {
        #[serde(rename = "userToSignal", default, skip_serializing_if = "Option::is_none")]
        user_to_signal: Option<ConnectionId>,
        #[serde(rename = "callerID", default, skip_serializing_if = "Option::is_none")]
        caller_id: Option<ConnectionId>,
        signal: Value,
    },
    #[serde(rename = "sending_file_MetaData")]
    FileMetaData {
        #[serde(rename = "userToSignal")]
        user_to_signal: ConnectionId,
        #[serde(rename = "callerID", default, skip_serializing_if = "Option::is_none")]
        caller_id: Option<ConnectionId>,
        #[serde(rename = "metaData")]
        meta_data: Value,
    },
    #[serde(rename = "successfully_store_file_MetaData")]
    FileMetaDataStored {
        #[serde(rename = "userToSignal")]
        user_to_signal: ConnectionId,
        #[serde(rename = "callerID", default, skip_serializing_if = "Option::is_none")]
        caller_id: Option<ConnectionId>,
    },
}

impl ClientMessage {
    /// Разбирает текстовый кадр и проверяет обязательные поля.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let msg: ClientMessage = serde_json::from_str(text)?;
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        match self {
            ClientMessage::JoinRoom(join) if join.room_id.is_empty() => {
                Err(DecodeError::EmptyRoomId)
            }
            ClientMessage::SdpAnswer {
                user_to_signal: None,
                caller_id: None,
                ..
            } => Err(DecodeError::MissingAnswerTarget),
            _ => Ok(()),
        }
    }

    /// Адресат и тело для пересылки. `None` для событий, которые ничего не пересылают.
    ///
    /// Ответ адресуется `userToSignal`, а если его нет, то `callerID`.
    /// В остальных событиях `callerID` клиента не используется: отправителя
    /// подставляет сервер.
    pub fn into_relay(self) -> Option<(ConnectionId, RelayPayload)> {
        match self {
            ClientMessage::SdpOffer {
                user_to_signal,
                signal,
                ..
            } => Some((user_to_signal, RelayPayload::Offer { signal })),
            ClientMessage::SdpAnswer {
                user_to_signal,
                caller_id,
                signal,
            } => user_to_signal
                .or(caller_id)
                .map(|target| (target, RelayPayload::Answer { signal })),
            ClientMessage::FileMetaData {
                user_to_signal,
                meta_data,
                ..
            } => Some((user_to_signal, RelayPayload::FileMetaData { meta_data })),
            ClientMessage::FileMetaDataStored { user_to_signal, .. } => {
                Some((user_to_signal, RelayPayload::FileMetaDataAck))
            }
            ClientMessage::JoinRoom(_) | ClientMessage::LeaveRoom => None,
        }
    }
}

/// События, которые сервер отправляет клиенту.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "welcome")]
    Welcome { id: ConnectionId },
    #[serde(rename = "all_peers")]
    AllPeers(Vec<ConnectionId>),
    #[serde(rename = "room full")]
    RoomFull,
    #[serde(rename = "peer_connected")]
    PeerConnected(ConnectionId),
    #[serde(rename = "receive_sdp_offer")]
    SdpOffer {
        signal: Value,
        #[serde(rename = "callerID")]
        caller_id: ConnectionId,
    },
    #[serde(rename = "receive_sdp_answer")]
    SdpAnswer {
        signal: Value,
        id: ConnectionId,
        #[serde(rename = "callerID")]
        caller_id: ConnectionId,
    },
    #[serde(rename = "receive_file_MetaData")]
    FileMetaData {
        #[serde(rename = "metaData")]
        meta_data: Value,
        #[serde(rename = "callerID")]
        caller_id: ConnectionId,
    },
    #[serde(rename = "peer_successfully_store_file_MetaData")]
    FileMetaDataStored {
        #[serde(rename = "callerID")]
        caller_id: ConnectionId,
    },
    #[serde(rename = "user left")]
    UserLeft(ConnectionId),
}

impl ServerMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
