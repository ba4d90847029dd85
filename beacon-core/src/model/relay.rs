use crate::model::connection::ConnectionId;
use crate::model::signaling::ServerMessage;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayKind {
    Offer,
    Answer,
    FileMetaData,
    FileMetaDataAck,
}

impl RelayKind {
    /// Имя исходящего события, в котором получатель увидит сообщение.
    pub fn event_name(&self) -> &'static str {
        match self {
            RelayKind::Offer => "receive_sdp_offer",
            RelayKind::Answer => "receive_sdp_answer",
            RelayKind::FileMetaData => "receive_file_MetaData",
            RelayKind::FileMetaDataAck => "peer_successfully_store_file_MetaData",
        }
    }
}

impl fmt::Display for RelayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// Непрозрачное тело пересылаемого сообщения. Содержимое не интерпретируется.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayPayload {
    Offer { signal: Value },
    Answer { signal: Value },
    FileMetaData { meta_data: Value },
    FileMetaDataAck,
}

impl RelayPayload {
    pub fn kind(&self) -> RelayKind {
        match self {
            RelayPayload::Offer { .. } => RelayKind::Offer,
            RelayPayload::Answer { .. } => RelayKind::Answer,
            RelayPayload::FileMetaData { .. } => RelayKind::FileMetaData,
            RelayPayload::FileMetaDataAck => RelayKind::FileMetaDataAck,
        }
    }

    /// Упаковывает тело в исходящее событие, добавляя идентификатор отправителя.
    pub fn into_message(self, sender: ConnectionId) -> ServerMessage {
        match self {
            RelayPayload::Offer { signal } => ServerMessage::SdpOffer {
                signal,
                caller_id: sender,
            },
            RelayPayload::Answer { signal } => ServerMessage::SdpAnswer {
                signal,
                id: sender,
                caller_id: sender,
            },
            RelayPayload::FileMetaData { meta_data } => ServerMessage::FileMetaData {
                meta_data,
                caller_id: sender,
            },
            RelayPayload::FileMetaDataAck => ServerMessage::FileMetaDataStored { caller_id: sender },
        }
    }
}
