mod connection;
mod relay;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use relay::{RelayKind, RelayPayload};
pub use room::RoomId;
pub use signaling::{ClientMessage, DecodeError, JoinRequest, ServerMessage};
