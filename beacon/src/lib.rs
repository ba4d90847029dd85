pub use beacon_core::model::{ClientMessage, ConnectionId, JoinRequest, RoomId, ServerMessage};

pub mod model {
    pub use beacon_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use beacon_server::*;
}
