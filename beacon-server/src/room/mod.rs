mod connection_state;
mod context;
mod hub;
mod hub_command;
mod pair_room;
mod registry;
mod room_behavior;
mod star_room;

pub use connection_state::*;
pub use context::*;
pub use hub::*;
pub use hub_command::*;
pub use pair_room::*;
pub use registry::*;
pub use room_behavior::*;
pub use star_room::*;
