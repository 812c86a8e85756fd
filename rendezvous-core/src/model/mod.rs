mod error;
mod peer;
mod room;
mod signaling;

pub use error::ErrorKind;
pub use peer::{Answer, PeerId, PeerSnapshot, PeerState};
pub use room::{MAX_PEERS_PER_ROOM, RoomSummary, is_simple_room_name};
pub use signaling::*;
