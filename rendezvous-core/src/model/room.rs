use serde::{Deserialize, Serialize};

/// Hard capacity of every room.
pub const MAX_PEERS_PER_ROOM: usize = 4;

/// Public view of a room, as shown in the lobby listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub name: String,
    pub peer_count: usize,
    pub available_slots: usize,
    pub is_private: bool,
    pub password_protected: bool,
}

/// Names accepted by the query-string room creation path: ASCII letters only.
pub fn is_simple_room_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}
