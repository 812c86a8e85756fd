use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::room::MAX_PEERS_PER_ROOM;

/// Identifies a peer inside a single room.
///
/// Peers either bring their own identifier at admission or are addressed by
/// the decimal index of the slot they were given (`"0"`..`"3"`).
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct PeerId(pub String);

impl PeerId {
    pub fn from_slot(slot: u8) -> Self {
        Self(slot.to_string())
    }

    /// The slot index this identifier addresses, if it is one of the reserved
    /// slot names.
    pub fn slot_index(&self) -> Option<u8> {
        let index: u8 = self.0.parse().ok()?;
        if (index as usize) < MAX_PEERS_PER_ROOM && self.0 == index.to_string() {
            Some(index)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PeerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a peer slot is in the offer/answer hand-off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PeerState {
    /// The peer has posted its offer and waits for the host.
    Offered,
    /// The host has posted an answer for this peer.
    Answered,
}

/// Answer material produced by the room host for one peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub answer_sdp: String,
    pub answer_ice_candidates: Vec<String>,
}

/// Copy of a peer slot as seen by the host. Never carries the peer secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeerSnapshot {
    pub peer_id: PeerId,
    pub slot: u8,
    pub state: PeerState,
    pub offer_sdp: String,
    pub offer_ice_candidates: Vec<String>,
    pub answer_sdp: String,
    pub answer_ice_candidates: Vec<String>,
}
