//! Request and response bodies of the HTTP signaling API.

use crate::model::error::ErrorKind;
use crate::model::peer::{PeerId, PeerSnapshot};
use crate::model::room::RoomSummary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// STUN/TURN server handed to clients so they can gather candidates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceServersResponse {
    pub ice_servers: Vec<IceServerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    /// Generated by the server when omitted.
    #[serde(default)]
    pub host_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub host_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_name: String,
    pub host_secret: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRoomRequest {
    pub room_name: String,
    pub host_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPeerRequest {
    pub room_name: String,
    #[serde(default)]
    pub peer_id: Option<PeerId>,
    #[serde(default)]
    pub password: Option<String>,
    pub offer_sdp: String,
    pub offer_ice_candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPeerResponse {
    pub peer_id: PeerId,
    pub slot: u8,
    pub peer_secret: String,
}

/// Body shared by the slot lookup and the offer-candidate trickle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub room_name: String,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCandidatesRequest {
    pub room_name: String,
    pub secret: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCandidatesResponse {
    pub slot: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPeersRequest {
    pub room_name: String,
    pub host_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPeersResponse {
    pub peers: BTreeMap<PeerId, PeerSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAnswerRequest {
    pub room_name: String,
    pub peer_id: PeerId,
    pub host_secret: String,
    pub answer_sdp: String,
    pub answer_ice_candidates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAnswerRequest {
    pub room_name: String,
    pub peer_id: PeerId,
    pub peer_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePeerRequest {
    pub room_name: String,
    pub host_secret: String,
    pub peer_id: PeerId,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}
