//! HTTP handlers for the signaling API.
//!
//! Each handler resolves the room through the registry, runs one room or
//! registry operation and turns the outcome into JSON.

use crate::error::SignalError;
use crate::room::new_secret;
use crate::signaling::{ApiResult, AppState};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use rendezvous_core::{
    AddPeerRequest, AddPeerResponse, Answer, CreateRoomRequest, CreateRoomResponse,
    DeleteRoomRequest, GetAnswerRequest, GetPeersRequest, GetPeersResponse, IceServersResponse,
    ListRoomsResponse, OfferCandidatesRequest, OfferCandidatesResponse, PeerSnapshot,
    RemovePeerRequest, SetAnswerRequest, SlotRequest, UpdateRoomRequest,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, info};

fn require(value: &str, reason: &'static str) -> Result<(), SignalError> {
    if value.is_empty() {
        Err(SignalError::InvalidInput(reason))
    } else {
        Ok(())
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}

pub async fn ice_servers(State(state): State<AppState>) -> Json<IceServersResponse> {
    Json(IceServersResponse {
        ice_servers: state.ice_servers.as_ref().clone(),
    })
}

pub async fn list_rooms(State(state): State<AppState>) -> Json<ListRoomsResponse> {
    Json(ListRoomsResponse {
        rooms: state.registry.list_public_rooms(),
    })
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> ApiResult<Json<CreateRoomResponse>> {
    require(&req.name, "room name is required")?;

    let host_secret = req
        .host_secret
        .filter(|secret| !secret.is_empty())
        .unwrap_or_else(new_secret);

    state
        .registry
        .create_room(&req.name, &host_secret, req.password, req.is_private)?;
    info!("Created room '{}' (private: {})", req.name, req.is_private);

    Ok(Json(CreateRoomResponse {
        room_id: req.name,
        host_secret,
    }))
}

/// Letters-only creation path driven by the query string, e.g.
/// `?roomId=Alpha&roomPassword=pw&secret=s&private`.
pub async fn create_simple_room(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<CreateRoomResponse>> {
    let room_id = query.get("roomId").cloned().unwrap_or_default();
    let secret = query.get("secret").cloned().unwrap_or_default();
    let password = query.get("roomPassword").cloned();
    let is_private = query.contains_key("private");
    require(&secret, "please specify a secret")?;

    state
        .registry
        .create_simple_room(&room_id, &secret, password, is_private)?;
    info!("Created room '{}' (private: {})", room_id, is_private);

    Ok(Json(CreateRoomResponse {
        room_id,
        host_secret: secret,
    }))
}

pub async fn update_room(
    State(state): State<AppState>,
    Json(req): Json<UpdateRoomRequest>,
) -> ApiResult<StatusCode> {
    require(&req.room_name, "roomName is required")?;

    state
        .registry
        .update_room(&req.room_name, &req.host_secret, req.password, req.is_private)?;
    info!("Updated room '{}'", req.room_name);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_room(
    State(state): State<AppState>,
    Json(req): Json<DeleteRoomRequest>,
) -> ApiResult<StatusCode> {
    require(&req.room_name, "roomName is required")?;

    state
        .registry
        .delete_room(&req.room_name, &req.host_secret)?;
    info!("Deleted room '{}'", req.room_name);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_peer(
    State(state): State<AppState>,
    Json(req): Json<AddPeerRequest>,
) -> ApiResult<Json<AddPeerResponse>> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    let admission = room.admit_peer(
        req.peer_id,
        req.password.as_deref(),
        req.offer_sdp,
        req.offer_ice_candidates,
    )?;
    info!(
        "Peer '{}' joined room '{}' in slot {}",
        admission.peer_id, req.room_name, admission.slot
    );

    Ok(Json(AddPeerResponse {
        peer_id: admission.peer_id,
        slot: admission.slot,
        peer_secret: admission.peer_secret,
    }))
}

pub async fn get_slot(
    State(state): State<AppState>,
    Json(req): Json<SlotRequest>,
) -> ApiResult<Json<PeerSnapshot>> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    let (_, snapshot) = room.find_available_slot(&req.secret)?;

    Ok(Json(snapshot))
}

pub async fn add_offer_candidates(
    State(state): State<AppState>,
    Json(req): Json<OfferCandidatesRequest>,
) -> ApiResult<Json<OfferCandidatesResponse>> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    let count = req.candidates.len();
    let slot = room.record_offer_candidates(&req.secret, req.candidates)?;
    debug!(
        "Appended {} offer candidates to slot {} of room '{}'",
        count, slot, req.room_name
    );

    Ok(Json(OfferCandidatesResponse { slot }))
}

pub async fn get_peers(
    State(state): State<AppState>,
    Json(req): Json<GetPeersRequest>,
) -> ApiResult<Json<GetPeersResponse>> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    let peers = room.list_peers(&req.host_secret)?;

    Ok(Json(GetPeersResponse { peers }))
}

pub async fn set_answer(
    State(state): State<AppState>,
    Json(req): Json<SetAnswerRequest>,
) -> ApiResult<StatusCode> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    room.record_answer(
        &req.host_secret,
        &req.peer_id,
        req.answer_sdp,
        req.answer_ice_candidates,
    )?;
    info!("Host answered peer '{}' in room '{}'", req.peer_id, req.room_name);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_answer(
    State(state): State<AppState>,
    Json(req): Json<GetAnswerRequest>,
) -> ApiResult<Json<Answer>> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    let answer = room.fetch_answer(&req.peer_id, &req.peer_secret)?;

    Ok(Json(answer))
}

pub async fn remove_peer(
    State(state): State<AppState>,
    Json(req): Json<RemovePeerRequest>,
) -> ApiResult<StatusCode> {
    require(&req.room_name, "roomName is required")?;

    let room = state.registry.get_room(&req.room_name)?;
    room.authorize_host(&req.host_secret)?;
    room.remove_peer(&req.peer_id)?;
    info!("Removed peer '{}' from room '{}'", req.peer_id, req.room_name);

    Ok(StatusCode::NO_CONTENT)
}
