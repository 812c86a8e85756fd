use axum::Json;
use axum::extract::State;
use rendezvous_core::{CreateRoomRequest, GetPeersRequest, PeerId, PeerState, RemovePeerRequest};
use rendezvous_server::signaling::handlers;

use crate::integration::{create_test_state, init_tracing};
use crate::utils::{add_peer, get_answer, set_answer};

#[tokio::test]
async fn test_alpha_scenario() {
    init_tracing();
    let (state, _) = create_test_state();

    let Json(created) = handlers::create_room(
        State(state.clone()),
        Json(CreateRoomRequest {
            name: "Alpha".into(),
            password: None,
            is_private: false,
            host_secret: Some("h1".into()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(created.host_secret, "h1");

    let joined = add_peer(
        &state,
        rendezvous_core::AddPeerRequest {
            room_name: "Alpha".into(),
            peer_id: None,
            password: None,
            offer_sdp: "sdpA".into(),
            offer_ice_candidates: vec!["c1".into()],
        },
    )
    .await
    .unwrap();
    assert_eq!(joined.slot, 0);
    assert_eq!(joined.peer_id, PeerId::from_slot(0));

    set_answer(&state, "Alpha", "h1", &PeerId::from_slot(0), "sdpB", &["c2"])
        .await
        .unwrap();

    let answer = get_answer(&state, "Alpha", &joined.peer_id, &joined.peer_secret)
        .await
        .unwrap();
    assert_eq!(answer.answer_sdp, "sdpB");
    assert_eq!(answer.answer_ice_candidates, vec!["c2"]);
}

#[tokio::test]
async fn test_host_sees_every_peer_and_can_remove_one() {
    init_tracing();
    let (state, _) = create_test_state();
    let created = crate::utils::create_room(&state, "Lobby", None, false)
        .await
        .unwrap();

    let alice = add_peer(&state, crate::utils::offer("Lobby", Some("alice"), None))
        .await
        .unwrap();
    let bob = add_peer(&state, crate::utils::offer("Lobby", Some("bob"), None))
        .await
        .unwrap();
    set_answer(&state, "Lobby", &created.host_secret, &alice.peer_id, "sdpB", &["c2"])
        .await
        .unwrap();

    let Json(peers) = handlers::get_peers(
        State(state.clone()),
        Json(GetPeersRequest {
            room_name: "Lobby".into(),
            host_secret: created.host_secret.clone(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(peers.peers.len(), 2);
    assert_eq!(peers.peers[&alice.peer_id].state, PeerState::Answered);
    assert_eq!(peers.peers[&bob.peer_id].state, PeerState::Offered);
    assert_eq!(peers.peers[&bob.peer_id].slot, 1);

    handlers::remove_peer(
        State(state.clone()),
        Json(RemovePeerRequest {
            room_name: "Lobby".into(),
            host_secret: created.host_secret.clone(),
            peer_id: alice.peer_id.clone(),
        }),
    )
    .await
    .unwrap();

    let Json(listing) = handlers::list_rooms(State(state.clone())).await;
    assert_eq!(listing.rooms[0].peer_count, 1);
    assert_eq!(listing.rooms[0].available_slots, 3);

    let carol = add_peer(&state, crate::utils::offer("Lobby", Some("carol"), None))
        .await
        .unwrap();
    assert_eq!(carol.slot, alice.slot);
}
