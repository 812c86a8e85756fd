use axum::Json;
use axum::extract::State;
use rendezvous_core::{ErrorKind, GetPeersRequest, PeerId};
use rendezvous_server::signaling::handlers;

use crate::integration::{create_test_state, init_tracing};
use crate::utils::{add_peer, create_room, get_answer, kind_of, offer, set_answer};

#[tokio::test]
async fn test_wrong_secrets_are_unauthorized() {
    init_tracing();
    let (state, _) = create_test_state();
    let created = create_room(&state, "Alpha", None, false).await.unwrap();
    let alice = add_peer(&state, offer("Alpha", Some("alice"), None)).await.unwrap();
    let bob = add_peer(&state, offer("Alpha", Some("bob"), None)).await.unwrap();
    set_answer(&state, "Alpha", &created.host_secret, &alice.peer_id, "sdpB", &["c2"])
        .await
        .unwrap();

    let wrong = ["", "not-a-secret", bob.peer_secret.as_str(), alice.peer_secret.as_str()];

    for secret in wrong {
        assert_eq!(
            kind_of(set_answer(&state, "Alpha", secret, &alice.peer_id, "x", &["y"]).await),
            ErrorKind::Unauthorized
        );

        let result = handlers::get_peers(
            State(state.clone()),
            Json(GetPeersRequest {
                room_name: "Alpha".into(),
                host_secret: secret.to_owned(),
            }),
        )
        .await;
        assert_eq!(kind_of(result), ErrorKind::Unauthorized);
    }

    for secret in ["", "not-a-secret", bob.peer_secret.as_str(), created.host_secret.as_str()] {
        assert_eq!(
            kind_of(get_answer(&state, "Alpha", &alice.peer_id, secret).await),
            ErrorKind::Unauthorized
        );
    }

    let answer = get_answer(&state, "Alpha", &alice.peer_id, &alice.peer_secret)
        .await
        .unwrap();
    assert_eq!(answer.answer_sdp, "sdpB");
}

#[tokio::test]
async fn test_admission_failures() {
    init_tracing();
    let (state, _) = create_test_state();
    create_room(&state, "Locked", Some("pw"), false).await.unwrap();

    assert_eq!(
        kind_of(add_peer(&state, offer("Missing", None, None)).await),
        ErrorKind::NotFound
    );
    assert_eq!(
        kind_of(add_peer(&state, offer("Locked", None, Some("wrong"))).await),
        ErrorKind::Unauthorized
    );

    add_peer(&state, offer("Locked", Some("alice"), Some("pw"))).await.unwrap();
    assert_eq!(
        kind_of(add_peer(&state, offer("Locked", Some("alice"), Some("pw"))).await),
        ErrorKind::AlreadyExists
    );

    for _ in 0..3 {
        add_peer(&state, offer("Locked", None, Some("pw"))).await.unwrap();
    }
    assert_eq!(
        kind_of(add_peer(&state, offer("Locked", None, Some("pw"))).await),
        ErrorKind::CapacityExceeded
    );
}

#[tokio::test]
async fn test_unknown_peer_is_not_found() {
    init_tracing();
    let (state, _) = create_test_state();
    let created = create_room(&state, "Alpha", None, false).await.unwrap();
    let ghost = PeerId::from("ghost");

    assert_eq!(
        kind_of(set_answer(&state, "Alpha", &created.host_secret, &ghost, "x", &["y"]).await),
        ErrorKind::NotFound
    );
    assert_eq!(
        kind_of(get_answer(&state, "Alpha", &ghost, "whatever").await),
        ErrorKind::NotFound
    );
}
