use rendezvous_core::ErrorKind;
use rendezvous_server::Clock;

use crate::integration::{create_test_state, init_tracing};
use crate::utils::{add_peer, create_room, get_answer, kind_of, offer, set_answer};

#[tokio::test]
async fn test_sweep_spares_rooms_touched_in_window() {
    init_tracing();
    let (state, clock) = create_test_state();
    let idle = create_room(&state, "Idle", None, false).await.unwrap();
    let busy = create_room(&state, "Busy", None, false).await.unwrap();

    clock.advance(200);
    let peer = add_peer(&state, offer("Busy", None, None)).await.unwrap();

    clock.advance(200);
    set_answer(&state, "Busy", &busy.host_secret, &peer.peer_id, "sdpB", &["c2"])
        .await
        .unwrap();

    clock.advance(200);
    let removed = state.registry.sweep_inactive(300, clock.now());
    assert_eq!(removed, vec!["Idle"]);

    assert!(state.registry.get_room("Busy").is_ok());
    assert_eq!(
        kind_of(add_peer(&state, offer("Idle", None, None)).await),
        ErrorKind::NotFound
    );
    assert!(!state.registry.is_name_taken("Idle"));

    // the name is free again
    let again = create_room(&state, "Idle", None, false).await.unwrap();
    assert_ne!(again.host_secret, idle.host_secret);
}

#[tokio::test]
async fn test_polling_does_not_keep_room_alive() {
    init_tracing();
    let (state, clock) = create_test_state();
    create_room(&state, "Alpha", None, false).await.unwrap();
    let peer = add_peer(&state, offer("Alpha", None, None)).await.unwrap();

    for _ in 0..10 {
        clock.advance(40);
        let _ = get_answer(&state, "Alpha", &peer.peer_id, &peer.peer_secret).await;
    }

    let removed = state.registry.sweep_inactive(300, clock.now());
    assert_eq!(removed, vec!["Alpha"]);
}
