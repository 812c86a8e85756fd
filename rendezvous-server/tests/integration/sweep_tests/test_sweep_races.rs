use rendezvous_core::ErrorKind;
use rendezvous_server::Clock;

use crate::integration::{create_test_state, init_tracing};
use crate::utils::{add_peer, create_room, offer};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_join_racing_sweep_never_lands_in_dropped_room() {
    init_tracing();
    let (state, clock) = create_test_state();

    let names: Vec<String> = (0..32).map(|i| format!("Room{i}")).collect();
    for name in &names {
        create_room(&state, name, None, false).await.unwrap();
    }
    clock.advance(100);

    let joins = names.iter().cloned().map(|name| {
        let state = state.clone();
        tokio::spawn(async move {
            let result = add_peer(&state, offer(&name, None, None)).await;
            (name, result)
        })
    });
    let sweep = {
        let registry = state.registry.clone();
        let now = clock.now();
        tokio::spawn(async move { registry.sweep_inactive(60, now) })
    };

    let results = futures::future::join_all(joins).await;
    let removed = sweep.await.expect("sweep task panicked");

    for joined in results {
        let (name, result) = joined.expect("admission task panicked");
        match result {
            Ok(_) => {
                assert!(!removed.contains(&name), "{name} was swept after a join");
                let room = state.registry.get_room(&name).unwrap();
                assert_eq!(room.peer_count(), 1);
            }
            Err(err) => {
                assert_eq!(err.0.kind(), ErrorKind::NotFound);
                assert!(removed.contains(&name));
                assert!(!state.registry.is_name_taken(&name));
            }
        }
    }
}
