use std::time::Duration;

use rendezvous_server::spawn_sweeper;

use crate::integration::{create_test_state, init_tracing};
use crate::utils::create_room;

#[tokio::test(start_paused = true)]
async fn test_sweeper_removes_idle_rooms_on_schedule() {
    init_tracing();
    let (state, clock) = create_test_state();
    create_room(&state, "Alpha", None, false).await.unwrap();

    let sweeper = spawn_sweeper(
        state.registry.clone(),
        Duration::from_secs(10),
        Duration::from_secs(30),
    );

    clock.advance(20);
    tokio::time::sleep(Duration::from_secs(11)).await;
    tokio::task::yield_now().await;
    assert!(state.registry.is_name_taken("Alpha"));

    clock.advance(20);
    tokio::time::sleep(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;
    assert!(!state.registry.is_name_taken("Alpha"));

    sweeper.abort();
}
