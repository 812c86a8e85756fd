use crate::registry::Registry;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Periodically drops rooms that have been idle for longer than `timeout`.
///
/// Runs until the returned handle is aborted.
pub fn spawn_sweeper(registry: Registry, every: Duration, timeout: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Room sweeper started (every {:?}, timeout {:?})",
            every, timeout
        );

        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let now = registry.clock().now();
            let removed = registry.sweep_inactive(timeout.as_secs(), now);
            if removed.is_empty() {
                debug!("Sweep found no inactive rooms ({} live)", registry.len());
            } else {
                info!("Swept {} inactive rooms: {:?}", removed.len(), removed);
            }
        }
    })
}
