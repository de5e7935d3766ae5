//! Periodic TTL eviction.

use std::sync::Arc;
use std::time::Duration;

use sixhats_core::{SessionStore, METRICS};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Spawn a task that calls [`SessionStore::cleanup_expired`] every `every`.
///
/// The first sweep happens one full interval after start.
pub fn spawn_sweeper(store: Arc<SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let evicted = store.cleanup_expired();
            debug!(evicted, remaining = store.len(), "session sweep");
            if evicted > 0 {
                METRICS.flush();
            }
        }
    })
}
