//! Periodic expired-entry sweep.
//!
//! Lazy expiry on read already keeps every read path correct; the sweeper
//! only reclaims memory held by entries nobody asks for anymore.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ports::EntryStore;

/// Spawns a background task that sweeps expired entries on an interval.
/// The returned handle can be aborted during shutdown.
pub fn spawn_sweeper<V>(store: Arc<dyn EntryStore<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Debug + Send + Sync + Clone + 'static,
{
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting expiry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = store.sweep_expired().await;
            if removed > 0 {
                info!(removed, "sweeper removed expired entries");
            } else {
                debug!("sweeper found nothing to remove");
            }
        }
    })
}
