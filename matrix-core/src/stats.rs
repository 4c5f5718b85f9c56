use std::fmt::Debug;
use std::sync::Arc;

use tracing::info;

use crate::domain::StoreStats;
use crate::ports::EntryStore;

/// Read-only diagnostics surface over a store, so health checks and
/// operational logging do not depend on the store's representation.
pub struct StatsReporter<V>
where
    V: Debug + Send + Sync + Clone + 'static,
{
    store: Arc<dyn EntryStore<V>>,
}

impl<V> StatsReporter<V>
where
    V: Debug + Send + Sync + Clone + 'static,
{
    pub fn new(store: Arc<dyn EntryStore<V>>) -> Self {
        Self { store }
    }

    /// Snapshots the store's diagnostics and logs them.
    pub async fn report(&self) -> StoreStats {
        let stats = self.store.stats().await;
        info!(
            valid_entries = stats.valid_entries,
            oldest_entry_age_minutes = ?stats.oldest_entry_age_minutes,
            "cache stats",
        );
        stats
    }
}
