//! Bounded in-memory store with per-entry TTL.
//!
//! Expiry is lazy: a read that lands on an expired entry deletes it and
//! reports a miss. Capacity is enforced before insertion by evicting the
//! oldest entries in write order, a batch at a time so the cost of the
//! capacity check amortizes.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use matrix_core::domain::StoreStats;
use matrix_core::ports::EntryStore;
use tracing::debug;

struct StoredEntry<V> {
    data: V,
    created_at: Instant,
    ttl: Duration,
    /// Monotonic write sequence; eviction order.
    seq: u64,
}

impl<V> StoredEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) >= self.ttl
    }
}

struct StoreInner<V> {
    entries: HashMap<String, StoredEntry<V>>,
    next_seq: u64,
}

/// Key-to-entry map bounded at `max_entries`, guarded by a single mutex so
/// the evict-then-insert step stays atomic across concurrent writers.
pub struct BoundedTtlStore<V> {
    inner: Mutex<StoreInner<V>>,
    max_entries: usize,
}

impl<V> BoundedTtlStore<V>
where
    V: Debug + Send + Sync + Clone + 'static,
{
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
            max_entries: max_entries.max(1),
        }
    }

    pub fn from_config(config: &shared::config::Config) -> Self {
        Self::new(config.max_entries)
    }

    /// Entries evicted per capacity breach: the oldest ~20%, at least one.
    fn evict_batch_size(&self) -> usize {
        (self.max_entries / 5).max(1)
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner<V>> {
        // A poisoned lock only means some holder panicked; the map itself
        // is still structurally sound, so recover the guard.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn evict_oldest<V>(inner: &mut StoreInner<V>, batch: usize) -> usize {
    let mut by_write_order: Vec<(u64, String)> = inner
        .entries
        .iter()
        .map(|(key, entry)| (entry.seq, key.clone()))
        .collect();
    by_write_order.sort_unstable_by_key(|(seq, _)| *seq);

    let mut removed = 0;
    for (_, key) in by_write_order.into_iter().take(batch) {
        inner.entries.remove(&key);
        removed += 1;
    }
    removed
}

#[async_trait]
impl<V> EntryStore<V> for BoundedTtlStore<V>
where
    V: Debug + Send + Sync + Clone + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.lock();
        let now = Instant::now();

        match inner.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.data.clone()),
            Some(_) => {}
            None => return None,
        }

        inner.entries.remove(key);
        debug!(key, "dropped expired entry on read");
        None
    }

    async fn set(&self, key: String, data: V, ttl: Duration) {
        let mut inner = self.lock();

        if inner.entries.len() >= self.max_entries {
            let evicted = evict_oldest(&mut inner, self.evict_batch_size());
            debug!(evicted, "evicted oldest entries to stay under capacity");
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            key,
            StoredEntry {
                data,
                created_at: Instant::now(),
                ttl,
                seq,
            },
        );
    }

    async fn sweep_expired(&self) -> usize {
        let mut inner = self.lock();
        let now = Instant::now();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired(now));
        before - inner.entries.len()
    }

    async fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        debug!("cache cleared");
    }

    async fn stats(&self) -> StoreStats {
        let inner = self.lock();
        let now = Instant::now();

        let mut valid_entries = 0;
        let mut oldest: Option<Instant> = None;
        for entry in inner.entries.values() {
            if entry.is_expired(now) {
                continue;
            }
            valid_entries += 1;
            oldest = Some(match oldest {
                Some(seen) if seen <= entry.created_at => seen,
                _ => entry.created_at,
            });
        }

        StoreStats {
            valid_entries,
            oldest_entry_age_minutes: oldest.map(|created| now.duration_since(created).as_secs() / 60),
        }
    }
}

impl<V> Debug for BoundedTtlStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedTtlStore")
            .field("max_entries", &self.max_entries)
            .finish()
    }
}
