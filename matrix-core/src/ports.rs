// Ports are the pluggable seams around the cache core: the bounded store
// implementation lives in storage-engine, the transport belongs to whoever
// talks to the real provider.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use shared::Result;

use crate::domain::{MatrixRequest, MatrixResponse, StoreStats};

/// Port for the bounded, per-entry-TTL store.
///
/// None of these operations fail: a miss is a `None`, not an error, and an
/// expired entry is removed on read and reported as absent.
#[async_trait]
pub trait EntryStore<V>: Send + Sync + 'static
where
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Looks up a key. An expired entry is deleted as a side effect and
    /// reported as absent (lazy expiry).
    async fn get(&self, key: &str) -> Option<V>;

    /// Inserts an entry, evicting the oldest entries first when the store
    /// is at capacity.
    async fn set(&self, key: String, data: V, ttl: Duration);

    /// Removes every expired entry, returning how many were dropped.
    /// Proactive maintenance only; `get` already expires lazily.
    async fn sweep_expired(&self) -> usize;

    /// Drops all entries unconditionally.
    async fn clear(&self);

    /// Read-only diagnostics over the valid entries.
    async fn stats(&self) -> StoreStats;
}

/// Port for the external distance provider. Timeouts, retries, and
/// credential handling all live behind this seam.
#[async_trait]
pub trait MatrixTransport: Send + Sync + 'static {
    async fn fetch(&self, request: &MatrixRequest) -> Result<MatrixResponse>;
}
