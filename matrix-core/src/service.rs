//! Fetch-or-serve orchestration over the store and the transport.

use std::collections::HashMap;
use std::sync::Arc;

use shared::{Error, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::{CacheSource, MatrixRequest, MatrixResponse, ServedResponse};
use crate::key::build_key;
use crate::ports::{EntryStore, MatrixTransport};
use crate::ttl::compute_ttl;

/// Orchestrates a request against the store, falling back to the upstream
/// transport on a miss. Explicitly constructed and injected; callers decide
/// the instance scope.
///
/// Concurrent misses for one key are coalesced: the first caller through
/// the per-key gate fetches, later callers re-check the store once the gate
/// opens and find the freshly stored entry.
pub struct MatrixCacheService {
    store: Arc<dyn EntryStore<MatrixResponse>>,
    transport: Arc<dyn MatrixTransport>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MatrixCacheService {
    pub fn new(
        store: Arc<dyn EntryStore<MatrixResponse>>,
        transport: Arc<dyn MatrixTransport>,
    ) -> Self {
        Self {
            store,
            transport,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Serves a request from the store when possible, otherwise fetches
    /// upstream and populates the store. Failures pass through untouched
    /// and are never cached, so the next identical request retries.
    pub async fn serve(&self, request: &MatrixRequest) -> Result<ServedResponse> {
        let key = build_key(request);

        if let Some(data) = self.store.get(&key).await {
            debug!(%key, "cache hit");
            return Ok(ServedResponse::new(data, CacheSource::Hit));
        }

        let gate = self.gate_for(&key).await;
        let _leader = gate.lock().await;

        // A coalesced waiter wakes up here after the leading call resolved
        // and finds whatever it stored.
        if let Some(data) = self.store.get(&key).await {
            debug!(%key, "cache hit after coalesced fetch");
            return Ok(ServedResponse::new(data, CacheSource::Hit));
        }

        debug!(%key, "cache miss, fetching upstream");
        let outcome = self.transport.fetch(request).await;
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                self.clear_gate(&key).await;
                return Err(err);
            }
        };

        // A transport that forwards a provider-rejected payload unmapped
        // still must not populate the store.
        if !response.is_ok() {
            self.clear_gate(&key).await;
            return Err(Error::Provider(response.status));
        }

        let ttl = compute_ttl(&response);
        self.store.set(key.clone(), response.clone(), ttl).await;
        info!(%key, ttl_secs = ttl.as_secs(), "stored fresh matrix response");
        self.clear_gate(&key).await;

        Ok(ServedResponse::new(response, CacheSource::Upstream))
    }

    async fn gate_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        in_flight
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn clear_gate(&self, key: &str) {
        self.in_flight.lock().await.remove(key);
    }
}
