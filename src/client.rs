//! Cached Client Module
//!
//! Serves GET requests from the cache while the stored response is valid and
//! from the transport otherwise.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheKey, CacheStats, CacheStore, Lifetime, Payload, Response, ResponseHandle};
use crate::config::Config;
use crate::error::Result;
use crate::transport::{HttpTransport, ResponseType, Transport, TransportRequest};

// == Request Options ==
/// Per-request knobs for [`CachedClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Disambiguates several logical requests to the same address
    pub cache_key: Option<String>,
    /// Validity of a fresh response; the client default when unset
    pub lifetime: Option<Lifetime>,
    /// Skip the cache lookup and always hit the network
    pub force_reload: bool,
    /// Query parameters forwarded to the transport
    pub data: Vec<(String, String)>,
    /// Body decoding hint forwarded to the transport
    pub response_type: ResponseType,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_key(mut self, cache_key: impl Into<String>) -> Self {
        self.cache_key = Some(cache_key.into());
        self
    }

    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    pub fn force_reload(mut self, force_reload: bool) -> Self {
        self.force_reload = force_reload;
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((name.into(), value.into()));
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }
}

// == Cached Client ==
/// Response cache in front of a transport.
///
/// Clones share the same table and transport.
#[derive(Clone)]
pub struct CachedClient {
    /// Shared response table
    store: Arc<RwLock<CacheStore>>,
    /// Network transport
    transport: Arc<dyn Transport>,
    /// Lifetime used when a request sets none
    default_lifetime: Lifetime,
}

impl CachedClient {
    // == Constructors ==
    /// Creates a client with an empty store on the system clock.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_store(transport, CacheStore::new())
    }

    /// Creates a client around an existing store.
    pub fn with_store(transport: Arc<dyn Transport>, store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            transport,
            default_lifetime: Lifetime::default(),
        }
    }

    /// Replaces the lifetime applied to requests without their own.
    pub fn with_default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// Creates a client over an `HttpTransport` built from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::from_config(config)?;
        Ok(Self::new(Arc::new(transport)).with_default_lifetime(config.default_lifetime))
    }

    // == Request ==
    /// Fetches `address`, answering from the cache when possible.
    ///
    /// Unless `force_reload` is set, a valid entry under the combined key is
    /// returned without touching the transport, and the future completes on
    /// its first poll. Otherwise the transport is called and a successful
    /// response is stored before being returned. Transport errors are returned
    /// unchanged and nothing is stored.
    ///
    /// Dropping the future abandons the network call; nothing is stored.
    pub async fn request(&self, address: &str, options: RequestOptions) -> Result<Response> {
        let RequestOptions {
            cache_key,
            lifetime,
            force_reload,
            data,
            response_type,
        } = options;
        let key = CacheKey::new(address, cache_key);

        if !force_reload {
            let cached = self.store.write().await.fetch_valid(&key);
            if let Some(entry) = cached {
                return Ok(entry.response());
            }
        } else {
            debug!(key = %key, "forced reload, bypassing cache");
        }

        let lifetime = lifetime.unwrap_or(self.default_lifetime);
        let request = TransportRequest {
            address: address.to_string(),
            data,
            response_type,
        };

        self.store.write().await.record_network_call();

        // The lock is not held across the network call.
        let response = match self.transport.get(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(key = %key, error = %e, "transport request failed");
                return Err(e.into());
            }
        };

        self.store
            .write()
            .await
            .store_response(key, lifetime, response.clone());

        Ok(response)
    }

    // == Store Delegates ==
    /// Returns a copy of the entry under `key`, stale or not.
    pub async fn fetch(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.store.read().await.fetch(key).cloned()
    }

    /// Stores a response under `key` directly.
    pub async fn store(
        &self,
        key: CacheKey,
        lifetime: Lifetime,
        payload: Payload,
        status: u16,
        raw_handle: Arc<ResponseHandle>,
    ) {
        self.store
            .write()
            .await
            .store(key, lifetime, payload, status, raw_handle);
    }

    /// Discards every cached response.
    pub async fn clear_cache(&self) {
        self.store.write().await.clear_cache();
    }

    /// Snapshot of the whole table, for debugging.
    pub async fn dump_cache(&self) -> HashMap<CacheKey, CacheEntry> {
        self.store.read().await.dump_cache()
    }

    /// Entries ordered by key, each carrying its full key.
    pub async fn dump_entries(&self) -> Vec<CacheEntry> {
        self.store.read().await.dump_entries()
    }

    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}
