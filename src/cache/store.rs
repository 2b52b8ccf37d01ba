//! Cache Store Module
//!
//! Keyed table of stored responses with read-time expiry checks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheKey, CacheStats, Lifetime, Payload, Response, ResponseHandle};
use crate::clock::{Clock, SystemClock};

// == Cache Store ==
/// In-memory response table.
///
/// Stale entries are never evicted on their own; they stay until a later
/// store overwrites them or the whole table is cleared.
pub struct CacheStore {
    /// Stored responses, at most one per key
    entries: HashMap<CacheKey, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
    /// Time source for expiry computation
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    /// Current instant according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // == Fetch ==
    /// Returns the entry stored under `key`, stale or not.
    ///
    /// Pure lookup: no statistics are touched. Checking validity is up to the
    /// caller.
    pub fn fetch(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Fetch Valid ==
    /// Returns a copy of the entry under `key` only while it is still valid.
    ///
    /// Records a hit or a miss. A stale entry is left in place.
    pub fn fetch_valid(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        let now = self.clock.now();

        match self.entries.get(key) {
            Some(entry) if entry.is_valid_at(now) => {
                self.stats.record_hit();
                debug!(key = %key, expires_at = %entry.expires_at, "cache hit");
                Some(entry.clone())
            }
            Some(entry) => {
                self.stats.record_stale();
                debug!(key = %key, expired_at = %entry.expires_at, "cache entry stale");
                None
            }
            None => {
                self.stats.record_miss();
                debug!(key = %key, "cache miss");
                None
            }
        }
    }

    // == Store ==
    /// Stores a response under `key`, valid for `lifetime` from now.
    ///
    /// The expiry is resolved here, so later reads all see the same instant.
    /// Any existing entry under `key` is replaced.
    pub fn store(
        &mut self,
        key: CacheKey,
        lifetime: Lifetime,
        payload: Payload,
        status: u16,
        raw_handle: Arc<ResponseHandle>,
    ) {
        let now = self.clock.now();
        let entry = CacheEntry::new(
            key.clone(),
            now,
            lifetime.as_duration(),
            payload,
            status,
            raw_handle,
        );

        debug!(key = %key, lifetime = %lifetime, expires_at = %entry.expires_at, "cache store");
        self.entries.insert(key, entry);
        self.stats.record_store();
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores a whole response triple.
    pub fn store_response(&mut self, key: CacheKey, lifetime: Lifetime, response: Response) {
        self.store(
            key,
            lifetime,
            response.payload,
            response.status,
            response.raw_handle,
        );
    }

    // == Clear ==
    /// Discards every entry.
    pub fn clear_cache(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        info!("Cache cleared: removed {} entries", removed);
    }

    // == Dump ==
    /// Snapshot of the whole table, for debugging.
    pub fn dump_cache(&self) -> HashMap<CacheKey, CacheEntry> {
        self.entries.clone()
    }

    /// Snapshot as a list ordered by key.
    ///
    /// Each entry carries its full key, so this is the form to serialize.
    pub fn dump_entries(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    // == Record Network Call ==
    /// Counts a request handed to the transport.
    pub fn record_network_call(&mut self) {
        self.stats.record_network_call();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.entries)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
