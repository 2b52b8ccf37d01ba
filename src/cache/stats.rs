//! Cache Statistics Module
//!
//! Counts how often requests were served from cache versus the network.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache effectiveness.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered by a valid entry
    pub hits: u64,
    /// Lookups that found nothing or only a stale entry
    pub misses: u64,
    /// Lookups that found a stale entry (subset of misses)
    pub stale: u64,
    /// Requests sent to the transport, failed ones included
    pub network_calls: u64,
    /// Responses written to the cache
    pub stores: u64,
    /// Current number of entries, stale ones included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was looked up.
    ///
    /// Forced reloads skip the lookup and are not part of this ratio.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Stale ==
    /// Counts a miss caused by an expired entry.
    pub fn record_stale(&mut self) {
        self.stale += 1;
        self.misses += 1;
    }

    // == Record Network Call ==
    /// Increments the transport call counter.
    pub fn record_network_call(&mut self) {
        self.network_calls += 1;
    }

    // == Record Store ==
    /// Increments the store counter.
    pub fn record_store(&mut self) {
        self.stores += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
