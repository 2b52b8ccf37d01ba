//! Cache Module
//!
//! Provides keyed in-memory response caching with per-entry expiration.

mod entry;
mod key;
mod lifetime;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, Payload, Response, ResponseHandle};
pub use key::CacheKey;
pub use lifetime::{Lifetime, TimeUnit};
pub use stats::CacheStats;
pub use store::CacheStore;
