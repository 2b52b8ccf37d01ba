//! xhr_cache - A keyed response cache for HTTP GET requests
//!
//! Serves repeated requests from memory until their lifetime elapses and
//! delegates to a network transport otherwise.

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod transport;

pub use cache::{CacheEntry, CacheKey, CacheStore, Lifetime, Payload, Response, TimeUnit};
pub use client::{CachedClient, RequestOptions};
pub use config::Config;
pub use error::{CacheError, Result, TransportError};
