//! Cache Key Module
//!
//! Composite request identity: an address plus an optional disambiguator.

use std::fmt;

use serde::Serialize;

// == Cache Key ==
/// Identifies one logical request.
///
/// Both parts take part in equality, so `("a::b", None)` and `("a", Some("b"))`
/// are distinct keys even though they render the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CacheKey {
    /// Request address
    pub address: String,
    /// Caller-supplied disambiguator for several logical requests to one address
    pub disambiguator: Option<String>,
}

impl CacheKey {
    /// Creates a key for `address`, optionally disambiguated.
    pub fn new(address: impl Into<String>, disambiguator: Option<String>) -> Self {
        Self {
            address: address.into(),
            disambiguator,
        }
    }

    /// Creates a key for a bare address.
    pub fn address(address: impl Into<String>) -> Self {
        Self::new(address, None)
    }

    /// Creates a key for `address` disambiguated by `cache_key`.
    pub fn with_disambiguator(address: impl Into<String>, cache_key: impl Into<String>) -> Self {
        Self::new(address, Some(cache_key.into()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.disambiguator {
            Some(d) => write!(f, "{}::{}", self.address, d),
            None => f.write_str(&self.address),
        }
    }
}
