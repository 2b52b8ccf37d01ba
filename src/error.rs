//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Transport Error Enum ==
/// Failures raised by a network transport.
///
/// The cache never inspects these; they reach the caller unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, timeout or protocol failure inside the HTTP client
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Body could not be decoded according to the requested response type
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Cache Error Enum ==
/// Unified error type for the response cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Lifetime string could not be parsed
    #[error("Invalid lifetime: {0}")]
    InvalidLifetime(String),

    /// Transport failure, passed through verbatim
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, CacheError>;
