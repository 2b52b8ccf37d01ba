//! Transport Module
//!
//! The network seam the cache sits in front of.
//!
//! # Implementations
//! - `HttpTransport`: GET over reqwest

mod http;

use async_trait::async_trait;

use crate::cache::Response;
use crate::error::TransportError;

pub use http::HttpTransport;

// == Response Type ==
/// How the transport should decode the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    #[default]
    Text,
    Json,
}

// == Transport Request ==
/// A GET request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Address to fetch
    pub address: String,
    /// Query parameters appended to the address
    pub data: Vec<(String, String)>,
    /// Body decoding hint
    pub response_type: ResponseType,
}

impl TransportRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            data: Vec::new(),
            response_type: ResponseType::default(),
        }
    }
}

// == Transport Trait ==
/// HTTP GET-capable client.
///
/// Implementations return `Ok` only for successful (2xx) responses; every
/// other outcome is an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the request.
    async fn get(&self, request: TransportRequest) -> Result<Response, TransportError>;
}
