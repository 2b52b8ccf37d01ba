//! HTTP Transport
//!
//! `Transport` implementation over a shared `reqwest::Client`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::{Payload, Response, ResponseHandle};
use crate::config::Config;
use crate::error::TransportError;
use crate::transport::{ResponseType, Transport, TransportRequest};

// == HTTP Transport ==
/// Issues GET requests with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Wraps an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client with the configured timeout and user agent.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: TransportRequest) -> Result<Response, TransportError> {
        debug!(address = %request.address, params = request.data.len(), "sending GET");

        let response = self
            .client
            .get(&request.address)
            .query(&request.data)
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response.text().await?;
        let payload = match request.response_type {
            ResponseType::Text => Payload::Text(body),
            ResponseType::Json => Payload::Json(serde_json::from_str(&body)?),
        };

        Ok(Response {
            payload,
            status: status.as_u16(),
            raw_handle: Arc::new(ResponseHandle {
                url,
                status: status.as_u16(),
                headers,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        assert!(HttpTransport::from_config(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_address_is_http_error() {
        let transport = HttpTransport::new(reqwest::Client::new());
        let result = transport.get(TransportRequest::new("not a url")).await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
