//! Configuration Module
//!
//! Loads cache and transport settings from environment variables.

use std::env;

use crate::cache::Lifetime;

/// Default user agent sent by the HTTP transport.
pub const DEFAULT_USER_AGENT: &str = concat!("xhr_cache/", env!("CARGO_PKG_VERSION"));

/// Cache and transport configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime applied to requests that do not set their own
    pub default_lifetime: Lifetime,
    /// HTTP client timeout in seconds
    pub http_timeout: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `XHR_CACHE_DEFAULT_LIFETIME` - Lifetime such as `5 minutes` (default: 5 minutes)
    /// - `XHR_CACHE_HTTP_TIMEOUT` - Transport timeout in seconds (default: 30)
    /// - `XHR_CACHE_USER_AGENT` - User agent header (default: `xhr_cache/<version>`)
    pub fn from_env() -> Self {
        Self {
            default_lifetime: env::var("XHR_CACHE_DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            http_timeout: env::var("XHR_CACHE_HTTP_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            user_agent: env::var("XHR_CACHE_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::default(),
            http_timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
