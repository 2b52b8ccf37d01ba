//! xhr_cache - fetch addresses through the response cache
//!
//! Requests every address given on the command line twice and reports
//! whether the second round was served from cache.

use std::time::Instant;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xhr_cache::{CachedClient, Config, RequestOptions};

/// Entry point for the demo binary.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cached client over the HTTP transport
/// 4. Request each address twice, then dump the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xhr_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        bail!("usage: xhr_cache <address>...");
    }

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_lifetime={}, http_timeout={}s, user_agent={}",
        config.default_lifetime, config.http_timeout, config.user_agent
    );

    let client = CachedClient::from_config(&config).context("failed to build HTTP client")?;

    for round in 1..=2 {
        for address in &addresses {
            let started = Instant::now();
            let response = client
                .request(address, RequestOptions::new())
                .await
                .with_context(|| format!("request to {} failed", address))?;
            info!(
                round,
                address = %address,
                status = response.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "response received"
            );
        }
    }

    let stats = client.stats().await;
    info!(
        "Cache stats: hits={}, misses={}, network_calls={}, stores={}, entries={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.network_calls,
        stats.stores,
        stats.total_entries,
        stats.hit_rate()
    );

    for (key, entry) in client.dump_cache().await {
        info!(key = %key, expires_at = %entry.expires_at, status = entry.status, "cached");
    }

    Ok(())
}
