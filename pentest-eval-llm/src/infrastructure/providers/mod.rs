use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use tracing::error;

pub mod anthropic;
pub mod ollama;
pub mod resilient;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use resilient::{ResilienceConfig, ResilientProvider};

/// HTTP client with a request timeout, falling back to the default client
pub(crate) fn build_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
            Client::new()
        })
}

/// Seconds from a `retry-after` header, when given as an integer
pub(crate) fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
