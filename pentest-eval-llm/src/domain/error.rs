//! Model backend errors

use std::time::Duration;

/// Failure talking to a model provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// Rejected credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {message}{}", retry_hint(.retry_after))]
    RateLimited {
        /// Seconds to wait before retrying, from the `retry-after` header
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown model, or an Ollama model that has not been pulled
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out{}", elapsed_hint(.after))]
    Timeout {
        /// Budget that ran out, when known
        after: Option<Duration>,
    },

    /// 5xx or overloaded
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing API key or invalid provider settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Circuit breaker open for: {circuit}")]
    CircuitOpen { circuit: String },

    #[error("LLM error: {0}")]
    Other(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {}s)", secs))
        .unwrap_or_default()
}

fn elapsed_hint(after: &Option<Duration>) -> String {
    after
        .map(|duration| format!(" after {:?}", duration))
        .unwrap_or_default()
}

impl LlmError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited { .. }
                | LlmError::Network(_)
                | LlmError::Timeout { .. }
                | LlmError::ServiceUnavailable(_)
        )
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after, .. } => retry_after.map(Duration::from_secs),
            _ => None,
        }
    }

    pub fn rate_limited(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimited {
            retry_after,
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::timeout_after(Duration::from_secs(seconds))
    }

    pub fn timeout_after(after: Duration) -> Self {
        Self::Timeout { after: Some(after) }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Map a non-success HTTP status from a provider to an error
    pub fn from_status(status: u16, body: String, retry_after: Option<u64>) -> Self {
        match status {
            429 => LlmError::rate_limited(body, retry_after),
            401 | 403 => LlmError::auth(body),
            404 => LlmError::ModelNotFound(body),
            400 | 413 | 422 => LlmError::InvalidRequest(body),
            s if s >= 500 => LlmError::ServiceUnavailable(format!("HTTP {}: {}", s, body)),
            s => LlmError::InvalidResponse(format!("API error {}: {}", s, body)),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { after: None }
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::InvalidResponse(format!("Malformed response body: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}
