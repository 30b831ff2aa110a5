//! Resilient LLM provider wrapper
//!
//! Adds circuit breaker and retry logic around any `Arc<dyn LlmProvider>`.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use pentest_eval_core::config::LlmResilienceConfig;

use crate::domain::{CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo};

/// Resilience configuration for LLM providers
#[derive(Debug, Clone)]
pub struct ResilienceConfig {
    /// Maximum number of retries for transient errors
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,
    /// Number of failures before circuit opens
    pub circuit_breaker_threshold: u32,
    /// Time in seconds before circuit attempts to close
    pub circuit_breaker_timeout_secs: u64,
    /// Maximum requests allowed in half-open state
    pub half_open_max_requests: u32,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self::from(&LlmResilienceConfig::default())
    }
}

impl From<&LlmResilienceConfig> for ResilienceConfig {
    fn from(config: &LlmResilienceConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
            circuit_breaker_threshold: config.circuit_breaker_threshold,
            circuit_breaker_timeout_secs: config.circuit_breaker_timeout_secs,
            half_open_max_requests: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct CircuitBreakerState {
    state: CircuitState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    half_open_requests: u32,
    /// When the current trial window started; a caller that is dropped
    /// mid-call never reports back, so a stale window is reopened
    half_open_since: Option<Instant>,
}

/// Wraps a provider with a circuit breaker and retry with exponential backoff
///
/// Only errors for which [`LlmError::is_retryable`] holds are retried; a
/// rate-limit `retry-after` shorter than the backoff cap replaces the next delay.
pub struct ResilientProvider {
    inner: Arc<dyn LlmProvider>,
    config: ResilienceConfig,
    circuit_state: Mutex<CircuitBreakerState>,
}

impl ResilientProvider {
    pub fn new(provider: Arc<dyn LlmProvider>, config: ResilienceConfig) -> Self {
        Self {
            inner: provider,
            config,
            circuit_state: Mutex::new(CircuitBreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                last_failure_time: None,
                half_open_requests: 0,
                half_open_since: None,
            }),
        }
    }

    pub fn with_defaults(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, ResilienceConfig::default())
    }

    fn circuit_open(&self) -> LlmError {
        LlmError::CircuitOpen {
            circuit: self.inner.info().id.to_string(),
        }
    }

    async fn can_execute(&self) -> Result<(), LlmError> {
        let mut state = self.circuit_state.lock().await;
        let cooldown = Duration::from_secs(self.config.circuit_breaker_timeout_secs);

        match state.state {
            CircuitState::Closed => Ok(()),
            CircuitState::Open => {
                let cooled_down = state
                    .last_failure_time
                    .is_some_and(|last| last.elapsed() >= cooldown);
                if cooled_down {
                    debug!("Circuit breaker transitioning to half-open");
                    state.state = CircuitState::HalfOpen;
                    state.half_open_requests = 1;
                    state.half_open_since = Some(Instant::now());
                    Ok(())
                } else {
                    Err(self.circuit_open())
                }
            }
            CircuitState::HalfOpen => {
                if state.half_open_requests < self.config.half_open_max_requests {
                    state.half_open_requests += 1;
                    Ok(())
                } else if state
                    .half_open_since
                    .is_none_or(|since| since.elapsed() >= cooldown)
                {
                    debug!("Half-open trial never reported back, starting a new one");
                    state.half_open_requests = 1;
                    state.half_open_since = Some(Instant::now());
                    Ok(())
                } else {
                    Err(self.circuit_open())
                }
            }
        }
    }

    async fn on_success(&self) {
        let mut state = self.circuit_state.lock().await;

        if state.state == CircuitState::HalfOpen {
            debug!("Circuit breaker closing after successful request in half-open state");
        }
        state.state = CircuitState::Closed;
        state.failure_count = 0;
        state.half_open_requests = 0;
        state.half_open_since = None;
    }

    async fn on_failure(&self) {
        let mut state = self.circuit_state.lock().await;

        state.failure_count += 1;
        state.last_failure_time = Some(Instant::now());

        match state.state {
            CircuitState::Closed => {
                if state.failure_count >= self.config.circuit_breaker_threshold {
                    warn!(
                        provider = self.inner.info().id,
                        failures = state.failure_count,
                        threshold = self.config.circuit_breaker_threshold,
                        "Circuit breaker opening due to failures"
                    );
                    state.state = CircuitState::Open;
                }
            }
            CircuitState::HalfOpen => {
                debug!("Circuit breaker reopening after failure in half-open state");
                state.state = CircuitState::Open;
                state.half_open_requests = 0;
                state.half_open_since = None;
            }
            CircuitState::Open => {}
        }
    }

    async fn execute_with_retry(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let mut backoff = self.config.initial_backoff_ms;
        let mut attempt = 0;

        loop {
            match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() || attempt >= self.config.max_retries => {
                    return Err(e);
                }
                Err(e) => {
                    if let Some(retry_after) = e.retry_after()
                        && retry_after.as_millis() < self.config.max_backoff_ms as u128
                    {
                        backoff = retry_after.as_millis() as u64;
                    }

                    attempt += 1;
                    debug!(
                        attempt,
                        backoff_ms = backoff,
                        error = %e,
                        "Retrying LLM request"
                    );
                    sleep(Duration::from_millis(backoff)).await;

                    backoff = std::cmp::min(
                        backoff.saturating_mul(2) + rand_jitter(backoff / 4),
                        self.config.max_backoff_ms,
                    );
                }
            }
        }
    }
}

/// Spread concurrent retries apart
fn rand_jitter(max: u64) -> u64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    (nanos as u64) % max.max(1)
}

#[async_trait]
impl LlmProvider for ResilientProvider {
    fn info(&self) -> ProviderInfo {
        self.inner.info()
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.can_execute().await?;

        match self.execute_with_retry(request).await {
            Ok(response) => {
                self.on_success().await;
                Ok(response)
            }
            Err(e) => {
                self.on_failure().await;
                Err(e)
            }
        }
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        self.inner.health_check().await
    }
}
