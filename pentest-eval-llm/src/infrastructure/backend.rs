//! Adapter from an [`LlmProvider`] to the engine-facing [`ModelBackend`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pentest_eval_core::config::LlmConfig;
use tracing::debug;

use crate::domain::{CompletionRequest, LlmError, LlmProvider, ModelBackend};

/// Sampling and limits applied to every pattern prompt
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    /// Upper bound on a single evaluate call, retries included; each
    /// attempt is separately bounded by the provider's HTTP timeout
    pub timeout: Duration,
}

impl GenerationSettings {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.resolved_model(),
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            timeout: call_budget(config),
        }
    }
}

/// Every attempt at the per-request timeout plus the longest backoff between them
pub fn call_budget(config: &LlmConfig) -> Duration {
    let per_attempt = Duration::from_secs(config.timeout_seconds);
    if !config.resilience.enabled {
        return per_attempt;
    }
    let retries = config.resilience.max_retries;
    per_attempt
        .saturating_mul(retries.saturating_add(1))
        .saturating_add(Duration::from_millis(config.resilience.max_backoff_ms).saturating_mul(retries))
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&LlmConfig::default())
    }
}

/// Sends each prompt as a single user message and returns the generated text
pub struct LlmBackend {
    provider: Arc<dyn LlmProvider>,
    settings: GenerationSettings,
}

impl LlmBackend {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    fn request_for(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest::new()
            .with_user(prompt)
            .with_model(&self.settings.model)
            .with_temperature(self.settings.temperature)
            .with_top_p(self.settings.top_p)
            .with_max_tokens(self.settings.max_tokens)
    }
}

#[async_trait]
impl ModelBackend for LlmBackend {
    async fn evaluate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = self.request_for(prompt);

        debug!(
            backend = %self.describe(),
            prompt_chars = prompt.len(),
            "Calling model backend"
        );

        let response = tokio::time::timeout(self.settings.timeout, self.provider.complete(request))
            .await
            .map_err(|_| LlmError::timeout_after(self.settings.timeout))??;

        if response.is_truncated() {
            debug!(backend = %self.describe(), "Model response hit the token limit");
        }

        Ok(response.text)
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        self.provider.health_check().await
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.provider.info().id, self.settings.model)
    }
}
