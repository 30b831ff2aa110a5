//! Provider Registry
//!
//! Selects and builds the configured provider.

use std::sync::Arc;

use pentest_eval_core::config::LlmConfig;
use tracing::info;

use crate::domain::{LlmError, LlmProvider, ModelBackend};
use crate::infrastructure::backend::{GenerationSettings, LlmBackend};
use crate::infrastructure::providers::{
    AnthropicProvider, OllamaProvider, ResilienceConfig, ResilientProvider,
};

/// Provider kind named by `llm.provider`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Ollama,
    Anthropic,
    /// Model-assisted patterns are reported as not configured
    Disabled,
}

impl ProviderKind {
    /// Parse from string
    pub fn parse(s: &str) -> Result<Self, LlmError> {
        match s.trim().to_lowercase().as_str() {
            "ollama" | "local" => Ok(Self::Ollama),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "none" | "disabled" => Ok(Self::Disabled),
            other => Err(LlmError::ProviderNotFound(format!(
                "Unknown provider: {}. Valid options: ollama, anthropic, none",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Anthropic => "anthropic",
            Self::Disabled => "none",
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Build the provider named by configuration, or `None` when disabled
///
/// The provider is wrapped with [`ResilientProvider`] when
/// `llm.resilience.enabled` is set.
pub fn build_provider(config: &LlmConfig) -> Result<Option<Arc<dyn LlmProvider>>, LlmError> {
    let kind = ProviderKind::parse(&config.provider)?;
    let model = config.resolved_model();

    let provider: Arc<dyn LlmProvider> = match kind {
        ProviderKind::Disabled => {
            info!("Model backend disabled; model-assisted patterns will not be evaluated");
            return Ok(None);
        }
        ProviderKind::Ollama => {
            let mut provider = OllamaProvider::new(&model).with_timeout(config.timeout_seconds);
            if !config.ollama.base_url.is_empty() {
                provider = provider.with_base_url(&config.ollama.base_url);
            }
            Arc::new(provider)
        }
        ProviderKind::Anthropic => {
            let api_key = config
                .anthropic
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                .ok_or_else(|| {
                    LlmError::Configuration(
                        "Anthropic API key not configured. Set llm.anthropic.api_key or ANTHROPIC_API_KEY env var".to_string(),
                    )
                })?;

            let mut provider = AnthropicProvider::new(api_key, &model)
                .with_api_version(&config.anthropic.api_version)
                .with_timeout(config.timeout_seconds);
            if !config.anthropic.base_url.is_empty() {
                provider = provider.with_base_url(&config.anthropic.base_url);
            }
            Arc::new(provider)
        }
    };

    info!(provider = kind.as_str(), model = %model, "Configured model backend");

    if config.resilience.enabled {
        let resilience = ResilienceConfig::from(&config.resilience);
        Ok(Some(Arc::new(ResilientProvider::new(provider, resilience))))
    } else {
        Ok(Some(provider))
    }
}

/// Build the text-in/text-out backend used by the evaluation engine
pub fn build_backend(config: &LlmConfig) -> Result<Option<Arc<dyn ModelBackend>>, LlmError> {
    let Some(provider) = build_provider(config)? else {
        return Ok(None);
    };
    let backend = LlmBackend::new(provider, GenerationSettings::from_config(config));
    Ok(Some(Arc::new(backend)))
}
