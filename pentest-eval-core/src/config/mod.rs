//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PENTEST_EVAL";

/// Provider names accepted in `llm.provider`
pub const KNOWN_PROVIDERS: &[&str] = &["ollama", "local", "anthropic", "claude", "none"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub evaluation: EvaluationConfig,
    pub logging: LoggingConfig,
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Active provider: "ollama", "anthropic" or "none"
    pub provider: String,
    /// Model override (provider default when unset)
    pub model: Option<String>,
    /// Temperature for generation
    pub temperature: f64,
    /// Nucleus sampling
    pub top_p: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,

    /// Anthropic (remote) configuration
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Ollama (local) configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Retry and circuit breaker settings
    #[serde(default)]
    pub resilience: LlmResilienceConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: None,
            temperature: 0.1,
            top_p: 0.9,
            max_tokens: 1000,
            timeout_seconds: 30,
            anthropic: AnthropicConfig::default(),
            ollama: OllamaConfig::default(),
            resilience: LlmResilienceConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Model for the active provider, falling back to the provider default
    pub fn resolved_model(&self) -> String {
        if let Some(model) = self.model.as_ref().filter(|m| !m.is_empty()) {
            return model.clone();
        }
        match self.provider.to_lowercase().as_str() {
            "anthropic" | "claude" => self.anthropic.default_model.clone(),
            _ => self.ollama.default_model.clone(),
        }
    }
}

/// Anthropic Messages API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    /// API key (can also use ANTHROPIC_API_KEY env var)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    /// Model used when `llm.model` is unset
    pub default_model: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com/v1".to_string(),
            api_version: "2023-06-01".to_string(),
            default_model: "claude-sonnet-4-20250514".to_string(),
        }
    }
}

/// Ollama local server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model used when `llm.model` is unset
    pub default_model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            default_model: "llama3.1:latest".to_string(),
        }
    }
}

/// LLM resilience configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmResilienceConfig {
    /// Enable resilience wrapper (circuit breaker + retry)
    pub enabled: bool,
    /// Maximum retry attempts
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_backoff_ms: u64,
    /// Number of failures before circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds before circuit attempts recovery
    pub circuit_breaker_timeout_secs: u64,
}

impl Default for LlmResilienceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            initial_backoff_ms: 500,
            max_backoff_ms: 10_000,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_secs: 60,
        }
    }
}

/// Evaluation engine tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Vulnerabilities evaluated concurrently (1 = strictly sequential)
    pub max_concurrent_vulnerabilities: usize,
    /// Characters of a raw model response kept when it has no REASONING line
    pub reasoning_preview_chars: usize,
    /// Pattern reasonings joined into an indicator's reasoning
    pub max_reasoning_parts: usize,
    /// Run a backend health check before evaluating
    pub check_backend_on_start: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_vulnerabilities: 1,
            reasoning_preview_chars: 300,
            max_reasoning_parts: 3,
            check_backend_on_start: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter (overridden by RUST_LOG)
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.llm.validate()?;
        self.evaluation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file above the defaults
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        builder = builder.add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        // Environment variables last (highest priority)
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}
