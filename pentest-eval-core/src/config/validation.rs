//! Configuration validation module

use crate::config::{EvaluationConfig, KNOWN_PROVIDERS, LlmConfig, LoggingConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Evaluation configuration error: {message}")]
    Evaluation { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let provider = self.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(ValidationError::llm(format!(
                "Unknown provider '{}'. Valid options: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("LLM timeout must be > 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "Temperature must be in range 0.0-2.0, got {}",
                self.temperature
            )));
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ValidationError::llm(format!(
                "top_p must be in range 0.0-1.0, got {}",
                self.top_p
            )));
        }

        if self.max_tokens == 0 {
            return Err(ValidationError::llm("max_tokens must be > 0"));
        }

        if self.resilience.enabled && self.resilience.circuit_breaker_threshold == 0 {
            return Err(ValidationError::llm(
                "Circuit breaker threshold must be > 0 when resilience is enabled",
            ));
        }

        Ok(())
    }
}

impl Validate for EvaluationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_concurrent_vulnerabilities == 0 {
            return Err(ValidationError::evaluation(
                "max_concurrent_vulnerabilities must be greater than 0",
            ));
        }

        if self.max_reasoning_parts == 0 {
            return Err(ValidationError::evaluation(
                "max_reasoning_parts must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.to_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}'. Valid options: pretty, json",
                other
            ))),
        }
    }
}
