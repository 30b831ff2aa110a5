//! Model backends for model-assisted pattern detection
//!
//! The evaluation engine only depends on [`ModelBackend`], a single
//! text-in/text-out operation. Concrete providers (a local Ollama server or the
//! remote Anthropic API) implement [`LlmProvider`] and are adapted to that
//! capability by [`LlmBackend`], selected from configuration by
//! [`infrastructure::registry`].

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::backend::{GenerationSettings, LlmBackend, call_budget};
pub use infrastructure::prompts;
pub use infrastructure::providers::{
    AnthropicProvider, OllamaProvider, ResilienceConfig, ResilientProvider,
};
pub use infrastructure::registry::{ProviderKind, build_backend, build_provider};
pub use infrastructure::response_parser::{DetectionVerdict, ResponseParser};
