//! Provider-agnostic LLM domain types

pub mod backend;
pub mod error;
pub mod messages;
pub mod provider;

pub use backend::ModelBackend;
pub use error::LlmError;
pub use messages::{CompletionRequest, CompletionResponse, Message, Role, StopReason, Usage};
pub use provider::{LlmProvider, ProviderInfo, ProviderLocality};
