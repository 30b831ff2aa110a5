//! LLM Provider trait and related types

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Where a provider runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderLocality {
    /// Model served on the evaluating host or local network
    Local,
    /// Hosted API reached over the internet
    Remote,
}

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Provider identifier (e.g., "ollama", "anthropic")
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    pub locality: ProviderLocality,
}

/// Core trait for LLM providers
///
/// The trait is object-safe and used with dynamic dispatch via
/// `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get provider metadata
    fn info(&self) -> ProviderInfo;

    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Check if the provider is reachable and can accept requests
    async fn health_check(&self) -> Result<(), LlmError> {
        // Default implementation: try a minimal completion
        let request = CompletionRequest::new()
            .with_user("ping")
            .with_max_tokens(1);

        self.complete(request).await.map(|_| ())
    }

    /// Get the default model for this provider
    fn default_model(&self) -> &str;
}
