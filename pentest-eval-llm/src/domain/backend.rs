//! Text-in/text-out model capability

use async_trait::async_trait;

use crate::domain::error::LlmError;

/// The single operation the evaluation engine needs from a language model
///
/// Implementations are responsible for their own timeout policy; a call that
/// exceeds it must return [`LlmError::Timeout`] rather than block.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send a prompt and return the raw response text
    async fn evaluate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Check the backend is reachable before an evaluation run
    async fn health_check(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Short description for logs, e.g. `ollama/llama3.1:latest`
    fn describe(&self) -> String;
}
