//! Ollama provider (local)
//!
//! Uses the non-streaming `/api/generate` endpoint of an Ollama server.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{build_client, retry_after_secs};
use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderInfo,
    ProviderLocality, StopReason, Usage,
};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Provider for a locally served Ollama model
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: build_client(30),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set HTTP client timeout in seconds
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.client = build_client(seconds);
        self
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn to_ollama_request(&self, request: &CompletionRequest) -> OllamaRequest {
        OllamaRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            prompt: request.flattened_prompt(),
            system: request.system_prompt(),
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                num_predict: request.max_tokens,
            },
        }
    }

    fn parse_ollama_response(response: OllamaResponse) -> CompletionResponse {
        let stop_reason = match response.done_reason.as_deref() {
            Some("stop") => StopReason::EndTurn,
            Some("length") => StopReason::MaxTokens,
            None if response.done => StopReason::EndTurn,
            _ => StopReason::Other,
        };

        CompletionResponse {
            model: response.model,
            text: response.response,
            stop_reason,
            usage: Usage {
                prompt_tokens: response.prompt_eval_count.unwrap_or(0),
                completion_tokens: response.eval_count.unwrap_or(0),
            },
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "ollama",
            name: "Ollama",
            locality: ProviderLocality::Local,
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_ollama_request(&request);

        debug!(model = %body.model, url = %self.base_url, "Sending request to Ollama");

        let response = self
            .client
            .post(self.generate_url())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = retry_after_secs(response.headers());
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Ollama API error: {}", text);
            return Err(LlmError::from_status(status.as_u16(), text, retry_after));
        }

        let parsed: OllamaResponse = response.json().await?;
        Ok(Self::parse_ollama_response(parsed))
    }

    /// Lists local models instead of generating, and checks the configured one is pulled
    async fn health_check(&self) -> Result<(), LlmError> {
        let response = self.client.get(self.tags_url()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_status(status.as_u16(), text, None));
        }

        let tags: OllamaTags = response.json().await?;
        if tags.models.iter().any(|m| m.name == self.model) {
            Ok(())
        } else {
            Err(LlmError::ModelNotFound(format!(
                "{} is not available on {} (run `ollama pull {}`)",
                self.model, self.base_url, self.model
            )))
        }
    }
}

// === Ollama API Types ===

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    done_reason: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}
