//! Integration tests for OllamaProvider using wiremock

use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pentest_eval_llm::domain::{CompletionRequest, LlmError, LlmProvider};
use pentest_eval_llm::OllamaProvider;

fn provider_for(server: &MockServer, model: &str) -> OllamaProvider {
    OllamaProvider::new(model)
        .with_base_url(server.uri())
        .with_timeout(5)
}

#[tokio::test]
async fn test_ollama_generate_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama3.1:latest",
            "prompt": "find the shell",
            "stream": false,
            "options": { "temperature": 0.1, "top_p": 0.9 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "llama3.1:latest",
            "created_at": "2024-06-01T10:00:00Z",
            "response": "DETECTED: NO\nREASONING: no shell prompt",
            "done": true,
            "done_reason": "stop",
            "prompt_eval_count": 300,
            "eval_count": 9
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = CompletionRequest::new()
        .with_user("find the shell")
        .with_temperature(0.1)
        .with_top_p(0.9);

    let response = provider_for(&mock_server, "llama3.1:latest")
        .complete(request)
        .await
        .unwrap();

    assert_eq!(response.text, "DETECTED: NO\nREASONING: no shell prompt");
    assert_eq!(response.usage.prompt_tokens, 300);
}

#[tokio::test]
async fn test_ollama_model_not_pulled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"model 'mistral' not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, "mistral")
        .complete(CompletionRequest::new().with_user("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ModelNotFound(_)));
}

#[tokio::test]
async fn test_ollama_server_error_is_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, "llama3")
        .complete(CompletionRequest::new().with_user("x"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_ollama_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let err = provider_for(&mock_server, "llama3")
        .with_timeout(1)
        .complete(CompletionRequest::new().with_user("x"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Timeout { .. }));
}

#[tokio::test]
async fn test_ollama_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                { "name": "llama3.1:latest", "size": 4661224676u64 },
                { "name": "mistral:7b" }
            ]
        })))
        .mount(&mock_server)
        .await;

    assert!(provider_for(&mock_server, "llama3.1:latest")
        .health_check()
        .await
        .is_ok());

    let err = provider_for(&mock_server, "qwen2:7b")
        .health_check()
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ModelNotFound(ref msg) if msg.contains("ollama pull qwen2:7b")));
}
