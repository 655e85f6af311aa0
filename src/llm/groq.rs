// Groq adapter implementation
// Groq exposes an OpenAI-compatible chat-completions API.
// API Reference: https://console.groq.com/docs/api-reference#chat

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, ResponseContent, TokenUsage};

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Sampling temperature for the analysis call. Moderate, balancing
/// deterministic assessments against phrasing variety in the
/// recommendations.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

pub struct GroqAdapter {
    client: Client,
    api_key: String,
    api_base: String,
}

// Request types for the Groq API
#[derive(Serialize)]
struct GroqChatRequest {
    model: String,
    messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Serialize)]
struct GroqMessage {
    role: String,
    content: String,
}

// Response types for the Groq API
#[derive(Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
    usage: GroqUsage,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: String,
}

// `content` is absent when the model answers with something other than
// text (tool calls, refusals); the remaining fields are kept as-is so the
// caller gets a structured value instead of a lossy stringification.
#[derive(Deserialize)]
struct GroqResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct GroqErrorResponse {
    error: GroqError,
}

#[derive(Deserialize)]
struct GroqError {
    message: String,
    code: Option<String>,
}

impl GroqAdapter {
    pub fn new(api_key: &str) -> Self {
        Self::with_api_base(api_key, GROQ_API_BASE)
    }

    /// Point the adapter at a different endpoint; tests use a local mock.
    pub fn with_api_base(api_key: &str, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LLMAdapter for GroqAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!("{}/chat/completions", self.api_base);

        let groq_request = GroqChatRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| GroqMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&groq_request)
            .send()
            .await
            .map_err(|e| AppError::LLMApi(format!("Groq request failed: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(&error_text) {
                return Err(AppError::LLMApi(format!(
                    "Groq API error ({}): {} (code: {:?})",
                    status, error_response.error.message, error_response.error.code
                )));
            }

            return Err(AppError::LLMApi(format!(
                "Groq API error ({status}): {error_text}"
            )));
        }

        let groq_response: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::LLMApi(format!("Failed to parse Groq response: {e}")))?;

        let choice = groq_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLMApi("Groq returned no choices".to_string()))?;

        let content = match choice.message.content {
            Some(text) => ResponseContent::Text(text),
            None => ResponseContent::Structured(serde_json::Value::Object(choice.message.rest)),
        };

        Ok(LLMResponse {
            content,
            finish_reason: choice.finish_reason,
            usage: TokenUsage {
                prompt_tokens: groq_response.usage.prompt_tokens,
                completion_tokens: groq_response.usage.completion_tokens,
                total_tokens: groq_response.usage.total_tokens,
            },
        })
    }
}

/// Groq-hosted models used by this service.
pub mod models {
    pub const LLAMA_3_3_70B_VERSATILE: &str = "llama-3.3-70b-versatile";

    /// Default analysis model.
    pub const DEFAULT: &str = LLAMA_3_3_70B_VERSATILE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    fn request() -> LLMRequest {
        LLMRequest {
            model: models::DEFAULT.to_string(),
            messages: vec![LLMMessage::user("hello")],
            max_tokens: None,
            temperature: Some(DEFAULT_TEMPERATURE),
        }
    }

    #[tokio::test]
    async fn parses_text_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer gsk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [
                        {"message": {"role": "assistant", "content": "analysis text"}, "finish_reason": "stop"}
                    ],
                    "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
                }"#,
            )
            .create_async()
            .await;

        let adapter = GroqAdapter::with_api_base("gsk-test", &server.url());
        let response = adapter.create_chat_completion(&request()).await.unwrap();

        mock.assert_async().await;
        assert!(matches!(response.content, ResponseContent::Text(ref t) if t == "analysis text"));
        assert_eq!(response.finish_reason, "stop");
        assert_eq!(response.usage.total_tokens, 49);
    }

    #[tokio::test]
    async fn upstream_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#,
            )
            .create_async()
            .await;

        let adapter = GroqAdapter::with_api_base("bad-key", &server.url());
        let err = adapter.create_chat_completion(&request()).await.unwrap_err();

        assert!(err.to_string().contains("Invalid API Key"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [], "usage": {"prompt_tokens": 1, "completion_tokens": 0, "total_tokens": 1}}"#,
            )
            .create_async()
            .await;

        let adapter = GroqAdapter::with_api_base("gsk-test", &server.url());
        let err = adapter.create_chat_completion(&request()).await.unwrap_err();

        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn missing_text_content_falls_back_to_structured() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [
                        {"message": {"role": "assistant", "tool_calls": [{"id": "call_1"}]}, "finish_reason": "tool_calls"}
                    ],
                    "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
                }"#,
            )
            .create_async()
            .await;

        let adapter = GroqAdapter::with_api_base("gsk-test", &server.url());
        let response = adapter.create_chat_completion(&request()).await.unwrap();

        match response.content {
            ResponseContent::Structured(value) => {
                assert!(value.get("tool_calls").is_some());
            }
            ResponseContent::Text(text) => panic!("expected structured content, got {text:?}"),
        }
    }
}
