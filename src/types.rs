// Shared request/response types and the crate-wide error type

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub messages: Vec<LLMMessage>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMMessage {
    pub role: String, // "user", "assistant", "system"
    pub content: String,
}

impl LLMMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

/// Content returned by the model.
///
/// The upstream message either carries plain text, or (when the text field
/// is absent) whatever structured fields the API attached to the message.
/// The variant is fixed by the client's return contract, so callers never
/// probe the response shape at runtime.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    Text(String),
    Structured(serde_json::Value),
}

impl ResponseContent {
    /// Render the content as response body text. Structured payloads
    /// serialize to their JSON text.
    pub fn into_text(self) -> String {
        match self {
            ResponseContent::Text(text) => text,
            ResponseContent::Structured(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LLMResponse {
    pub content: ResponseContent,
    pub finish_reason: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Processing failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Processing failed: {0}")]
    LLMApi(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Pdf(_) | AppError::LLMApi(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidRequest(_) => tracing::debug!("Client error: {}", self),
            AppError::Pdf(_) | AppError::LLMApi(_) => tracing::error!("Processing error: {}", self),
        }

        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
