use async_trait::async_trait;

use crate::types::{AppResult, LLMRequest, LLMResponse};

/// Seam between the request handler and the upstream inference service.
/// Tests substitute a stub implementation through this trait.
#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}
