use std::sync::Arc;

use crate::config::Config;
use crate::llm::provider::LLMAdapter;

/// Shared application state, assembled once at startup and cloned into each
/// handler. Everything here is read-only after construction, so concurrent
/// requests share it without coordination.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LLMAdapter>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
