//! Model provider trait and implementations.

pub mod format;
pub mod http;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::types::{message::AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

pub use ollama::OllamaProvider;
pub use openai::OpenAiChatProvider;

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "ollama").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate one assistant turn (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, AgentError>;
}

/// Create the configured provider (Ollama).
pub fn create_provider(config: &AgentConfig) -> Result<Box<dyn ModelProvider>, AgentError> {
    if config.model.trim().is_empty() {
        return Err(AgentError::Configuration("Missing OLLAMA_MODEL".into()));
    }
    Ok(Box::new(OllamaProvider::new(
        config.model.clone(),
        config.ollama_base.clone(),
        config.llm_timeout,
    )?))
}
