//! Ollama local provider (OpenAI-compatible).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AgentError;

use super::openai::OpenAiChatProvider;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub struct OllamaProvider {
    inner: OpenAiChatProvider,
}

impl OllamaProvider {
    /// `base_url` is the Ollama server root, e.g. `http://localhost:11434`.
    pub fn new(
        model: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            inner: OpenAiChatProvider::new(
                model,
                String::new(), // no API key for local
                format!("{}/v1", base_url.as_ref().trim_end_matches('/')),
                timeout,
            )?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }
}

#[async_trait]
impl ModelProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        self.inner.generate_text(request).await
    }
}
