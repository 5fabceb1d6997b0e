//! Chat entry point: one user message in, updated history out.

use std::sync::Arc;

use tracing::{error, info};

use super::orchestrator::{Orchestrator, ToolLoopOrchestrator};
use super::prompt::SYSTEM_PROMPT;
use crate::config::AgentConfig;
use crate::conversation::{from_agent_reply, History, Turn};
use crate::device::DeviceClient;
use crate::error::AgentError;
use crate::provider;
use crate::tools::{led_tools, Tool};

/// Binds an orchestrator to the system prompt and tool registry.
pub struct ChatSession {
    orchestrator: Arc<dyn Orchestrator>,
    tools: Vec<Arc<dyn Tool>>,
    system_prompt: String,
}

impl ChatSession {
    pub fn new(orchestrator: Arc<dyn Orchestrator>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            orchestrator,
            tools,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    /// Wire up the device client, LED tools and Ollama-backed loop.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let device = DeviceClient::from_config(config)?;
        let provider = provider::create_provider(config)?;
        let orchestrator = ToolLoopOrchestrator::new(provider)
            .with_settings(config.generation.clone())
            .with_max_iterations(config.max_tool_iterations);
        info!(
            api_base = %config.api_base,
            ollama_base = %config.ollama_base,
            model = %config.model,
            "chat session ready"
        );
        Ok(Self::new(Arc::new(orchestrator), led_tools(device)))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Answer `message` in the context of `history`.
    ///
    /// Always returns `history` plus one turn whose assistant slot is filled,
    /// either with the reply or with an error description.
    pub async fn handle_message(
        &self,
        message: impl Into<String>,
        mut history: History,
    ) -> History {
        history.push(Turn::pending(message));

        let reply = match self.reply(&history).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "chat turn failed");
                format!("An error occurred: {e}. Please try again.")
            }
        };

        if let Some(turn) = history.last_mut() {
            turn.assistant = Some(reply);
        }
        history
    }

    async fn reply(&self, history: &History) -> Result<String, AgentError> {
        let messages = history.to_agent_messages().collect();
        let output = self
            .orchestrator
            .invoke(&self.system_prompt, &self.tools, messages)
            .await?;
        from_agent_reply(&output).ok_or(AgentError::EmptyReply)
    }
}
