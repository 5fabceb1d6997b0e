//! Shared test helpers: mock provider and canned orchestrators.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use micky::agent::Orchestrator;
use micky::error::AgentError;
use micky::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use micky::tools::Tool;
use micky::types::*;

/// A mock provider that returns queued responses in order and records
/// every request it sees.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    /// Queue an arbitrary response.
    pub fn queue(&self, response: ProviderResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderResponse {
                text: "Mock response".to_string(),
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            });
        }
        Ok(responses.remove(0))
    }
}

/// Orchestrator that echoes a fixed reply and records what it was given.
#[derive(Default)]
pub struct ScriptedOrchestrator {
    pub reply: String,
    pub seen: Mutex<Vec<(String, Vec<String>, Vec<ModelMessage>)>>,
}

impl ScriptedOrchestrator {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Orchestrator for ScriptedOrchestrator {
    async fn invoke(
        &self,
        system_prompt: &str,
        tools: &[Arc<dyn Tool>],
        mut messages: Vec<ModelMessage>,
    ) -> Result<Vec<ModelMessage>, AgentError> {
        self.seen.lock().unwrap().push((
            system_prompt.to_string(),
            tools.iter().map(|t| t.name().to_string()).collect(),
            messages.clone(),
        ));
        messages.push(ModelMessage::assistant(self.reply.as_str()));
        Ok(messages)
    }
}

/// Orchestrator that always fails.
pub struct FailingOrchestrator;

#[async_trait]
impl Orchestrator for FailingOrchestrator {
    async fn invoke(
        &self,
        _system_prompt: &str,
        _tools: &[Arc<dyn Tool>],
        _messages: Vec<ModelMessage>,
    ) -> Result<Vec<ModelMessage>, AgentError> {
        Err(AgentError::provider("ollama", "model 'llama3.2' not found"))
    }
}

/// Orchestrator that returns nothing at all.
pub struct SilentOrchestrator;

#[async_trait]
impl Orchestrator for SilentOrchestrator {
    async fn invoke(
        &self,
        _system_prompt: &str,
        _tools: &[Arc<dyn Tool>],
        _messages: Vec<ModelMessage>,
    ) -> Result<Vec<ModelMessage>, AgentError> {
        Ok(Vec::new())
    }
}
