//! The reasoning loop: model turns interleaved with tool execution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::DEFAULT_MAX_TOOL_ITERATIONS;
use crate::error::AgentError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::tools::{Tool, ToolArguments};
use crate::types::*;

/// Anything that can turn a prompt, a tool set and a message history into
/// an extended history ending in the assistant's reply.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Returns `messages` followed by everything produced this run. The
    /// system prompt is not part of the returned sequence.
    async fn invoke(
        &self,
        system_prompt: &str,
        tools: &[Arc<dyn Tool>],
        messages: Vec<ModelMessage>,
    ) -> Result<Vec<ModelMessage>, AgentError>;
}

/// Orchestrator backed by a [`ModelProvider`].
///
/// Tool calls run one at a time, in the order the model listed them.
pub struct ToolLoopOrchestrator {
    provider: Box<dyn ModelProvider>,
    settings: GenerationSettings,
    max_iterations: usize,
}

impl ToolLoopOrchestrator {
    pub fn new(provider: Box<dyn ModelProvider>) -> Self {
        Self {
            provider,
            settings: GenerationSettings::default(),
            max_iterations: DEFAULT_MAX_TOOL_ITERATIONS,
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
}

#[async_trait]
impl Orchestrator for ToolLoopOrchestrator {
    async fn invoke(
        &self,
        system_prompt: &str,
        tools: &[Arc<dyn Tool>],
        mut messages: Vec<ModelMessage>,
    ) -> Result<Vec<ModelMessage>, AgentError> {
        let tool_defs = tool_definitions(tools);
        let mut total_usage = Usage::default();

        for iteration in 0..self.max_iterations {
            let mut request_messages = Vec::with_capacity(messages.len() + 1);
            request_messages.push(ModelMessage::system(system_prompt));
            request_messages.extend(messages.iter().cloned());

            let request = ProviderRequest {
                messages: request_messages,
                settings: self.settings.clone(),
                tools: tool_defs.clone(),
            };

            debug!(
                iteration,
                provider = self.provider.provider_name(),
                model = self.provider.model_id(),
                "calling provider"
            );
            let response = self.provider.generate_text(&request).await?;
            total_usage.merge(&response.usage);

            if response.tool_calls.is_empty() {
                match response.finish_reason {
                    Some(FinishReason::Length) => {
                        let max_tokens = self.settings.max_tokens;
                        warn!(?max_tokens, "reply cut off at token limit");
                    }
                    Some(FinishReason::ContentFilter) => warn!("reply withheld by content filter"),
                    _ => {}
                }
                debug!(
                    iterations = iteration + 1,
                    input_tokens = total_usage.input_tokens,
                    output_tokens = total_usage.output_tokens,
                    "tool loop finished"
                );
                messages.push(ModelMessage::assistant(response.text));
                return Ok(messages);
            }

            messages.push(ModelMessage::assistant_tool_calls(
                response.text,
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let result = execute_tool(tools, call).await;
                messages.push(ModelMessage::tool_result(
                    result.tool_call_id,
                    result.result,
                    result.is_error,
                ));
            }
        }

        Err(AgentError::ToolLoopExhausted(self.max_iterations))
    }
}

fn tool_definitions(tools: &[Arc<dyn Tool>]) -> Option<Vec<ToolDefinition>> {
    if tools.is_empty() {
        return None;
    }
    Some(
        tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters().schema.clone(),
            })
            .collect(),
    )
}

/// Run one tool call. Failures become error results for the model to read.
async fn execute_tool(tools: &[Arc<dyn Tool>], call: &AgentToolCall) -> AgentToolResult {
    let Some(tool) = tools.iter().find(|t| t.name() == call.name) else {
        warn!(tool = %call.name, "Tool not found");
        return AgentToolResult {
            tool_call_id: call.id.clone(),
            result: serde_json::json!({"error": format!("Tool '{}' not found", call.name)}),
            is_error: true,
        };
    };

    debug!(tool = %call.name, arguments = %call.arguments, "executing tool");
    let args = ToolArguments::new(call.arguments.clone());
    match tool.execute(&args).await {
        Ok(value) => AgentToolResult {
            tool_call_id: call.id.clone(),
            result: value,
            is_error: false,
        },
        Err(e) => {
            warn!(tool = %call.name, error = %e, "Tool execution failed");
            AgentToolResult {
                tool_call_id: call.id.clone(),
                result: serde_json::json!({"error": e.to_string()}),
                is_error: true,
            }
        }
    }
}
