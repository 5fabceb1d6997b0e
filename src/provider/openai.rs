//! OpenAI-compatible Chat Completions transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::AgentError;
use crate::types::*;

use super::format::tool_result_to_string;
use super::http::{bearer_headers, build_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

/// Provider speaking the `/chat/completions` wire format.
pub struct OpenAiChatProvider {
    model: String,
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiChatProvider {
    /// `base_url` is the API root, e.g. `http://localhost:11434/v1`.
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(max) = request.settings.max_tokens {
                obj.insert("max_tokens".into(), max.into());
            }
            if let Some(temp) = request.settings.temperature {
                obj.insert("temperature".into(), temp.into());
            }
            if let Some(seed) = request.settings.seed {
                obj.insert("seed".into(), seed.into());
            }

            if let Some(ref tools) = request.tools {
                if !tools.is_empty() {
                    let tool_defs: Vec<Value> = tools
                        .iter()
                        .map(|t| {
                            serde_json::json!({
                                "type": "function",
                                "function": {
                                    "name": t.name,
                                    "description": t.description,
                                    "parameters": t.parameters,
                                }
                            })
                        })
                        .collect();
                    obj.insert("tools".into(), tool_defs.into());
                }
            }
        }

        body
    }
}

#[async_trait]
impl ModelProvider for OpenAiChatProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, %url, messages = request.messages.len(), "chat completion");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let raw = resp.text().await?;
        let data: ChatResponse = serde_json::from_str(&raw)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::api(status, "No choices in chat completion response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| AgentToolCall {
                id: tc
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple())),
                name: tc.function.name,
                arguments: parse_arguments(tc.function.arguments),
            })
            .collect();

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            tool_calls,
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
        })
    }
}

/// Arguments arrive as a JSON-encoded string; keep the raw string if it
/// does not parse.
fn parse_arguments(arguments: Value) -> Value {
    match arguments {
        Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        other => other,
    }
}

fn parse_finish_reason(s: &str) -> Option<FinishReason> {
    match s {
        "stop" => Some(FinishReason::Stop),
        "length" => Some(FinishReason::Length),
        "tool_calls" => Some(FinishReason::ToolCalls),
        "content_filter" => Some(FinishReason::ContentFilter),
        _ => None,
    }
}

fn message_to_openai(msg: &ModelMessage) -> Value {
    let role = msg.role.to_string();

    if let [ContentPart::ToolResult(tr)] = msg.content.as_slice() {
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": tool_result_to_string(&tr.result),
        });
    }

    let tool_calls = msg.tool_calls();
    if !tool_calls.is_empty() {
        let tc_json: Vec<Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": tc.arguments.to_string(),
                    }
                })
            })
            .collect();
        let text = msg.text();
        return serde_json::json!({
            "role": role,
            "content": if text.is_empty() { Value::Null } else { Value::String(text) },
            "tool_calls": tc_json,
        });
    }

    serde_json::json!({ "role": role, "content": msg.text() })
}

// Chat Completions response types (internal)

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    id: Option<String>,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
