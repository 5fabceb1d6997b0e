//! Convenience re-exports for common use.

pub use crate::agent::{ChatSession, Orchestrator, ToolLoopOrchestrator};
pub use crate::config::AgentConfig;
pub use crate::conversation::{History, Turn};
pub use crate::device::{DeviceClient, DeviceError};
pub use crate::error::{AgentError, Result};
pub use crate::provider::ModelProvider;
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments};
pub use crate::types::{ContentPart, FinishReason, GenerationSettings, ModelMessage, Role, Usage};
