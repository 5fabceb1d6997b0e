//! Agent layer: the tool-calling loop and the chat entry point.

pub mod orchestrator;
pub mod prompt;
pub mod session;

pub use orchestrator::{Orchestrator, ToolLoopOrchestrator};
pub use prompt::SYSTEM_PROMPT;
pub use session::ChatSession;
