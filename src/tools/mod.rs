//! Tool system for function calling.

pub mod arguments;
pub mod led;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use led::{led_tools, CHANGE_LED_STATUS, GET_LED_STATUS};
pub use tool::{AgentTool, Tool};
pub use types::AgentToolParameters;
