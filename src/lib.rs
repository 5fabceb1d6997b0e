//! Micky: a conversational home-automation agent.
//!
//! Chat turns go through a tool-calling language model (Ollama by default)
//! that can read and switch the LEDs on an ESP8266 controller over its
//! two-endpoint HTTP API.
//!
//! # Quick Start
//!
//! ```no_run
//! use micky::prelude::*;
//!
//! # async fn example() -> micky::error::Result<()> {
//! let config = AgentConfig::from_env()?;
//! let session = ChatSession::from_config(&config)?;
//! let history = session.handle_message("turn on led 1", History::new()).await;
//! println!("{}", history.last().and_then(|t| t.assistant.as_deref()).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod conversation;
pub mod device;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
