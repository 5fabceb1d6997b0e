//! Command-line front end for Micky.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::AgentConfig;
use crate::error::AgentError;

/// Micky home-automation agent
#[derive(Parser, Debug)]
#[command(name = "micky", version, about = "Micky: chat with your LEDs")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that take precedence over the config file and environment.
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Device API base URL (e.g. http://192.168.4.1)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Ollama server base URL
    #[arg(long, global = true)]
    pub ollama_base: Option<String>,

    /// Model served by Ollama
    #[arg(short, long, global = true)]
    pub model: Option<String>,
}

impl ConfigOverrides {
    /// Layered config with these flags applied last.
    pub fn resolve(&self) -> Result<AgentConfig, AgentError> {
        let config = AgentConfig::load(self.config.as_deref())?;
        Ok(self.apply(config))
    }

    pub fn apply(&self, mut config: AgentConfig) -> AgentConfig {
        if let Some(ref url) = self.api_base {
            config.api_base = url.clone();
        }
        if let Some(ref url) = self.ollama_base {
            config.ollama_base = url.clone();
        }
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        config
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat session
    Chat,
    /// Send a single message and print the reply
    Ask(AskArgs),
    /// Print the LED status straight from the device
    Status,
    /// Switch an LED straight on the device
    Set(SetArgs),
}

/// Arguments for `micky ask`.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Message to send
    pub message: String,

    /// JSON history file (`[[user, assistant], ...]`), updated in place
    #[arg(long)]
    pub history: Option<PathBuf>,
}

/// Arguments for `micky set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// LED number
    pub led: i64,

    /// Desired state
    #[arg(value_enum)]
    pub state: LedState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LedState {
    On,
    Off,
}

impl LedState {
    pub fn is_on(self) -> bool {
        self == LedState::On
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_chat_with_defaults() {
        let cli = Cli::try_parse_from(["micky", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat));
        assert!(cli.overrides.api_base.is_none());
        assert!(cli.overrides.model.is_none());
    }

    #[test]
    fn parse_ask_with_history() {
        let cli =
            Cli::try_parse_from(["micky", "ask", "turn on led 1", "--history", "h.json"]).unwrap();
        match cli.command {
            Commands::Ask(args) => {
                assert_eq!(args.message, "turn on led 1");
                assert_eq!(args.history, Some(PathBuf::from("h.json")));
            }
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn parse_set_on_off() {
        let cli = Cli::try_parse_from(["micky", "set", "2", "off"]).unwrap();
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.led, 2);
                assert!(!args.state.is_on());
            }
            other => panic!("expected Set, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_unknown_state() {
        assert!(Cli::try_parse_from(["micky", "set", "2", "dim"]).is_err());
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "micky",
            "status",
            "--api-base",
            "http://10.0.0.5",
            "-m",
            "qwen2.5",
        ])
        .unwrap();
        let config = cli.overrides.apply(AgentConfig::default());
        assert_eq!(config.api_base, "http://10.0.0.5");
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.ollama_base, "http://localhost:11434");
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["micky"]).is_err());
    }
}
