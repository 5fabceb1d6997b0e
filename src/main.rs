//! Micky CLI binary entry point.

use std::io::Write;
use std::path::Path;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use micky::agent::ChatSession;
use micky::cli::{AskArgs, Cli, Commands, SetArgs};
use micky::config::AgentConfig;
use micky::conversation::History;
use micky::device::DeviceClient;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "micky=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.overrides.resolve() {
        Ok(config) => match cli.command {
            Commands::Chat => handle_chat(&config).await,
            Commands::Ask(args) => handle_ask(&config, args).await,
            Commands::Status => handle_status(&config).await,
            Commands::Set(args) => handle_set(&config, args).await,
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(config: &AgentConfig) -> CliResult {
    let session = ChatSession::from_config(config)?;
    let mut history = History::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Micky is listening. Type /reset to start over, /exit to quit.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "/exit" | "/quit" => break,
            "/reset" => {
                history.clear();
                println!("(history cleared)");
                continue;
            }
            _ => {}
        }

        history = session.handle_message(line, history).await;
        if let Some(reply) = history.last().and_then(|t| t.assistant.as_deref()) {
            println!("{reply}");
        }
    }

    Ok(())
}

async fn handle_ask(config: &AgentConfig, args: AskArgs) -> CliResult {
    let session = ChatSession::from_config(config)?;
    let history = match args.history.as_deref() {
        Some(path) => read_history(path)?,
        None => History::new(),
    };

    let history = session.handle_message(args.message, history).await;
    if let Some(reply) = history.last().and_then(|t| t.assistant.as_deref()) {
        println!("{reply}");
    }

    if let Some(path) = args.history.as_deref() {
        std::fs::write(path, serde_json::to_string_pretty(&history)?)?;
    }
    Ok(())
}

async fn handle_status(config: &AgentConfig) -> CliResult {
    let client = DeviceClient::from_config(config)?;
    println!("{}", client.get_status().await);
    Ok(())
}

async fn handle_set(config: &AgentConfig, args: SetArgs) -> CliResult {
    let client = DeviceClient::from_config(config)?;
    println!("{}", client.set_status(args.led, args.state.is_on()).await);
    Ok(())
}

/// Missing file means a fresh conversation.
fn read_history(path: &Path) -> Result<History, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(History::new());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
