use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod ask;
pub mod chat;
pub mod modes;

use crate::chat::PromptStyle;
use crate::chat::modes::DEFAULT_MODE;
use crate::core::AppConfig;

#[derive(Subcommand)]
enum Command {
    /// List the available chat modes
    Modes {},
    /// Send a single message and print the answer
    Ask {
        /// Chat mode to answer in
        #[arg(long, default_value = DEFAULT_MODE)]
        mode: String,

        /// Use the legacy text completions API
        #[arg(long, action, default_value = "false")]
        legacy: bool,

        message: String,
    },
    /// Start a chat bot session
    Chat {
        /// Chat mode to start in
        #[arg(long, default_value = DEFAULT_MODE)]
        mode: String,

        /// Use the legacy text completions API
        #[arg(long, action, default_value = "false")]
        legacy: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn config_for(legacy: bool) -> AppConfig {
    let mut config = AppConfig::default();
    if legacy {
        config.prompt_style = PromptStyle::Legacy;
    }
    config
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    // Handle each sub command
    match args.command {
        Some(Command::Modes {}) => {
            modes::run();
        }
        Some(Command::Ask {
            mode,
            legacy,
            message,
        }) => {
            ask::run(config_for(legacy), &mode, &message).await?;
        }
        Some(Command::Chat { mode, legacy }) => {
            chat::run(config_for(legacy), &mode).await?;
        }
        None => {}
    }

    Ok(())
}
