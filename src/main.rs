use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use curi_bot::application::bootstrap;
use curi_bot::application::errors::BotError;
use curi_bot::infrastructure::adapters::{ConsoleAdapter, TwitchAdapter};
use curi_bot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "curi-bot")]
#[command(about = "Twitch chat bot answering a fixed set of commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// IRC token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// Default log level, RUST_LOG directives still apply on top
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run {
        /// Read messages from stdin instead of connecting to Twitch
        #[arg(long)]
        console: bool,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.log_level.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Run { console } => run_bot(&cli.config, cli.token, console),
        Commands::Version => {
            println!("curi-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_bot(config_path: &Path, token_override: Option<String>, console: bool) -> Result<(), BotError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async move {
        if console {
            bootstrap::run(config_path, token_override, |_config| async {
                Ok::<_, BotError>(ConsoleAdapter::new())
            })
            .await
        } else {
            bootstrap::run(config_path, token_override, |config| async move {
                TwitchAdapter::connect(&config).await
            })
            .await
        }
    })
}

fn init_config(path: &Path) -> Result<(), BotError> {
    Config::write_template(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
