//! Homework bot CLI
//!
//! Watches the review status of the latest homework and reports changes
//! to a Telegram chat.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use homework_bot::{
    error::Result,
    models::{Config, Credentials, PollCursor},
    pipeline::{CycleOutcome, PollLoop},
    services::{ConsoleMessenger, Notifier, ReviewApiClient, TelegramMessenger},
};
use tokio::sync::watch;

/// homework-bot - Homework review notifier
#[derive(Parser, Debug)]
#[command(name = "homework-bot", version, about = "Homework review notifier")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll for review updates until interrupted
    Run {
        /// Unix timestamp to start from (default: now)
        #[arg(long)]
        from_date: Option<i64>,
    },

    /// Run a single poll cycle and exit
    Check {
        /// Unix timestamp to query from (default: 0, i.e. the latest homework)
        #[arg(long, default_value_t = 0)]
        from_date: i64,

        /// Print the message instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and environment
    Validate,
}

/// Initialize logging from `RUST_LOG`, the verbosity flag, or the config.
fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.format_timestamp_secs();

    if let Some(path) = &config.logging.file {
        let file = std::fs::File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

/// Flip the shutdown flag on Ctrl-C.
fn spawn_shutdown_listener() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Shutdown requested, stopping after the current cycle");
                let _ = tx.send(true);
            }
            Err(e) => log::error!("Cannot listen for Ctrl-C: {}", e),
        }
    });
    rx
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    // Variables already in the environment win over `.env`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (config, load_error) = match Config::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config, cli.verbose)?;

    match load_error {
        Some(e) => log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        ),
        None => log::info!("Loaded configuration from {}", cli.config.display()),
    }
    config.validate()?;

    match cli.command {
        Command::Run { from_date } => {
            let credentials = Credentials::from_env()?;
            log::debug!("Using {:?}", credentials);

            let source = Arc::new(ReviewApiClient::new(
                &config.review_api,
                &credentials.review_token,
            )?);
            let messenger = Arc::new(TelegramMessenger::new(
                &config.telegram,
                &credentials.telegram_token,
            )?);
            let notifier = Notifier::new(messenger, &credentials.chat_id);
            let cursor = from_date.map_or_else(PollCursor::now, PollCursor::new);

            let mut poll = PollLoop::new(source, notifier, cursor, &config.polling);
            let shutdown = spawn_shutdown_listener();

            log::info!("Bot launched");
            poll.run(shutdown).await;
        }

        Command::Check { from_date, dry_run } => {
            let (source, notifier) = if dry_run {
                let token = Credentials::review_token_from_env()?;
                let source = ReviewApiClient::new(&config.review_api, token)?;
                (source, Notifier::new(Arc::new(ConsoleMessenger), "stdout"))
            } else {
                let credentials = Credentials::from_env()?;
                let source = ReviewApiClient::new(&config.review_api, &credentials.review_token)?;
                let messenger =
                    TelegramMessenger::new(&config.telegram, &credentials.telegram_token)?;
                (source, Notifier::new(Arc::new(messenger), &credentials.chat_id))
            };

            let mut poll = PollLoop::new(
                Arc::new(source),
                notifier,
                PollCursor::new(from_date),
                &config.polling,
            );

            match poll.run_cycle().await? {
                CycleOutcome::NoUpdate => log::info!("No homework updates since {}", from_date),
                CycleOutcome::Notified { receipt } => {
                    log::info!("Reported newest homework to chat {}", receipt.chat_id)
                }
            }
            log::info!("Next cursor: {}", poll.cursor().value());
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            log::info!("✓ Config OK");

            let credentials = Credentials::from_env()?;
            ReviewApiClient::new(&config.review_api, &credentials.review_token)?;
            TelegramMessenger::new(&config.telegram, &credentials.telegram_token)?;
            log::info!("✓ Credentials OK (chat {})", credentials.chat_id);

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
