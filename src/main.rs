//! Imposter - Unified CLI
//!
//! Plays the game at the terminal and inspects the saved state.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use imposter::cli::{Cli, Command};
use imposter::{AppConfig, FileStore, StatePersistence, run_table};
use imposter_game::CategoryKey;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)?.with_overrides(cli.state_file, cli.words);

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(config).await,
        Command::Categories => {
            init_stderr_logging();
            run_categories(config).await
        }
        Command::ShowState => {
            init_stderr_logging();
            run_show_state(config).await
        }
        Command::ResetState => {
            init_stderr_logging();
            run_reset_state(config).await
        }
    }
}

/// Logs to stderr for the one-shot commands.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn persistence(config: &AppConfig) -> StatePersistence<FileStore> {
    StatePersistence::new(FileStore::new(config.state_file()), config.storage_key().clone())
}

/// Run the terminal table
async fn run_play(config: AppConfig) -> Result<()> {
    // Log to file to avoid interfering with the TUI
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(state_file = %config.state_file().display(), "Starting Imposter table");
    run_table(&config).await
}

/// List categories with their word counts
#[instrument(skip_all)]
async fn run_categories(config: AppConfig) -> Result<()> {
    let words = config.word_bank()?;
    let snapshot = persistence(&config).load().await;

    println!("{:<20} {:>6}  {:<9} {}", "CATEGORY", "WORDS", "PLAYABLE", "ENABLED");
    for key in CategoryKey::all() {
        let count = words.count(key);
        let playable = if count >= imposter_game::MIN_WORDS_PER_CATEGORY { "yes" } else { "no" };
        let enabled = if snapshot.selected_categories().is_enabled(key) { "yes" } else { "no" };
        println!("{:<20} {:>6}  {:<9} {}", key.label(), count, playable, enabled);
    }
    Ok(())
}

/// Print the saved snapshot
#[instrument(skip_all)]
async fn run_show_state(config: AppConfig) -> Result<()> {
    let snapshot = persistence(&config).load().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Forget the saved snapshot
#[instrument(skip_all)]
async fn run_reset_state(config: AppConfig) -> Result<()> {
    let persistence = persistence(&config);
    persistence.clear().await?;
    println!("Cleared saved state in {}", config.state_file().display());
    Ok(())
}
