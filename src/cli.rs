//! Command-line interface for imposter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Imposter - pass-and-play party game: everyone gets the word but one
#[derive(Parser, Debug)]
#[command(name = "imposter")]
#[command(about = "Pass-and-play \"who's the imposter?\" party game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(long, default_value = "imposter.toml")]
    pub config: PathBuf,

    /// Override the state file from the config
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Override the word list file from the config
    #[arg(long)]
    pub words: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play at the terminal
    Play,

    /// List categories with their word counts and saved selection
    Categories,

    /// Print the saved players and categories as JSON
    ShowState,

    /// Forget the saved players and categories
    ResetState,
}
