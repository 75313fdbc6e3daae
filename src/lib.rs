//! Imposter - pass-and-play "who's the imposter?" party game
//!
//! Everyone at the table gets the same secret word except one player, the
//! imposter, who has to bluff through the discussion.
//!
//! # Architecture
//!
//! - **Game**: the round engine lives in the [`imposter_game`] crate
//! - **Storage**: key-value persistence of the roster and category choice
//! - **Config**: TOML settings with command-line overrides
//! - **Table**: terminal front-end passed from player to player
//!
//! # Example
//!
//! ```no_run
//! use imposter::{AppConfig, FileStore, StatePersistence};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load_or_default("imposter.toml")?;
//! let persistence = StatePersistence::new(
//!     FileStore::new(config.state_file()),
//!     config.storage_key().clone(),
//! );
//! let snapshot = persistence.load().await;
//! println!("{} players saved", snapshot.players().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod storage;
pub mod table;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Storage
pub use storage::{
    FileStore, KeyValueStore, MemoryStore, STORAGE_KEY, StatePersistence, StorageError,
};

// Crate-level exports - Table
pub use table::{TableController, run_table};
