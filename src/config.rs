//! Application configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use imposter_game::WordBank;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::storage::STORAGE_KEY;

/// Settings read from `imposter.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON file backing the key-value store.
    #[serde(default = "default_state_file")]
    state_file: PathBuf,

    /// Key the session snapshot is stored under.
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Optional JSON word lists replacing the bundled ones.
    #[serde(default)]
    word_list: Option<PathBuf>,

    /// File the terminal front-end logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

#[instrument]
fn default_state_file() -> PathBuf {
    PathBuf::from("imposter_state.json")
}

#[instrument]
fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("imposter.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            storage_key: default_storage_key(),
            word_list: None,
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(state_file = %config.state_file.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is unreadable or malformed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        state_file: Option<PathBuf>,
        word_list: Option<PathBuf>,
    ) -> Self {
        if let Some(state_file) = state_file {
            self.state_file = state_file;
        }
        if word_list.is_some() {
            self.word_list = word_list;
        }
        self
    }

    /// Loads the configured word lists, or the bundled ones.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the word list file cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn word_bank(&self) -> Result<WordBank, ConfigError> {
        match &self.word_list {
            Some(path) => {
                debug!(path = %path.display(), "Loading word lists from file");
                let content = std::fs::read_to_string(path).map_err(|e| {
                    ConfigError::new(format!("Failed to read word list {}: {}", path.display(), e))
                })?;
                WordBank::from_json(&content).map_err(|e| ConfigError::new(e.message))
            }
            None => WordBank::bundled().map_err(|e| ConfigError::new(e.message)),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
