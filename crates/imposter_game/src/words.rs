//! Word lists per category.

use std::collections::{BTreeMap, HashMap};

use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use crate::category::CategoryKey;

const BUNDLED_WORDS: &str = include_str!("../assets/words.json");

/// Read-only mapping from category to candidate secret words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordBank {
    lists: HashMap<CategoryKey, Vec<String>>,
}

impl WordBank {
    /// Builds a bank from explicit lists.
    #[instrument(skip(lists))]
    pub fn new(lists: HashMap<CategoryKey, Vec<String>>) -> Self {
        Self { lists }
    }

    /// Loads the word lists shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`WordBankError`] if the bundled asset is malformed.
    #[instrument]
    pub fn bundled() -> Result<Self, WordBankError> {
        Self::from_json(BUNDLED_WORDS)
    }

    /// Parses a `{ "<category key>": ["word", ...] }` JSON document.
    ///
    /// Unknown keys are ignored and blank entries dropped.
    ///
    /// # Errors
    ///
    /// Returns [`WordBankError`] if the document is not such an object.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, WordBankError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| WordBankError::new(format!("Failed to parse word lists: {}", e)))?;

        let mut lists = HashMap::new();
        for (key, words) in raw {
            let Some(category) = CategoryKey::from_key(&key) else {
                warn!(key = %key, "Ignoring unknown category in word lists");
                continue;
            };
            let words: Vec<String> = words
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();
            debug!(category = %key, count = words.len(), "Loaded word list");
            lists.insert(category, words);
        }

        info!(categories = lists.len(), "Word bank loaded");
        Ok(Self { lists })
    }

    /// Returns the words for a category, empty if it has none.
    pub fn words(&self, key: CategoryKey) -> &[String] {
        self.lists.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of words available for a category.
    pub fn count(&self, key: CategoryKey) -> usize {
        self.words(key).len()
    }
}

/// Word list loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Word list error: {} at {}:{}", message, file, line)]
pub struct WordBankError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl WordBankError {
    /// Creates a new word list error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
