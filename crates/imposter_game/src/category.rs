//! Word categories and the per-category enabled flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

/// One of the fixed word categories.
///
/// The serialized form (`places`, `quran_chapters`, ...) is the key used both
/// in word-list files and in the persisted snapshot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CategoryKey {
    /// Places.
    Places,
    /// Food.
    Food,
    /// Everyday objects.
    Objects,
    /// Sports.
    Sports,
    /// Jobs.
    Jobs,
    /// Countries.
    Countries,
    /// Chapters (surahs) of the Quran.
    QuranChapters,
    /// Football players.
    FootballPlayers,
    /// Cartoons.
    Cartoon,
    /// Anime.
    Anime,
}

impl CategoryKey {
    /// Returns the display label for this category.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Places => "Places",
            Self::Food => "Food",
            Self::Objects => "Objects",
            Self::Sports => "Sports",
            Self::Jobs => "Jobs",
            Self::Countries => "Countries",
            Self::QuranChapters => "Surahs",
            Self::FootballPlayers => "Football players",
            Self::Cartoon => "Cartoons",
            Self::Anime => "Anime",
        }
    }

    /// Returns every category in its fixed order.
    pub fn all() -> impl Iterator<Item = CategoryKey> {
        Self::iter()
    }

    /// Looks a category up by its serialized key.
    #[instrument]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::iter().find(|k| k.as_ref() == key)
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Enabled flag for every category.
///
/// Always holds an entry for each [`CategoryKey`]; keys missing from
/// deserialized input default to enabled and unknown keys are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, bool>",
    into = "BTreeMap<CategoryKey, bool>"
)]
pub struct CategorySelection {
    enabled: BTreeMap<CategoryKey, bool>,
}

impl CategorySelection {
    /// Creates a selection with every category enabled.
    #[instrument]
    pub fn all_enabled() -> Self {
        Self {
            enabled: CategoryKey::all().map(|k| (k, true)).collect(),
        }
    }

    /// Returns whether a category is enabled.
    pub fn is_enabled(&self, key: CategoryKey) -> bool {
        self.enabled.get(&key).copied().unwrap_or(true)
    }

    /// Sets a category's flag.
    #[instrument(skip(self))]
    pub fn set(&mut self, key: CategoryKey, enabled: bool) {
        self.enabled.insert(key, enabled);
    }

    /// Flips a category's flag and returns the new value.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, key: CategoryKey) -> bool {
        let now = !self.is_enabled(key);
        self.enabled.insert(key, now);
        now
    }

    /// Enabled categories in the fixed category order.
    pub fn enabled_keys(&self) -> Vec<CategoryKey> {
        CategoryKey::all().filter(|k| self.is_enabled(*k)).collect()
    }
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl From<BTreeMap<String, bool>> for CategorySelection {
    fn from(stored: BTreeMap<String, bool>) -> Self {
        let mut selection = Self::all_enabled();
        for (name, enabled) in stored {
            match CategoryKey::from_key(&name) {
                Some(key) => selection.set(key, enabled),
                None => debug!(key = %name, "Skipping unknown stored category"),
            }
        }
        selection
    }
}

impl From<CategorySelection> for BTreeMap<CategoryKey, bool> {
    fn from(selection: CategorySelection) -> Self {
        selection.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_storage_names() {
        let keys: Vec<String> = CategoryKey::all().map(|k| k.as_ref().to_owned()).collect();
        assert_eq!(
            keys,
            vec![
                "places",
                "food",
                "objects",
                "sports",
                "jobs",
                "countries",
                "quran_chapters",
                "football_players",
                "cartoon",
                "anime"
            ]
        );
        assert_eq!(CategoryKey::from_key("football_players"), Some(CategoryKey::FootballPlayers));
        assert_eq!(CategoryKey::from_key("nope"), None);
    }

    #[test]
    fn test_toggle_and_enabled_order() {
        let mut selection = CategorySelection::default();
        assert_eq!(selection.enabled_keys().len(), 10);

        assert!(!selection.toggle(CategoryKey::Places));
        assert!(!selection.toggle(CategoryKey::Anime));
        let enabled = selection.enabled_keys();
        assert_eq!(enabled.first(), Some(&CategoryKey::Food));
        assert_eq!(enabled.last(), Some(&CategoryKey::Cartoon));

        assert!(selection.toggle(CategoryKey::Places));
        assert!(selection.is_enabled(CategoryKey::Places));
    }

    #[test]
    fn test_partial_map_defaults_missing_to_enabled() {
        let selection: CategorySelection =
            serde_json::from_str(r#"{"food": false}"#).expect("valid map");
        assert!(!selection.is_enabled(CategoryKey::Food));
        assert!(selection.is_enabled(CategoryKey::Jobs));
    }

    #[test]
    fn test_unknown_stored_key_keeps_known_flags() {
        let selection: CategorySelection =
            serde_json::from_str(r#"{"anime": false, "legacy": true}"#).expect("valid map");
        assert!(!selection.is_enabled(CategoryKey::Anime));
        assert!(selection.is_enabled(CategoryKey::Places));
        assert_eq!(selection.enabled_keys().len(), 9);
    }
}
