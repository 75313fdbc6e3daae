//! The durable part of a session: roster and category flags.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::category::CategorySelection;
use crate::player::{Player, Roster};

/// Persisted state, stored as
/// `{ "selectedCategories": {..}, "players": [{"id", "name"}, ..] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    selected_categories: CategorySelection,
    players: Roster,
}

impl Snapshot {
    /// Creates a snapshot.
    pub fn new(selected_categories: CategorySelection, players: Roster) -> Self {
        Self {
            selected_categories,
            players,
        }
    }

    /// Splits the snapshot into its parts.
    pub fn into_parts(self) -> (CategorySelection, Roster) {
        (self.selected_categories, self.players)
    }

    /// Serializes to the stored JSON form.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> String {
        // Maps with enum keys and plain strings always serialize.
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!(error = %e, "Snapshot serialization failed");
            String::from("{}")
        })
    }

    /// Decodes stored JSON, falling back to defaults field by field.
    ///
    /// A document that does not parse yields [`Snapshot::default`]; a field
    /// that is missing or malformed keeps its default while the other field is
    /// still restored.
    #[instrument(skip(raw), fields(bytes = raw.len()))]
    pub fn from_json_or_default(raw: &str) -> Self {
        let doc: Value = match serde_json::from_str(raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "Stored state is corrupt, using defaults");
                return Self::default();
            }
        };

        let mut snapshot = Self::default();

        if let Some(categories) = doc.get("selectedCategories") {
            match serde_json::from_value::<CategorySelection>(categories.clone()) {
                Ok(selection) => snapshot.selected_categories = selection,
                Err(e) => warn!(error = %e, "Ignoring stored category selection"),
            }
        }

        if let Some(players) = doc.get("players") {
            match serde_json::from_value::<Vec<Player>>(players.clone()) {
                Ok(players) => snapshot.players = Roster::from_players(players),
                Err(e) => warn!(error = %e, "Ignoring stored players"),
            }
        }

        debug!(players = snapshot.players.len(), "Snapshot decoded");
        snapshot
    }
}

/// Strict decoding: a malformed field fails the whole document. Missing
/// fields still take their defaults and players are sanitized.
impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Stored {
            #[serde(default)]
            selected_categories: CategorySelection,
            #[serde(default)]
            players: Vec<Player>,
        }

        let stored = Stored::deserialize(deserializer)?;
        Ok(Self {
            selected_categories: stored.selected_categories,
            players: Roster::from_players(stored.players),
        })
    }
}
