//! Players and the ordered roster.

use std::collections::HashSet;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::random::RandomSource;

/// Stable identifier of a player, unique within a roster.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generates a `<unix millis>-<random hex>` id.
    #[instrument(skip(rng))]
    pub fn generate(rng: &mut dyn RandomSource) -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("{}-{:x}", millis, rng.next_u64()))
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A participant at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Player {
    /// Stable id.
    id: PlayerId,
    /// Display name, never blank.
    name: String,
}

impl Player {
    /// Creates a player, trimming the name.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptyName`] if the trimmed name is empty.
    #[instrument(skip(id), fields(player_id = %id))]
    pub fn new(id: PlayerId, name: &str) -> Result<Self, RosterError> {
        let name = clean_name(name)?;
        Ok(Self { id, name })
    }
}

#[instrument]
fn clean_name(name: &str) -> Result<String, RosterError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RosterError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Error returned by roster edits.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RosterError {
    /// The name was blank after trimming.
    #[display("Player name cannot be empty")]
    EmptyName,

    /// No player with this id is on the roster.
    #[display("No player with id {}", _0)]
    UnknownPlayer(PlayerId),

    /// A reorder did not contain exactly the current players.
    #[display("Reordered list does not match the current roster")]
    ReorderMismatch,

    /// The roster is locked while a round is being played.
    #[display("Players cannot be changed during a round")]
    RoundActive,
}

impl std::error::Error for RosterError {}

/// Ordered list of players; order is the reveal order.
///
/// Every id is unique and every name is non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from untrusted input, dropping blank names and repeated ids.
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn from_players(players: Vec<Player>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(players.len());
        for player in players {
            if player.name.trim().is_empty() {
                warn!(player_id = %player.id, "Dropping player with blank name");
                continue;
            }
            if !seen.insert(player.id.clone()) {
                warn!(player_id = %player.id, "Dropping player with duplicate id");
                continue;
            }
            kept.push(Player {
                name: player.name.trim().to_string(),
                id: player.id,
            });
        }
        Self { players: kept }
    }

    /// Players in reveal order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody has been added.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the player at a reveal position.
    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Finds a player's position by id.
    pub fn position(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    /// Returns true if the id is taken.
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Appends a new player with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptyName`] for a blank name.
    #[instrument(skip(self, rng))]
    pub fn add(&mut self, name: &str, rng: &mut dyn RandomSource) -> Result<PlayerId, RosterError> {
        let name = clean_name(name)?;
        let mut id = PlayerId::generate(rng);
        while self.contains(&id) {
            debug!(player_id = %id, "Generated id collided, retrying");
            id = PlayerId::generate(rng);
        }
        info!(player_id = %id, name = %name, "Player added");
        self.players.push(Player {
            id: id.clone(),
            name,
        });
        Ok(id)
    }

    /// Renames a player.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::EmptyName`] or [`RosterError::UnknownPlayer`].
    #[instrument(skip(self), fields(player_id = %id))]
    pub fn rename(&mut self, id: &PlayerId, name: &str) -> Result<(), RosterError> {
        let name = clean_name(name)?;
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RosterError::UnknownPlayer(id.clone()))?;
        info!(old = %player.name, new = %name, "Player renamed");
        player.name = name;
        Ok(())
    }

    /// Removes a player and returns them.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnknownPlayer`] if the id is not on the roster.
    #[instrument(skip(self), fields(player_id = %id))]
    pub fn remove(&mut self, id: &PlayerId) -> Result<Player, RosterError> {
        let index = self
            .position(id)
            .ok_or_else(|| RosterError::UnknownPlayer(id.clone()))?;
        let removed = self.players.remove(index);
        info!(name = %removed.name, "Player removed");
        Ok(removed)
    }

    /// Replaces the order with `reordered`, which must hold exactly the current players.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::ReorderMismatch`] if ids are missing, repeated or unknown.
    #[instrument(skip(self, reordered), fields(count = reordered.len()))]
    pub fn reorder(&mut self, reordered: Vec<Player>) -> Result<(), RosterError> {
        if reordered.len() != self.players.len() {
            return Err(RosterError::ReorderMismatch);
        }
        let mut seen = HashSet::new();
        for player in &reordered {
            if !self.contains(&player.id) || !seen.insert(&player.id) {
                return Err(RosterError::ReorderMismatch);
            }
            if player.name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
        }
        debug!("Roster reordered");
        self.players = reordered;
        Ok(())
    }

    /// Returns the current order with positions `index` and `target` swapped.
    ///
    /// Returns `None` when either index is out of range.
    #[instrument(skip(self))]
    pub fn with_swapped(&self, index: usize, target: usize) -> Option<Vec<Player>> {
        if index >= self.players.len() || target >= self.players.len() {
            return None;
        }
        let mut order = self.players.clone();
        order.swap(index, target);
        Some(order)
    }
}
