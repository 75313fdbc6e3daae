//! Preconditions for starting a round.
//!
//! Checks run in a fixed order and the first failure wins, so the player
//! always sees the most basic problem first.

use tracing::{instrument, warn};

use crate::category::{CategoryKey, CategorySelection};
use crate::words::WordBank;

/// Fewest players a round can be dealt to.
pub const MIN_PLAYERS: usize = 3;

/// Fewest words a category needs to be playable.
pub const MIN_WORDS_PER_CATEGORY: usize = 4;

/// Reason a round could not be started.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StartError {
    /// Fewer than [`MIN_PLAYERS`] players.
    #[display("You need at least {} players.", MIN_PLAYERS)]
    NotEnoughPlayers {
        /// Players on the roster.
        count: usize,
    },

    /// Every category is disabled.
    #[display("Pick at least one category.")]
    NoCategorySelected,

    /// An enabled category has fewer than [`MIN_WORDS_PER_CATEGORY`] words.
    #[display("The word list for category {} is too small.", category.label())]
    WordListTooSmall {
        /// The offending category.
        category: CategoryKey,
        /// Words it has.
        count: usize,
    },

    /// Players are still viewing their cards.
    #[display("A round is already being revealed.")]
    RevealUnderway,
}

impl StartError {
    /// Dialog title shown with this error.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotEnoughPlayers { .. } | Self::NoCategorySelected => "Hold on",
            Self::WordListTooSmall { .. } | Self::RevealUnderway => "Error",
        }
    }
}

impl std::error::Error for StartError {}

/// Precondition: enough players are seated.
pub struct EnoughPlayers;

impl EnoughPlayers {
    /// Checks the player count.
    #[instrument]
    pub fn check(count: usize) -> Result<(), StartError> {
        if count < MIN_PLAYERS {
            warn!(count, "Not enough players");
            Err(StartError::NotEnoughPlayers { count })
        } else {
            Ok(())
        }
    }
}

/// Precondition: at least one category is enabled.
pub struct CategorySelected;

impl CategorySelected {
    /// Checks the enabled categories.
    #[instrument]
    pub fn check(enabled: &[CategoryKey]) -> Result<(), StartError> {
        if enabled.is_empty() {
            warn!("No category selected");
            Err(StartError::NoCategorySelected)
        } else {
            Ok(())
        }
    }
}

/// Precondition: every enabled category has a usable word list.
pub struct WordListsLargeEnough;

impl WordListsLargeEnough {
    /// Checks each enabled category in order.
    #[instrument(skip(words))]
    pub fn check(enabled: &[CategoryKey], words: &WordBank) -> Result<(), StartError> {
        for &category in enabled {
            let count = words.count(category);
            if count < MIN_WORDS_PER_CATEGORY {
                warn!(category = %category.as_ref(), count, "Word list too small");
                return Err(StartError::WordListTooSmall { category, count });
            }
        }
        Ok(())
    }
}

/// Composite precondition for dealing a round.
pub struct RoundPreconditions;

impl RoundPreconditions {
    /// Runs every check and returns the enabled categories on success.
    #[instrument(skip(selection, words))]
    pub fn check(
        player_count: usize,
        selection: &CategorySelection,
        words: &WordBank,
    ) -> Result<Vec<CategoryKey>, StartError> {
        EnoughPlayers::check(player_count)?;
        let enabled = selection.enabled_keys();
        CategorySelected::check(&enabled)?;
        WordListsLargeEnough::check(&enabled, words)?;
        Ok(enabled)
    }
}
