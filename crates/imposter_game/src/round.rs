//! State of a dealt round and the per-player reveal sequence.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::category::CategoryKey;
use crate::random::RandomSource;
use crate::rules::StartError;
use crate::words::WordBank;

/// Sub-state of the reveal for the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealStep {
    /// Showing whose turn it is; the card is still hidden.
    Name,
    /// Showing the card to the current player.
    Secret,
}

/// What the current player's card says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretCard {
    /// The shared secret word.
    Word(String),
    /// The player is the imposter and gets no word.
    Imposter,
}

/// Result of advancing past the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next unrevealed player is up.
    Next(usize),
    /// Everyone has seen their card.
    Complete,
}

/// A dealt round.
///
/// `revealed` has one slot per player; `current_reveal_index` is the first
/// unrevealed player and becomes `None` once every slot is true.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoundState {
    category: CategoryKey,
    category_label: String,
    secret_word: String,
    imposter_index: usize,
    revealed: Vec<bool>,
    current_reveal_index: Option<usize>,
    step: RevealStep,
}

impl RoundState {
    /// Deals a round: category, then word, then imposter, each drawn uniformly.
    ///
    /// Callers validate with [`RoundPreconditions`](crate::RoundPreconditions)
    /// first; this only refuses inputs it cannot deal from at all.
    ///
    /// # Errors
    ///
    /// Returns [`StartError`] if there are no players, no candidate categories
    /// or the drawn category has no words.
    #[instrument(skip(words, rng))]
    pub fn deal(
        player_count: usize,
        candidates: &[CategoryKey],
        words: &WordBank,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, StartError> {
        if player_count == 0 {
            return Err(StartError::NotEnoughPlayers { count: 0 });
        }
        if candidates.is_empty() {
            return Err(StartError::NoCategorySelected);
        }
        let category = candidates[rng.pick_index(candidates.len())];
        let list = words.words(category);
        if list.is_empty() {
            return Err(StartError::WordListTooSmall { category, count: 0 });
        }
        let secret_word = list[rng.pick_index(list.len())].clone();
        let imposter_index = rng.pick_index(player_count);

        info!(
            category = %category.as_ref(),
            players = player_count,
            "Round dealt"
        );
        debug!(imposter_index, "Imposter chosen");

        Ok(Self {
            category,
            category_label: category.label().to_string(),
            secret_word,
            imposter_index,
            revealed: vec![false; player_count],
            current_reveal_index: Some(0),
            step: RevealStep::Name,
        })
    }

    /// Number of players dealt into the round.
    pub fn player_count(&self) -> usize {
        self.revealed.len()
    }

    /// Returns true once every player has seen their card.
    pub fn is_complete(&self) -> bool {
        self.current_reveal_index.is_none()
    }

    /// Returns the card dealt to a player index.
    pub fn card_for(&self, index: usize) -> SecretCard {
        if index == self.imposter_index {
            SecretCard::Imposter
        } else {
            SecretCard::Word(self.secret_word.clone())
        }
    }

    /// Flips the current player's card face up.
    ///
    /// Returns false if the reveal is over.
    #[instrument(skip(self))]
    pub fn show_secret(&mut self) -> bool {
        if self.current_reveal_index.is_none() {
            return false;
        }
        self.step = RevealStep::Secret;
        true
    }

    /// Marks the current player revealed and moves to the next unrevealed one.
    ///
    /// Returns `None` if the reveal is already complete.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Option<Advance> {
        let current = self.current_reveal_index?;
        if let Some(slot) = self.revealed.get_mut(current) {
            *slot = true;
        }
        self.step = RevealStep::Name;

        let next = (current + 1..self.revealed.len()).find(|&i| !self.revealed[i]);
        self.current_reveal_index = next;
        match next {
            Some(i) => {
                debug!(next = i, "Next player up");
                Some(Advance::Next(i))
            }
            None => {
                info!("All players have seen their card");
                Some(Advance::Complete)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use std::collections::HashMap;

    fn words() -> WordBank {
        let mut lists = HashMap::new();
        lists.insert(
            CategoryKey::Food,
            vec!["Pizza".into(), "Kabsa".into(), "Sushi".into(), "Dates".into()],
        );
        lists.insert(
            CategoryKey::Jobs,
            vec!["Pilot".into(), "Chef".into(), "Barber".into(), "Farmer".into()],
        );
        WordBank::new(lists)
    }

    #[test]
    fn test_deal_uses_picks_in_order() {
        let mut rng = ScriptedRandom::new(vec![1, 2, 3]);
        let round = RoundState::deal(4, &[CategoryKey::Food, CategoryKey::Jobs], &words(), &mut rng)
            .expect("dealable");
        assert_eq!(*round.category(), CategoryKey::Jobs);
        assert_eq!(round.category_label(), "Jobs");
        assert_eq!(round.secret_word(), "Barber");
        assert_eq!(*round.imposter_index(), 3);
        assert_eq!(round.revealed(), &vec![false; 4]);
        assert_eq!(*round.current_reveal_index(), Some(0));
        assert_eq!(*round.step(), RevealStep::Name);
    }

    #[test]
    fn test_advance_walks_in_order_then_completes() {
        let mut rng = ScriptedRandom::new(vec![0, 0, 1]);
        let mut round =
            RoundState::deal(3, &[CategoryKey::Food], &words(), &mut rng).expect("dealable");

        assert!(round.show_secret());
        assert_eq!(*round.step(), RevealStep::Secret);
        assert_eq!(round.advance(), Some(Advance::Next(1)));
        assert_eq!(*round.step(), RevealStep::Name);
        assert_eq!(round.advance(), Some(Advance::Next(2)));
        assert_eq!(round.advance(), Some(Advance::Complete));
        assert!(round.is_complete());
        assert!(round.revealed().iter().all(|r| *r));
        assert_eq!(round.advance(), None);
        assert!(!round.show_secret());
    }

    #[test]
    fn test_deal_without_candidates() {
        let mut rng = ScriptedRandom::default();
        assert_eq!(
            RoundState::deal(3, &[], &words(), &mut rng),
            Err(StartError::NoCategorySelected)
        );
        assert_eq!(
            RoundState::deal(0, &[CategoryKey::Food], &words(), &mut rng),
            Err(StartError::NotEnoughPlayers { count: 0 })
        );
        assert_eq!(
            RoundState::deal(3, &[CategoryKey::Anime], &words(), &mut rng),
            Err(StartError::WordListTooSmall {
                category: CategoryKey::Anime,
                count: 0
            })
        );
    }
}
