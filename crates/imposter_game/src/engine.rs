//! The round engine: one session's roster, categories and round lifecycle.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::category::{CategoryKey, CategorySelection};
use crate::dialog::{ConfirmAction, ConfirmDialog, InfoDialog, PendingAction};
use crate::player::{Player, PlayerId, Roster, RosterError};
use crate::random::{RandomSource, ThreadRandom};
use crate::round::{Advance, RevealStep, RoundState, SecretCard};
use crate::rules::{RoundPreconditions, StartError};
use crate::snapshot::Snapshot;
use crate::words::WordBank;

/// Top-level lifecycle of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Editing players and categories.
    Setup,
    /// Passing the device around so each player sees their card.
    Reveal,
    /// Everyone has seen their card; talk and vote.
    Discussion,
}

impl Phase {
    /// Returns the display label for this phase.
    pub fn label(self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Reveal => "Reveal",
            Self::Discussion => "Discussion",
        }
    }
}

/// State container for a single play session.
///
/// Roster and category edits are only accepted during [`Phase::Setup`].
/// Every accepted edit marks the engine dirty so the caller knows to persist
/// a fresh [`Snapshot`].
#[derive(Debug)]
pub struct RoundEngine<R: RandomSource = ThreadRandom> {
    roster: Roster,
    categories: CategorySelection,
    words: WordBank,
    rng: R,
    phase: Phase,
    round: Option<RoundState>,
    imposter_visible: bool,
    pending: PendingAction,
    dirty: bool,
}

impl<R: RandomSource> RoundEngine<R> {
    /// Creates an engine in setup, hydrated from a stored snapshot.
    #[instrument(skip_all, fields(players = snapshot.players().len()))]
    pub fn new(snapshot: Snapshot, words: WordBank, rng: R) -> Self {
        let (categories, roster) = snapshot.into_parts();
        info!("Round engine ready");
        Self {
            roster,
            categories,
            words,
            rng,
            phase: Phase::Setup,
            round: None,
            imposter_visible: false,
            pending: PendingAction::None,
            dirty: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Players in reveal order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Category flags.
    pub fn categories(&self) -> &CategorySelection {
        &self.categories
    }

    /// Word lists in use.
    pub fn words(&self) -> &WordBank {
        &self.words
    }

    /// The round being played, if any.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Whether the imposter has been revealed in discussion.
    pub fn imposter_visible(&self) -> bool {
        self.imposter_visible
    }

    /// Dialog awaiting the user.
    pub fn pending(&self) -> &PendingAction {
        &self.pending
    }

    /// Copies out the durable state.
    #[instrument(skip(self))]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.categories.clone(), self.roster.clone())
    }

    /// Returns whether durable state changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // ─────────────────────────────────────────────────────────────
    //  Setup: roster and categories
    // ─────────────────────────────────────────────────────────────

    fn ensure_setup(&self) -> Result<(), RosterError> {
        if self.phase != Phase::Setup {
            warn!(phase = self.phase.label(), "Setup edit rejected during round");
            return Err(RosterError::RoundActive);
        }
        Ok(())
    }

    /// Adds a player at the end of the roster.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] for a blank name or outside setup.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, RosterError> {
        self.ensure_setup()?;
        let id = self.roster.add(name, &mut self.rng)?;
        self.dirty = true;
        Ok(id)
    }

    /// Renames a player.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] for a blank name, an unknown id, or outside setup.
    #[instrument(skip(self), fields(player_id = %id))]
    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> Result<(), RosterError> {
        self.ensure_setup()?;
        self.roster.rename(id, name)?;
        self.dirty = true;
        Ok(())
    }

    /// Removes a player.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] for an unknown id or outside setup.
    #[instrument(skip(self), fields(player_id = %id))]
    pub fn remove_player(&mut self, id: &PlayerId) -> Result<Player, RosterError> {
        self.ensure_setup()?;
        let removed = self.roster.remove(id)?;
        self.dirty = true;
        Ok(removed)
    }

    /// Replaces the roster order with a full reordered list.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError`] if the list is not a permutation of the roster,
    /// or outside setup.
    #[instrument(skip(self, reordered))]
    pub fn reorder_players(&mut self, reordered: Vec<Player>) -> Result<(), RosterError> {
        self.ensure_setup()?;
        self.roster.reorder(reordered)?;
        self.dirty = true;
        Ok(())
    }

    /// Moves the player at `index` to `target` by swapping them.
    ///
    /// Returns `Ok(false)` when either index is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::RoundActive`] outside setup.
    #[instrument(skip(self))]
    pub fn move_player(&mut self, index: usize, target: usize) -> Result<bool, RosterError> {
        self.ensure_setup()?;
        match self.roster.with_swapped(index, target) {
            Some(order) => {
                self.reorder_players(order)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flips a category and returns its new state.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::RoundActive`] outside setup.
    #[instrument(skip(self), fields(category = %key.as_ref()))]
    pub fn toggle_category(&mut self, key: CategoryKey) -> Result<bool, RosterError> {
        self.ensure_setup()?;
        let enabled = self.categories.toggle(key);
        debug!(enabled, "Category toggled");
        self.dirty = true;
        Ok(enabled)
    }

    // ─────────────────────────────────────────────────────────────
    //  Round lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Validates and deals a fresh round, entering [`Phase::Reveal`].
    ///
    /// Works from setup and from discussion ("new round"). On a validation
    /// failure an info dialog is raised and nothing else changes.
    ///
    /// # Errors
    ///
    /// Returns the [`StartError`] that stopped the round.
    #[instrument(skip(self), fields(phase = self.phase.label()))]
    pub fn start_round(&mut self) -> Result<(), StartError> {
        if self.phase == Phase::Reveal {
            return Err(StartError::RevealUnderway);
        }

        let dealt = RoundPreconditions::check(self.roster.len(), &self.categories, &self.words)
            .and_then(|enabled| {
                RoundState::deal(self.roster.len(), &enabled, &self.words, &mut self.rng)
            });

        match dealt {
            Ok(round) => {
                info!(category = %round.category().as_ref(), "Round started");
                self.round = Some(round);
                self.imposter_visible = false;
                self.phase = Phase::Reveal;
                Ok(())
            }
            Err(e) => {
                self.pending =
                    PendingAction::Info(InfoDialog::new(e.title().to_string(), e.to_string()));
                Err(e)
            }
        }
    }

    /// Flips the current player's card face up. No-op without a round in reveal.
    #[instrument(skip(self))]
    pub fn show_secret(&mut self) -> bool {
        if self.phase != Phase::Reveal {
            return false;
        }
        match self.round.as_mut() {
            Some(round) => round.show_secret(),
            None => false,
        }
    }

    /// Hands the device to the next player.
    ///
    /// Only acts once the current card has been shown. Enters discussion after
    /// the last player.
    #[instrument(skip(self))]
    pub fn next_player(&mut self) -> Option<Advance> {
        if self.phase != Phase::Reveal {
            return None;
        }
        let round = self.round.as_mut()?;
        if *round.step() != RevealStep::Secret {
            debug!("Card not shown yet, ignoring next");
            return None;
        }
        let advance = round.advance()?;
        if advance == Advance::Complete {
            info!("Reveal complete, entering discussion");
            self.phase = Phase::Discussion;
        }
        Some(advance)
    }

    /// Player whose turn it is during reveal.
    pub fn current_player(&self) -> Option<&Player> {
        let round = self.round.as_ref()?;
        self.roster.get((*round.current_reveal_index())?)
    }

    /// The current player's card, only while it is face up.
    pub fn current_card(&self) -> Option<SecretCard> {
        let round = self.round.as_ref()?;
        if *round.step() != RevealStep::Secret {
            return None;
        }
        Some(round.card_for((*round.current_reveal_index())?))
    }

    /// The imposter, once revealed in discussion.
    pub fn imposter(&self) -> Option<&Player> {
        if !self.imposter_visible {
            return None;
        }
        let round = self.round.as_ref()?;
        self.roster.get(*round.imposter_index())
    }

    /// Asks for confirmation before revealing the imposter.
    #[instrument(skip(self))]
    pub fn request_reveal_imposter(&mut self) -> bool {
        if self.phase != Phase::Discussion || self.round.is_none() {
            return false;
        }
        self.pending = PendingAction::Confirm(ConfirmDialog::reveal_imposter());
        true
    }

    /// Asks for confirmation before abandoning the round.
    #[instrument(skip(self))]
    pub fn request_reset_to_setup(&mut self) -> bool {
        if self.phase == Phase::Setup {
            return false;
        }
        self.pending = PendingAction::Confirm(ConfirmDialog::reset_to_setup());
        true
    }

    /// Accepts the open dialog, running its deferred action.
    ///
    /// Returns the action that ran, if the dialog was a confirmation.
    #[instrument(skip(self))]
    pub fn confirm(&mut self) -> Option<ConfirmAction> {
        match std::mem::take(&mut self.pending) {
            PendingAction::Confirm(dialog) => {
                let action = *dialog.on_confirm();
                debug!(action = ?action, "Dialog confirmed");
                match action {
                    ConfirmAction::ResetToSetup => self.reset_to_setup(),
                    ConfirmAction::RevealImposter => self.reveal_imposter(),
                }
                Some(action)
            }
            PendingAction::Info(_) | PendingAction::None => None,
        }
    }

    /// Closes the open dialog without running anything.
    #[instrument(skip(self))]
    pub fn dismiss(&mut self) {
        if !self.pending.is_none() {
            debug!("Dialog dismissed");
        }
        self.pending = PendingAction::None;
    }

    /// Discards the round and returns to setup.
    #[instrument(skip(self))]
    fn reset_to_setup(&mut self) {
        info!(phase = self.phase.label(), "Returning to setup");
        self.imposter_visible = false;
        self.round = None;
        self.phase = Phase::Setup;
    }

    fn reveal_imposter(&mut self) {
        if self.phase == Phase::Discussion && self.round.is_some() {
            info!("Imposter revealed");
            self.imposter_visible = true;
        }
    }
}
