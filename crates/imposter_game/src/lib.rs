//! Imposter game engine - roster, categories and the round state machine
//!
//! One device is passed around the table. Every player but one sees the same
//! secret word; the imposter sees only that they are the imposter.
//!
//! # Architecture
//!
//! - **Engine**: [`RoundEngine`] owns a session (setup → reveal → discussion)
//! - **Rules**: ordered preconditions for dealing a round
//! - **Dialogs**: the engine records the dialog it wants as a [`PendingAction`]
//! - **Snapshot**: the durable roster + category flags
//!
//! # Example
//!
//! ```
//! use imposter_game::{RoundEngine, ScriptedRandom, Snapshot, WordBank, Phase};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = RoundEngine::new(
//!     Snapshot::default(),
//!     WordBank::bundled()?,
//!     ScriptedRandom::default(),
//! );
//! for name in ["Ali", "Sara", "Omar"] {
//!     engine.add_player(name)?;
//! }
//! engine.start_round()?;
//! assert_eq!(engine.phase(), Phase::Reveal);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod category;
mod dialog;
mod engine;
mod player;
mod random;
mod round;
mod rules;
mod snapshot;
mod words;

pub use category::{CategoryKey, CategorySelection};
pub use dialog::{ConfirmAction, ConfirmDialog, InfoDialog, PendingAction};
pub use engine::{Phase, RoundEngine};
pub use player::{Player, PlayerId, Roster, RosterError};
pub use random::{RandomSource, ScriptedRandom, ThreadRandom};
pub use round::{Advance, RevealStep, RoundState, SecretCard};
pub use rules::{
    CategorySelected, EnoughPlayers, MIN_PLAYERS, MIN_WORDS_PER_CATEGORY, RoundPreconditions,
    StartError, WordListsLargeEnough,
};
pub use snapshot::Snapshot;
pub use words::{WordBank, WordBankError};
