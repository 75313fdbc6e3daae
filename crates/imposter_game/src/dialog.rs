//! Modal dialogs requested by the engine.
//!
//! The engine never calls into the presentation layer. It records the dialog
//! it wants shown as a [`PendingAction`]; the front-end renders it and reports
//! back through [`RoundEngine::confirm`](crate::RoundEngine::confirm) or
//! [`RoundEngine::dismiss`](crate::RoundEngine::dismiss).

use derive_getters::Getters;
use derive_new::new;

/// Deferred action executed only when a confirmation dialog is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Discard the round and return to setup.
    ResetToSetup,
    /// Show who the imposter was.
    RevealImposter,
}

/// Single-button acknowledgement dialog.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct InfoDialog {
    title: String,
    body: String,
}

/// Two-button dialog guarding a [`ConfirmAction`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct ConfirmDialog {
    title: String,
    body: String,
    confirm_label: String,
    cancel_label: String,
    destructive: bool,
    on_confirm: ConfirmAction,
}

impl ConfirmDialog {
    /// Confirmation for leaving a round in progress.
    pub fn reset_to_setup() -> Self {
        Self::new(
            "Confirm".to_string(),
            "End the round and go back to setup? The current round will be lost.".to_string(),
            "Yes, end it".to_string(),
            "Cancel".to_string(),
            true,
            ConfirmAction::ResetToSetup,
        )
    }

    /// Confirmation for revealing the imposter.
    pub fn reveal_imposter() -> Self {
        Self::new(
            "Confirm".to_string(),
            "Reveal the imposter?".to_string(),
            "Yes, reveal".to_string(),
            "Cancel".to_string(),
            false,
            ConfirmAction::RevealImposter,
        )
    }
}

/// Dialog currently awaiting the user, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingAction {
    /// Nothing is being shown.
    #[default]
    None,
    /// An acknowledgement is being shown.
    Info(InfoDialog),
    /// A confirmation is being shown; its action runs only on confirm.
    Confirm(ConfirmDialog),
}

impl PendingAction {
    /// Returns true when no dialog is open.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
