//! Screen trait and transition type for the table state machine.

use crossterm::event::KeyEvent;
use imposter_game::{Phase, RoundEngine, ThreadRandom};
use ratatui::Frame;

/// Engine type driven by the terminal front-end.
pub type Table = RoundEngine<ThreadRandom>;

/// The result of handling an input event on a screen.
///
/// Phase changes are read back from the engine, so screens only report
/// whether the application should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Keep running.
    Stay,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by the screen for each [`Phase`].
///
/// Each screen owns its own view state (cursors, text input), renders the
/// engine and turns key events into engine operations.
pub trait Screen {
    /// The phase this screen presents.
    fn phase(&self) -> Phase;

    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, table: &Table);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, table: &mut Table) -> ScreenTransition;
}
