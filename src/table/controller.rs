//! Table controller: the state machine driving the pass-and-play TUI.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use imposter_game::Phase;
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::storage::{KeyValueStore, StatePersistence};
use crate::table::dialog;
use crate::table::screen::{Screen, ScreenTransition, Table};
use crate::table::screens::{DiscussionScreen, RevealScreen, SetupScreen};

/// Active screen in the table state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Roster and category editing.
    Setup(SetupScreen),
    /// Per-player card reveal.
    Reveal(RevealScreen),
    /// Everyone has seen their card.
    Discussion(DiscussionScreen),
}

impl ActiveScreen {
    /// Builds the screen presenting `table`'s current phase.
    #[instrument(skip(table))]
    pub fn for_phase(table: &Table) -> Self {
        match table.phase() {
            Phase::Setup => Self::Setup(SetupScreen::new(table)),
            Phase::Reveal => Self::Reveal(RevealScreen::new()),
            Phase::Discussion => Self::Discussion(DiscussionScreen::new()),
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Setup(s) => s,
            Self::Reveal(s) => s,
            Self::Discussion(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Setup(s) => s,
            Self::Reveal(s) => s,
            Self::Discussion(s) => s,
        }
    }
}

/// Controller that owns the engine and persists roster changes.
///
/// Call [`TableController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct TableController<S> {
    engine: Table,
    persistence: StatePersistence<S>,
    screen: ActiveScreen,
}

impl<S> TableController<S>
where
    S: KeyValueStore + Clone + std::fmt::Debug + 'static,
{
    /// Creates a controller around an engine that was built from hydrated state.
    #[instrument(skip(engine, persistence))]
    pub fn new(engine: Table, persistence: StatePersistence<S>) -> Self {
        info!(players = engine.roster().len(), "Creating TableController");
        let screen = ActiveScreen::for_phase(&engine);
        Self {
            engine,
            persistence,
            screen,
        }
    }

    /// Draws the current screen and any open dialog.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, &self.engine);
        dialog::render(frame, self.engine.pending());
    }

    /// Handles one key press.
    ///
    /// An open dialog takes every key. Afterwards the screen follows the
    /// engine's phase and a changed roster or selection is saved in the
    /// background; the returned handle lets callers wait for that save.
    #[instrument(skip(self, key))]
    pub fn handle_key(&mut self, key: KeyEvent) -> (ScreenTransition, Option<JoinHandle<()>>) {
        let transition = if dialog::handle_key(key, &mut self.engine) {
            ScreenTransition::Stay
        } else {
            self.screen.as_screen_mut().handle_key(key, &mut self.engine)
        };

        self.sync_screen();

        let save = if self.engine.take_dirty() {
            debug!("Setup changed, saving");
            Some(self.persistence.save_detached(self.engine.snapshot()))
        } else {
            None
        };
        (transition, save)
    }

    /// Replaces the screen when the engine has moved to another phase.
    #[instrument(skip(self))]
    fn sync_screen(&mut self) {
        let phase = self.engine.phase();
        if self.screen.as_screen().phase() != phase {
            info!(phase = phase.label(), "Switching screen");
            self.screen = ActiveScreen::for_phase(&self.engine);
        }
    }

    /// Runs the event loop until the players quit.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting table event loop");
        let mut last_save: Option<JoinHandle<()>> = None;

        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let (transition, save) = self.handle_key(key);
                if save.is_some() {
                    last_save = save;
                }
                if transition == ScreenTransition::Quit {
                    info!("Table quitting");
                    if let Some(handle) = last_save.take()
                        && let Err(e) = handle.await
                    {
                        debug!(error = %e, "Final save task did not finish");
                    }
                    return Ok(());
                }
            }

            sleep(Duration::from_millis(10)).await;
        }
    }
}
