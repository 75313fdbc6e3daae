//! Pass-and-play terminal table.

mod controller;
mod dialog;
mod screen;
mod screens;

pub use controller::{ActiveScreen, TableController};
pub use dialog::center_rect;
pub use screen::{Screen, ScreenTransition, Table};
pub use screens::{DiscussionScreen, Focus, InputMode, RevealScreen, SetupScreen};

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use imposter_game::{RoundEngine, ThreadRandom, WordBank};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::storage::{FileStore, StatePersistence};

/// Runs the table until the players quit.
///
/// Nothing is saved before the stored state has been loaded, so a slow read
/// can never be clobbered by the empty defaults.
#[instrument(skip(config))]
pub async fn run_table(config: &AppConfig) -> Result<()> {
    let words = config.word_bank()?;
    let persistence = StatePersistence::new(
        FileStore::new(config.state_file().clone()),
        config.storage_key().clone(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = hydrate_and_run(&mut terminal, persistence, words).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = res {
        error!(error = ?err, "Table loop error");
    }
    info!("Table closed");
    res
}

/// Shows a placeholder while the saved state loads, then hands over to the controller.
#[instrument(skip_all)]
async fn hydrate_and_run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    persistence: StatePersistence<FileStore>,
    words: WordBank,
) -> Result<()> {
    terminal.draw(|f| {
        let loading = Paragraph::new("Loading…")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, center_rect(f.area(), 30, 3));
    })?;

    let snapshot = persistence.load().await;
    let engine = RoundEngine::new(snapshot, words, ThreadRandom::new());
    let mut controller = TableController::new(engine, persistence);
    controller.run(terminal).await
}
