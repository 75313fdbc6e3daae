//! Discussion screen, shown once everyone has seen their card.

use crossterm::event::{KeyCode, KeyEvent};
use imposter_game::Phase;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{info, instrument};

use crate::table::screen::{Screen, ScreenTransition, Table};

/// View of the discussion phase.
#[derive(Debug, Default)]
pub struct DiscussionScreen;

impl DiscussionScreen {
    /// Creates the discussion screen.
    pub fn new() -> Self {
        Self
    }
}

impl Screen for DiscussionScreen {
    fn phase(&self) -> Phase {
        Phase::Discussion
    }

    #[instrument(skip(self, frame, table))]
    fn render(&self, frame: &mut Frame, table: &Table) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(7),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Discussion",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from("Everyone has seen their card. Who's faking it?"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let category = table
            .round()
            .map(|r| r.category_label().clone())
            .unwrap_or_default();
        let imposter_line = match table.imposter() {
            Some(player) => Line::from(vec![
                Span::raw("The imposter was "),
                Span::styled(
                    player.name().clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                "The imposter is still hidden.",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let body = Paragraph::new(vec![
            Line::from(format!("Category: {}", category)),
            Line::from(""),
            imposter_line,
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, chunks[1]);

        let help = Paragraph::new("v: Reveal imposter | n: New round | x: End round | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, table))]
    fn handle_key(&mut self, key: KeyEvent, table: &mut Table) -> ScreenTransition {
        match key.code {
            KeyCode::Char('v') | KeyCode::Char('V') => {
                table.request_reveal_imposter();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                if let Err(e) = table.start_round() {
                    info!(reason = %e, "New round not started");
                }
            }
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => {
                table.request_reset_to_setup();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            _ => {}
        }
        ScreenTransition::Stay
    }
}
