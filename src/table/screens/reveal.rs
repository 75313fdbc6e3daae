//! Reveal screen. The device goes around so each player sees their card.

use crossterm::event::{KeyCode, KeyEvent};
use imposter_game::{Phase, RevealStep, SecretCard};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, instrument};

use crate::table::screen::{Screen, ScreenTransition, Table};

/// Stateless view of the reveal sequence; all progress lives in the engine.
#[derive(Debug, Default)]
pub struct RevealScreen;

impl RevealScreen {
    /// Creates the reveal screen.
    pub fn new() -> Self {
        Self
    }

    fn card_lines(table: &Table) -> Vec<Line<'static>> {
        let name = table
            .current_player()
            .map(|p| p.name().clone())
            .unwrap_or_default();
        let Some(round) = table.round() else {
            return Vec::new();
        };

        match (*round.step(), table.current_card()) {
            (RevealStep::Secret, Some(card)) => {
                let secret = match card {
                    SecretCard::Word(word) => Line::from(Span::styled(
                        word,
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
                    SecretCard::Imposter => Line::from(Span::styled(
                        "You are the imposter!",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                };
                vec![
                    Line::from(Span::styled(name, Style::default().fg(Color::Cyan))),
                    Line::from(""),
                    Line::from(format!("Category: {}", round.category_label())),
                    Line::from(""),
                    secret,
                    Line::from(""),
                    Line::from("Memorize it, then pass the device on."),
                ]
            }
            _ => vec![
                Line::from("It's the turn of"),
                Line::from(""),
                Line::from(Span::styled(
                    name,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Make sure nobody else is looking at the screen.",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        }
    }
}

impl Screen for RevealScreen {
    fn phase(&self) -> Phase {
        Phase::Reveal
    }

    #[instrument(skip(self, frame, table))]
    fn render(&self, frame: &mut Frame, table: &Table) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let progress = table
            .round()
            .map(|r| {
                let seen = r.revealed().iter().filter(|shown| **shown).count();
                format!("Reveal: {}/{}", seen + 1, r.player_count())
            })
            .unwrap_or_default();
        let header = Paragraph::new(progress)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let card = Paragraph::new(Self::card_lines(table))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, chunks[1]);

        let help_text = match table.round().map(|r| *r.step()) {
            Some(RevealStep::Secret) => "Enter: Next player | x: End round | q: Quit",
            _ => "Enter: Show my card | x: End round | q: Quit",
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, table))]
    fn handle_key(&mut self, key: KeyEvent, table: &mut Table) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                let showing = table.round().map(|r| *r.step()) == Some(RevealStep::Secret);
                if showing {
                    let advance = table.next_player();
                    debug!(advance = ?advance, "Passed to next player");
                } else {
                    table.show_secret();
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
