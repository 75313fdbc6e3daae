//! Setup screen for categories and players.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use imposter_game::{CategoryKey, Phase, PlayerId};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, info, instrument, warn};

use crate::table::dialog::center_rect;
use crate::table::screen::{Screen, ScreenTransition, Table};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The category chips.
    Categories,
    /// The player list.
    Players,
}

/// Text entry state of the setup screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Navigating; no text entry.
    Browse,
    /// Typing a new player's name.
    Adding(String),
    /// Editing an existing player in the edit dialog.
    Editing {
        /// Player being edited.
        id: PlayerId,
        /// Name as typed so far.
        name: String,
    },
}

/// State for the setup screen.
#[derive(Debug, Getters)]
pub struct SetupScreen {
    focus: Focus,
    input: InputMode,
    category_cursor: usize,
    list_state: ListState,
}

impl SetupScreen {
    /// Creates a setup screen with the first player selected.
    #[instrument(skip(table))]
    pub fn new(table: &Table) -> Self {
        debug!(players = table.roster().len(), "Initializing SetupScreen");
        let mut list_state = ListState::default();
        if !table.roster().is_empty() {
            list_state.select(Some(0));
        }
        Self {
            focus: Focus::Players,
            input: InputMode::Browse,
            category_cursor: 0,
            list_state,
        }
    }

    fn category_at_cursor(&self) -> Option<CategoryKey> {
        CategoryKey::all().nth(self.category_cursor)
    }

    /// Moves the category cursor, wrapping at both ends.
    #[instrument(skip(self))]
    fn move_category_cursor(&mut self, forward: bool) {
        let count = CategoryKey::all().count();
        self.category_cursor = if forward {
            (self.category_cursor + 1) % count
        } else {
            (self.category_cursor + count - 1) % count
        };
    }

    /// Moves the player selection, wrapping at both ends.
    #[instrument(skip(self, table))]
    fn move_selection(&mut self, table: &Table, forward: bool) {
        let count = table.roster().len();
        if count == 0 {
            self.list_state.select(None);
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if forward => (i + 1) % count,
            Some(i) => (i + count - 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Swaps the selected player with its neighbour and keeps it selected.
    #[instrument(skip(self, table))]
    fn move_selected_player(&mut self, table: &mut Table, down: bool) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let target = if down {
            index + 1
        } else if index > 0 {
            index - 1
        } else {
            return;
        };
        match table.move_player(index, target) {
            Ok(true) => self.list_state.select(Some(target)),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Reorder rejected"),
        }
    }

    /// Keeps the selection inside the roster after it shrinks or grows.
    fn clamp_selection(&mut self, table: &Table) {
        let count = table.roster().len();
        match self.list_state.selected() {
            _ if count == 0 => self.list_state.select(None),
            Some(i) if i >= count => self.list_state.select(Some(count - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    /// Opens the edit dialog for the selected player.
    #[instrument(skip(self, table))]
    fn open_editor(&mut self, table: &Table) {
        let selected = self
            .list_state
            .selected()
            .and_then(|i| table.roster().get(i));
        if let Some(player) = selected {
            debug!(player_id = %player.id(), "Editing player");
            self.input = InputMode::Editing {
                id: player.id().clone(),
                name: player.name().clone(),
            };
        }
    }

    #[instrument(skip(self, key, table))]
    fn handle_adding(&mut self, key: KeyEvent, table: &mut Table) {
        let InputMode::Adding(buffer) = &mut self.input else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                // A blank name is ignored and the field stays open.
                if let Ok(id) = table.add_player(buffer) {
                    buffer.clear();
                    let index = table.roster().position(&id);
                    self.list_state.select(index);
                }
            }
            KeyCode::Esc => self.input = InputMode::Browse,
            _ => {}
        }
    }

    #[instrument(skip(self, key, table))]
    fn handle_editing(&mut self, key: KeyEvent, table: &mut Table) {
        let InputMode::Editing { id, name } = &mut self.input else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => name.push(c),
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Enter => {
                if name.trim().is_empty() {
                    return;
                }
                match table.rename_player(id, name) {
                    Ok(()) => self.input = InputMode::Browse,
                    Err(e) => warn!(error = %e, "Rename rejected"),
                }
            }
            KeyCode::Delete => {
                match table.remove_player(id) {
                    Ok(removed) => info!(name = %removed.name(), "Player deleted from editor"),
                    Err(e) => warn!(error = %e, "Delete rejected"),
                }
                self.input = InputMode::Browse;
                self.clamp_selection(table);
            }
            KeyCode::Esc => self.input = InputMode::Browse,
            _ => {}
        }
    }

    #[instrument(skip(self, key, table))]
    fn handle_browse(&mut self, key: KeyEvent, table: &mut Table) -> ScreenTransition {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Categories => Focus::Players,
                    Focus::Players => Focus::Categories,
                };
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.input = InputMode::Adding(String::new());
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if let Err(e) = table.start_round() {
                    info!(reason = %e, "Round not started");
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return ScreenTransition::Quit,
            _ => match self.focus {
                Focus::Categories => self.handle_categories(key, table),
                Focus::Players => self.handle_players(key, table),
            },
        }
        ScreenTransition::Stay
    }

    fn handle_categories(&mut self, key: KeyEvent, table: &mut Table) {
        match key.code {
            KeyCode::Left | KeyCode::Up => self.move_category_cursor(false),
            KeyCode::Right | KeyCode::Down => self.move_category_cursor(true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(category) = self.category_at_cursor()
                    && let Err(e) = table.toggle_category(category)
                {
                    warn!(error = %e, "Toggle rejected");
                }
            }
            _ => {}
        }
    }

    fn handle_players(&mut self, key: KeyEvent, table: &mut Table) {
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up if shifted => self.move_selected_player(table, false),
            KeyCode::Down if shifted => self.move_selected_player(table, true),
            KeyCode::Up => self.move_selection(table, false),
            KeyCode::Down => self.move_selection(table, true),
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => self.open_editor(table),
            _ => {}
        }
    }

    fn render_categories(&self, frame: &mut Frame, area: ratatui::layout::Rect, table: &Table) {
        let mut spans = Vec::new();
        for (i, key) in CategoryKey::all().enumerate() {
            let enabled = table.categories().is_enabled(key);
            let mut style = if enabled {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            if self.focus == Focus::Categories && i == self.category_cursor {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(format!(" {} ", key.label()), style));
            spans.push(Span::raw(" "));
        }
        let border = if self.focus == Focus::Categories {
            Color::Yellow
        } else {
            Color::White
        };
        let chips = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title("1) Categories"),
            );
        frame.render_widget(chips, area);
    }

    fn render_editor(&self, frame: &mut Frame) {
        let InputMode::Editing { name, .. } = &self.input else {
            return;
        };
        let area = center_rect(frame.area(), 50, 6);
        frame.render_widget(Clear, area);
        let text = vec![
            Line::from(Span::styled(
                format!("{}_", name),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: Save | Del: Delete | Esc: Cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let editor = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Edit player")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(editor, area);
    }
}

impl Screen for SetupScreen {
    fn phase(&self) -> Phase {
        Phase::Setup
    }

    #[instrument(skip(self, frame, table))]
    fn render(&self, frame: &mut Frame, table: &Table) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Who's the Imposter?",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from("Pick categories, add players, and start the round."),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        self.render_categories(frame, chunks[1], table);

        let items: Vec<ListItem> = table
            .roster()
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| ListItem::new(format!("{}. {}", i + 1, p.name())))
            .collect();
        let border = if self.focus == Focus::Players {
            Color::Yellow
        } else {
            Color::White
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!("2) Players ({})", table.roster().len())),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, chunks[2], &mut list_state);

        let (input_text, input_title, input_style) = match &self.input {
            InputMode::Adding(buffer) => (
                format!("{}_", buffer),
                "Player name (Enter to add, Esc to finish)",
                Style::default().fg(Color::White),
            ),
            _ => (
                String::new(),
                "Press 'a' to add a player",
                Style::default().fg(Color::DarkGray),
            ),
        };
        let input = Paragraph::new(input_text)
            .style(input_style)
            .block(Block::default().borders(Borders::ALL).title(input_title));
        frame.render_widget(input, chunks[3]);

        let help_text = match (&self.input, self.focus) {
            (InputMode::Adding(_), _) => "Type name | Enter: Add | Esc: Done",
            (_, Focus::Categories) => "←→: Move | Space: Toggle | Tab: Players | s: Start | q: Quit",
            (_, Focus::Players) => {
                "↑↓: Select | Shift+↑↓: Reorder | e: Edit | a: Add | Tab: Categories | s: Start | q: Quit"
            }
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[4]);

        self.render_editor(frame);
    }

    #[instrument(skip(self, key, table))]
    fn handle_key(&mut self, key: KeyEvent, table: &mut Table) -> ScreenTransition {
        match self.input {
            InputMode::Adding(_) => {
                self.handle_adding(key, table);
                ScreenTransition::Stay
            }
            InputMode::Editing { .. } => {
                self.handle_editing(key, table);
                ScreenTransition::Stay
            }
            InputMode::Browse => self.handle_browse(key, table),
        }
    }
}
