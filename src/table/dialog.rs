//! Modal overlay for the engine's pending dialog.

use crossterm::event::{KeyCode, KeyEvent};
use imposter_game::PendingAction;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tracing::{debug, instrument};

use crate::table::screen::Table;

/// Draws the pending dialog, if any, over whatever is on screen.
#[instrument(skip(frame, pending))]
pub fn render(frame: &mut Frame, pending: &PendingAction) {
    let (title, body, buttons) = match pending {
        PendingAction::None => return,
        PendingAction::Info(dialog) => (
            dialog.title().as_str(),
            dialog.body().as_str(),
            Line::from(Span::styled(
                "[Enter] OK",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ),
        PendingAction::Confirm(dialog) => {
            let confirm_color = if *dialog.destructive() {
                Color::Red
            } else {
                Color::Green
            };
            (
                dialog.title().as_str(),
                dialog.body().as_str(),
                Line::from(vec![
                    Span::styled(
                        format!("[Enter/y] {}", dialog.confirm_label()),
                        Style::default().fg(confirm_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("    "),
                    Span::styled(
                        format!("[Esc/n] {}", dialog.cancel_label()),
                        Style::default().fg(Color::Gray),
                    ),
                ]),
            )
        }
    };

    let area = center_rect(frame.area(), 60, 9);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let text = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, rows[0]);
    frame.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), rows[1]);
}

/// Routes a key to the open dialog. Returns false if no dialog is open.
#[instrument(skip(key, table))]
pub fn handle_key(key: KeyEvent, table: &mut Table) -> bool {
    if table.pending().is_none() {
        return false;
    }
    let is_info = matches!(table.pending(), PendingAction::Info(_));

    if is_info {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            table.dismiss();
        }
        return true;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
            let action = table.confirm();
            debug!(action = ?action, "Confirmed from dialog");
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => table.dismiss(),
        _ => {}
    }
    true
}

/// Returns a `width` x `height` rectangle centered in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
