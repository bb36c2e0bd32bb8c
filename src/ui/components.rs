//! Shared UI components (status bar, modal helpers).
//!
//! Contains small building blocks reused by the list and detail screens.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::collections::{BTreeMap, BTreeSet};

use crate::app::keymap::{Keymap, format_action};
use crate::app::{AppState, InputMode, View};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Goto => "GOTO",
    };
    let total = match app.users.ready() {
        Some(users) => users.len().to_string(),
        None => "-".to_string(),
    };
    let page_info = match app.view {
        View::List => format!("  page:{}/{}", app.page, app.max_page()),
        View::Detail => String::new(),
    };
    let msg = format!(
        "mode: {mode}  users:{total}  matches:{}{page_info}",
        app.filtered.len()
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    Rect::new(x, y, w, h)
}

/// Render the go-to-user-by-id input modal.
pub fn render_goto_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let rect = centered_rect(40, 6, area);
    let body = format!(
        "User id: {}▏\n\nEnter: open   Esc: cancel",
        app.goto_input
    );
    let p = Paragraph::new(body).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Go to user")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal listing the current keybindings per action.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    // Group keys by action so multiple bindings show on one line.
    let mut by_action: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        by_action
            .entry(format_action(action))
            .or_default()
            .insert(Keymap::format_key(mods, code));
    }

    let mut body = String::new();
    for (action, keys) in &by_action {
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        body.push_str(&format!("{:<14} {}\n", action, keys.join(", ")));
    }
    body.push_str("\nAny key to close");

    let height = (by_action.len() as u16).saturating_add(5).min(area.height);
    let rect = centered_rect(48, height, area);
    let p = Paragraph::new(body).style(Style::default().fg(app.theme.text)).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
