pub mod components;
pub mod detail;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, View};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());

    let view_label = match app.view {
        View::List => "Users",
        View::Detail => "User",
    };
    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}▏", app.search_query),
        InputMode::Normal | InputMode::Goto => String::new(),
    };
    let p = Paragraph::new(format!(
        "userdir-browser  [{view_label}]{prompt}  {} users  — /: search; g: go to id; Enter: open; Esc: back; r: refresh; ?: help; q: quit",
        app.filtered.len()
    ))
    .block(
        Block::default()
            .title("userdir-browser")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, root[0]);

    match app.view {
        View::List => users::render_list(f, root[1], app),
        View::Detail => detail::render_detail(f, root[1], app),
    }

    components::render_status_bar(f, root[2], app);

    if app.input_mode == InputMode::Goto {
        components::render_goto_modal(f, f.area(), app);
    }
    if app.show_help {
        components::render_help_modal(f, f.area(), app);
    }
}
