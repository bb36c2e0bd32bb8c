//! List view: the paginated user table and its footer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::{AppState, LoadState};
use crate::query::Page;

pub fn render_list(f: &mut Frame, area: Rect, app: &mut AppState) {
    match &app.users {
        LoadState::Loading => {
            let p = Paragraph::new("Loading users…")
                .style(Style::default().fg(app.theme.loading_fg))
                .block(bordered_block("Users", app));
            f.render_widget(p, area);
        }
        LoadState::Error(msg) => {
            let p = Paragraph::new(format!("{msg}\n\nr: retry   q: quit"))
                .style(Style::default().fg(app.theme.error_fg))
                .block(bordered_block("Users", app));
            f.render_widget(p, area);
        }
        LoadState::Ready(_) => render_table(f, area, app),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(area);

    let page = app.current_page();

    let rows = page.items.iter().enumerate().map(|(i, u)| {
        let style = if i == app.selected {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(format!("@{}", u.username)),
            Cell::from(u.email.clone()),
            Cell::from(u.phone.clone()),
            Cell::from(u.company.name.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(24),
        Constraint::Percentage(14),
        Constraint::Percentage(26),
        Constraint::Percentage(18),
        Constraint::Percentage(18),
    ];

    let header = Row::new(vec!["NAME", "HANDLE", "EMAIL", "PHONE", "COMPANY"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered_block("Users", app))
        .column_spacing(1);

    f.render_widget(table, chunks[0]);
    render_footer(f, chunks[1], app, &page);
}

fn render_footer(f: &mut Frame, area: Rect, app: &AppState, page: &Page) {
    if page.total == 0 {
        let msg = if app.search_query.trim().is_empty() {
            "No users".to_string()
        } else {
            format!("No users match '{}'", app.search_query)
        };
        let p = Paragraph::new(msg).style(Style::default().fg(app.theme.muted));
        f.render_widget(p, area);
        return;
    }
    if page.total_pages <= 1 {
        let p = Paragraph::new(format!("Showing all {} users", page.total))
            .style(Style::default().fg(app.theme.muted));
        f.render_widget(p, area);
        return;
    }

    let first = (page.page - 1) * page.limit + 1;
    let last = (page.page * page.limit).min(page.total);
    let enabled = Style::default().fg(app.theme.text);
    let disabled = Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM);
    let line = Line::from(vec![
        Span::styled("◀ h  ", if page.page > 1 { enabled } else { disabled }),
        Span::styled(
            format!(
                "Showing {first} to {last} of {} users — page {} of {}",
                page.total, page.page, page.total_pages
            ),
            Style::default().fg(app.theme.text),
        ),
        Span::styled("  l ▶", if page.page < page.total_pages { enabled } else { disabled }),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn bordered_block(title: &str, app: &AppState) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}
