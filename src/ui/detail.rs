//! Detail view: one user's profile, company and address.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, LoadState};

pub fn render_detail(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.detail {
        LoadState::Loading => {
            let p = Paragraph::new("Loading user…")
                .style(Style::default().fg(app.theme.loading_fg))
                .block(titled_block("User", app));
            f.render_widget(p, area);
        }
        LoadState::Error(msg) => {
            let hint = if app.detail_id.is_some() {
                "Esc: back to list   r: retry"
            } else {
                "Esc: back to list"
            };
            let p = Paragraph::new(format!("{msg}\n\n{hint}"))
                .style(Style::default().fg(app.theme.error_fg))
                .block(titled_block("User", app));
            f.render_widget(p, area);
        }
        LoadState::Ready(user) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [Constraint::Length(7), Constraint::Length(5), Constraint::Min(7)].as_ref(),
                )
                .split(area);

            let profile = format!(
                "Name: {}\nHandle: @{}\nEmail: {}\nPhone: {}\nWebsite: https://{}",
                user.name, user.username, user.email, user.phone, user.website
            );
            let p = Paragraph::new(profile)
                .style(Style::default().fg(app.theme.text))
                .block(titled_block(&format!("Profile (id {})", user.id), app));
            f.render_widget(p, chunks[0]);

            let company = format!(
                "Name: {}\nCatchphrase: {}\nBs: {}",
                user.company.name, user.company.catch_phrase, user.company.bs
            );
            let p = Paragraph::new(company)
                .style(Style::default().fg(app.theme.text))
                .block(titled_block("Company", app));
            f.render_widget(p, chunks[1]);

            let address = format!(
                "Street: {}\nSuite: {}\nCity: {}\nZipcode: {}\nGeo: {}, {}",
                user.address.street,
                user.address.suite,
                user.address.city,
                user.address.zipcode,
                user.address.geo.lat,
                user.address.geo.lng
            );
            let p = Paragraph::new(address)
                .style(Style::default().fg(app.theme.text))
                .block(titled_block("Address", app));
            f.render_widget(p, chunks[2]);
        }
    }
}

fn titled_block(title: &str, app: &AppState) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}
