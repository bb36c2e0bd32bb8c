//! The event loop: draw, poll input, drain fetch replies, update state.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::app::fetch::{self, FetchKind, FetchPayload, FetchReply};
use crate::app::keymap::KeyAction;
use crate::app::nav::{self, Route};
use crate::app::{AppConfig, AppState, InputMode, LoadState, View};
use crate::error::InvalidIdentifier;
use crate::query;
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    cfg: &AppConfig,
) -> Result<()> {
    let client = ApiClient::new(&cfg.base_url)
        .map_err(|e| anyhow::anyhow!("build api client for {}: {}", cfg.base_url, e))?;
    info!(base_url = client.base_url(), "api client ready");
    let (tx, rx) = mpsc::channel();
    let mut app = AppState::new(cfg);

    match Route::from_startup_arg(cfg.user.as_deref()) {
        Ok(Route::List) => mount_list(&mut app, &client, &tx),
        Ok(Route::UserDetail(id)) => mount_detail(&mut app, &client, &tx, id),
        Err(err) => mount_detail_invalid(&mut app, &err),
    }

    loop {
        while let Ok(reply) = rx.try_recv() {
            handle_reply(&mut app, reply);
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, &client, &tx, key) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Enter the list view and issue its fetch. Nothing carries over from a
/// previous visit: query, page and selection start fresh.
fn mount_list(app: &mut AppState, client: &ApiClient, tx: &Sender<FetchReply>) {
    app.view = View::List;
    app.users = LoadState::Loading;
    app.filtered.clear();
    app.search_query.clear();
    app.page = 1;
    app.selected = 0;
    app.seq += 1;
    app.list_seq = app.seq;
    app.detail_seq = 0;
    info!(seq = app.seq, "mounting list view");
    fetch::spawn_fetch(client.clone(), FetchKind::UserList, app.seq, tx.clone());
}

/// Enter the detail view for `id` and issue its fetch.
fn mount_detail(app: &mut AppState, client: &ApiClient, tx: &Sender<FetchReply>, id: u64) {
    app.view = View::Detail;
    app.input_mode = InputMode::Normal;
    app.detail = LoadState::Loading;
    app.detail_id = Some(id);
    app.seq += 1;
    app.detail_seq = app.seq;
    app.list_seq = 0;
    info!(seq = app.seq, id, "mounting detail view");
    fetch::spawn_fetch(client.clone(), FetchKind::UserDetail(id), app.seq, tx.clone());
}

/// Enter the detail view in its error state for an identifier that did not
/// parse. No request is issued.
fn mount_detail_invalid(app: &mut AppState, err: &InvalidIdentifier) {
    app.view = View::Detail;
    app.input_mode = InputMode::Normal;
    app.detail = LoadState::Error(err.to_string());
    app.detail_id = None;
    app.detail_seq = 0;
    app.list_seq = 0;
    info!(raw = %err.0, "rejected user identifier, no fetch issued");
}

/// Apply an incoming fetch reply, unless it has been superseded.
///
/// A reply is stale when its sequence token is not the one most recently
/// issued for its view (including after the view was left); stale replies
/// are dropped, so the latest request wins regardless of arrival order.
pub fn handle_reply(app: &mut AppState, reply: FetchReply) {
    match reply.payload {
        FetchPayload::Users(result) => {
            if reply.seq != app.list_seq {
                debug!(seq = reply.seq, latest = app.list_seq, "dropping stale user list reply");
                return;
            }
            app.list_seq = 0;
            match result {
                Ok(users) => {
                    info!(count = users.len(), "user list loaded");
                    app.users = LoadState::Ready(users);
                    apply_search(app);
                }
                Err(e) => {
                    warn!(status = e.status, message = %e.message, "user list fetch failed");
                    app.users = LoadState::Error(e.message);
                    app.filtered.clear();
                }
            }
        }
        FetchPayload::User(result) => {
            if reply.seq != app.detail_seq {
                debug!(seq = reply.seq, latest = app.detail_seq, "dropping stale user reply");
                return;
            }
            app.detail_seq = 0;
            match result {
                Ok(user) => {
                    info!(id = user.id, "user loaded");
                    app.detail = LoadState::Ready(user);
                }
                Err(e) => {
                    warn!(status = e.status, message = %e.message, "user fetch failed");
                    app.detail = LoadState::Error(e.message);
                }
            }
        }
    }
}

/// Recompute the filtered set from the current query and reset to the
/// first page. Runs on every search keystroke.
pub fn apply_search(app: &mut AppState) {
    match app.users.ready() {
        Some(users) => app.filtered = query::filter_users(users, &app.search_query),
        None => app.filtered.clear(),
    }
    app.page = 1;
    app.selected = 0;
}

/// Move to `page`, clamped to the valid range. Re-paginates only; never
/// re-fetches.
pub fn set_page(app: &mut AppState, page: usize) {
    app.page = page.clamp(1, app.max_page());
    app.selected = 0;
}

/// Navigate to a user by a raw identifier string, as typed in the goto
/// input or passed on the command line. A string that does not parse as an
/// unsigned integer puts the detail view into its invalid-identifier error
/// state and issues no request.
pub fn goto_user(app: &mut AppState, client: &ApiClient, tx: &Sender<FetchReply>, raw: &str) {
    match nav::parse_user_id(raw) {
        Ok(id) => mount_detail(app, client, tx, id),
        Err(err) => mount_detail_invalid(app, &err),
    }
}

fn handle_key(
    app: &mut AppState,
    client: &ApiClient,
    tx: &Sender<FetchReply>,
    key: KeyEvent,
) -> bool {
    if app.show_help {
        app.show_help = false;
        return false;
    }
    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, client, tx, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Goto => handle_goto_key(app, client, tx, key),
    }
    false
}

fn handle_normal_key(
    app: &mut AppState,
    client: &ApiClient,
    tx: &Sender<FetchReply>,
    key: KeyEvent,
) -> bool {
    let Some(action) = app.keymap.resolve(&key) else {
        return false;
    };
    match action {
        KeyAction::Quit => return true,
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::StartSearch => {
            if app.view == View::List {
                app.search_query.clear();
                apply_search(app);
                app.input_mode = InputMode::Search;
            }
        }
        KeyAction::GotoUser => {
            app.goto_input.clear();
            app.input_mode = InputMode::Goto;
        }
        KeyAction::Refresh => match app.view {
            View::List => mount_list(app, client, tx),
            View::Detail => {
                if let Some(id) = app.detail_id {
                    mount_detail(app, client, tx, id);
                }
            }
        },
        KeyAction::Back => {
            if app.view == View::Detail {
                mount_list(app, client, tx);
            }
        }
        KeyAction::EnterDetail => {
            if app.view == View::List {
                if let Some(user) = app.current_page().items.get(app.selected) {
                    let id = user.id;
                    mount_detail(app, client, tx, id);
                }
            }
        }
        KeyAction::MoveUp => {
            if app.selected > 0 {
                app.selected -= 1;
            }
        }
        KeyAction::MoveDown => {
            let rows = app.current_page().items.len();
            if app.selected + 1 < rows {
                app.selected += 1;
            }
        }
        KeyAction::PrevPage => {
            if app.view == View::List && app.page > 1 {
                set_page(app, app.page - 1);
            }
        }
        KeyAction::NextPage => {
            if app.view == View::List && app.page < app.max_page() {
                set_page(app, app.page + 1);
            }
        }
        KeyAction::Ignore => {}
    }
    false
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_query.clear();
            apply_search(app);
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            apply_search(app);
        }
        // Filter re-runs on every keystroke; there is no debounce.
        KeyCode::Char(c) => {
            app.search_query.push(c);
            apply_search(app);
        }
        _ => {}
    }
}

fn handle_goto_key(app: &mut AppState, client: &ApiClient, tx: &Sender<FetchReply>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.goto_input.clear();
        }
        KeyCode::Backspace => {
            app.goto_input.pop();
        }
        KeyCode::Enter => {
            let raw = std::mem::take(&mut app.goto_input);
            app.input_mode = InputMode::Normal;
            goto_user(app, client, tx, &raw);
        }
        KeyCode::Char(c) => app.goto_input.push(c),
        _ => {}
    }
}
