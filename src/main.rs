//! userdir-browser binary entry point.
//!
//! Parses the command line, optionally enables file logging, initializes
//! the terminal in raw mode, runs the TUI event loop, and restores the
//! terminal state on exit.

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::AppConfig;
use crate::error::Result;

mod api;
mod app;
mod error;
mod query;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "userdir-browser", version, about = "Browse a remote user directory from the terminal")]
struct Cli {
    /// Base URL of the users API.
    #[arg(long, env = "USERDIR_BASE_URL", default_value = api::DEFAULT_BASE_URL)]
    base_url: String,

    /// Rows per page in the list view.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    page_size: u16,

    /// Open the detail view for this user identifier on startup.
    #[arg(long)]
    user: Option<String>,

    /// Theme configuration file (seeded on first run).
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybindings configuration file (seeded on first run).
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,

    /// Write logs to this file; logging is off otherwise. RUST_LOG is honored.
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Route tracing output to a file; stdout belongs to the TUI.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path).map_err(|e| format!("init logging: {}", e))?;
    }
    let cfg = AppConfig {
        base_url: cli.base_url,
        page_size: usize::from(cli.page_size),
        user: cli.user,
        theme_path: cli.theme,
        keybinds_path: cli.keybinds,
    };

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &cfg);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
