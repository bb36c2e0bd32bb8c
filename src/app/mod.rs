//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state, the theme
//! configuration, and re-exports the event loop entry point (`run`).

pub mod fetch;
pub mod keymap;
pub mod nav;
pub mod update;

use ratatui::style::Color;

use crate::api::{self, User};
use crate::query;

/// Which screen is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Goto,
}

/// The three states a fetched view can be in.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error_fg: Color,
    pub loading_fg: Color,
}

impl Theme {
    /// Dark default theme.
    #[allow(dead_code)]
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            error_fg: Color::Red,
            loading_fg: Color::DarkGray,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),     // red
            loading_fg: Color::Rgb(0x7f, 0x84, 0x9c),   // overlay1
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error_fg" => theme.error_fg = color,
                    "loading_fg" => theme.loading_fg = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or the special name "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // For named colors, emit a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut buf = String::new();
        buf.push_str("# userdir-browser theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");
        let entries = [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("error_fg", self.error_fg),
            ("loading_fg", self.loading_fg),
        ];
        for (key, color) in entries {
            let _ = writeln!(&mut buf, "{} = {}", key, color_to_str(color));
        }

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on parse errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        let _ = theme.write_file(path);
        theme
    }
}

/// Startup configuration resolved from the command line.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Raw `--user` argument; parsed (and possibly rejected) at startup.
    pub user: Option<String>,
    pub theme_path: String,
    pub keybinds_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            page_size: 5,
            user: None,
            theme_path: "theme.conf".to_string(),
            keybinds_path: "keybinds.conf".to_string(),
        }
    }
}

pub struct AppState {
    pub view: View,
    pub input_mode: InputMode,
    /// The full collection as last fetched for the list view.
    pub users: LoadState<Vec<User>>,
    /// Subset of `users` matching the current search query, input order kept.
    pub filtered: Vec<User>,
    pub search_query: String,
    /// 1-based page into `filtered`; always within `[1, max_page()]`.
    pub page: usize,
    pub page_size: usize,
    /// Selected row within the current page.
    pub selected: usize,
    pub detail: LoadState<User>,
    /// Identifier the detail view was opened for; `None` after a rejected
    /// goto/startup identifier (no request was made for it).
    pub detail_id: Option<u64>,
    pub goto_input: String,
    pub show_help: bool,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    /// Last issued fetch sequence token.
    pub seq: u64,
    /// Token of the list fetch currently awaited; 0 when none is.
    pub list_seq: u64,
    /// Token of the detail fetch currently awaited; 0 when none is.
    pub detail_seq: u64,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            view: View::List,
            input_mode: InputMode::Normal,
            users: LoadState::Loading,
            filtered: Vec::new(),
            search_query: String::new(),
            page: 1,
            page_size: cfg.page_size.max(1),
            selected: 0,
            detail: LoadState::Loading,
            detail_id: None,
            goto_input: String::new(),
            show_help: false,
            theme: Theme::load_or_init(&cfg.theme_path),
            keymap: keymap::Keymap::load_or_init(&cfg.keybinds_path),
            seq: 0,
            list_seq: 0,
            detail_seq: 0,
        }
    }

    /// The page of the filtered set currently on screen.
    pub fn current_page(&self) -> query::Page {
        query::paginate_users(&self.filtered, self.page, self.page_size)
    }

    /// Highest selectable page; an empty filtered set still has one
    /// (empty) view page.
    pub fn max_page(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
