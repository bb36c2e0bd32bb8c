//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the TUI. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Each action represents a distinct operation in the TUI. Multiple key
/// combinations can map to the same action (e.g., both 'j' and Down arrow
/// move down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start typing a search query (list view).
    StartSearch,
    /// Open the go-to-user-by-id input.
    GotoUser,
    /// Re-fetch the data behind the current view.
    Refresh,
    /// Display the help/keybindings reference.
    OpenHelp,
    /// Leave the detail view and return to the list.
    Back,
    /// Open the detail view for the selected row.
    EnterDetail,
    /// Move up in the current page.
    MoveUp,
    /// Move down in the current page.
    MoveDown,
    /// Move to the previous page of results.
    PrevPage,
    /// Move to the next page of results.
    NextPage,
    /// Ignore this key.
    Ignore,
}

/// Manages keybinding configuration and key-to-action resolution.
///
/// The keymap uses a canonical mapping from `(KeyModifiers, KeyCode)` pairs
/// to [`KeyAction`]s. It supports loading from and saving to a
/// configuration file, with sensible defaults if no custom config is
/// present.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Canonical mapping from (modifiers, code) to action.
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    ///
    /// Includes arrow keys and vim-style keys (hjkl) for navigation, and
    /// common keys like q (quit), / (search), g (goto), r (refresh).
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('g')), KeyAction::GotoUser);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Esc), KeyAction::Back);
        bindings.insert((M::NONE, Backspace), KeyAction::Back);
        bindings.insert((M::NONE, Enter), KeyAction::EnterDetail);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        // Page keys
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);

        Self { bindings }
    }

    /// Load a keymap from a file, or create defaults if the file doesn't exist.
    ///
    /// If the path does not exist a fresh default keymap is written there
    /// for future customization.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        let _ = km.write_file(path);
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// The file uses the format `<Action> = <KeySpec>` (the legacy
    /// `<KeySpec> = <Action>` order is also accepted). Parsing starts from
    /// the defaults and overrides with user-specified bindings.
    ///
    /// Returns `Some(keymap)` if the file exists and is readable; `None`
    /// otherwise.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            // Preferred format: Action = KeySpec
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            // Backward-compatible format: KeySpec = Action
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        Some(map)
    }

    /// Write the current keymap to a configuration file in a
    /// human-readable format, with comments describing the syntax.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# userdir-browser keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Backspace, Tab, Up, Down, Left, Right, PageUp, PageDown, /, g, r, j, k, h, l\n");
        buf.push_str("# Actions: Quit, StartSearch, GotoUser, Refresh, OpenHelp, Back, EnterDetail, MoveUp, MoveDown, PrevPage, NextPage, Ignore\n\n");

        // Emit a stable, readable subset of current bindings
        let dump = [
            ("q", KeyAction::Quit),
            ("/", KeyAction::StartSearch),
            ("g", KeyAction::GotoUser),
            ("r", KeyAction::Refresh),
            ("?", KeyAction::OpenHelp),
            ("Esc", KeyAction::Back),
            ("Enter", KeyAction::EnterDetail),
            ("Up", KeyAction::MoveUp),
            ("Down", KeyAction::MoveDown),
            ("Left", KeyAction::PrevPage),
            ("Right", KeyAction::NextPage),
            ("k", KeyAction::MoveUp),
            ("j", KeyAction::MoveDown),
            ("h", KeyAction::PrevPage),
            ("l", KeyAction::NextPage),
            ("PageUp", KeyAction::PrevPage),
            ("PageDown", KeyAction::NextPage),
        ];
        for (k, a) in dump {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its corresponding action, considering
    /// modifiers and key code.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Format a key (modifiers + code) into a human-readable spec like
    /// "Ctrl+q" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Backspace => "Backspace".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Backspace" => Backspace,
        "/" => Char('/'),
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let chars: Vec<char> = rest.chars().collect();
            if chars.len() == 1 {
                KeyCode::Char(chars[0])
            } else {
                return None;
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "GotoUser" => Some(KeyAction::GotoUser),
        "Refresh" => Some(KeyAction::Refresh),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "Back" => Some(KeyAction::Back),
        "EnterDetail" => Some(KeyAction::EnterDetail),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PrevPage" => Some(KeyAction::PrevPage),
        "NextPage" => Some(KeyAction::NextPage),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::GotoUser => "GotoUser",
        KeyAction::Refresh => "Refresh",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::Back => "Back",
        KeyAction::EnterDetail => "EnterDetail",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::Ignore => "Ignore",
    }
}
