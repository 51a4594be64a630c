//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! The search field always has focus, so plain characters edit the query.
//! Bindings here cover everything else: quitting, scrolling the card grid
//! and clearing the query. A binding on a plain character takes that
//! character away from the search field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Scroll the card grid up one row.
    ScrollUp,
    /// Scroll the card grid down one row.
    ScrollDown,
    /// Scroll up one screen of cards.
    PageUp,
    /// Scroll down one screen of cards.
    PageDown,
    /// Jump to the first row of cards.
    Home,
    /// Jump to the last row of cards.
    End,
    /// Empty the search field.
    ClearQuery,
    /// Swallow the key.
    Ignore,
}

const ACTIONS: [(&str, KeyAction); 9] = [
    ("Quit", KeyAction::Quit),
    ("ScrollUp", KeyAction::ScrollUp),
    ("ScrollDown", KeyAction::ScrollDown),
    ("PageUp", KeyAction::PageUp),
    ("PageDown", KeyAction::PageDown),
    ("Home", KeyAction::Home),
    ("End", KeyAction::End),
    ("ClearQuery", KeyAction::ClearQuery),
    ("Ignore", KeyAction::Ignore),
];

/// Mapping from `(KeyModifiers, KeyCode)` pairs to [`KeyAction`]s.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Default bindings: Esc / Ctrl+c quit, arrows and page keys scroll, Ctrl+u clears.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Esc), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Up), KeyAction::ScrollUp);
        bindings.insert((M::NONE, Down), KeyAction::ScrollDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Home), KeyAction::Home);
        bindings.insert((M::NONE, End), KeyAction::End);
        bindings.insert((M::CONTROL, Char('u')), KeyAction::ClearQuery);
        bindings.insert((M::NONE, Tab), KeyAction::Ignore);
        Self { bindings }
    }

    /// Load a keymap from `path`, or write the defaults there and return them.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a `<Action> = <KeySpec>` file, on top of the defaults.
    ///
    /// Returns `None` when the file cannot be read. Lines that do not parse are skipped.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "ignoring unparsable keybinding"),
            }
        }
        map
    }

    /// Write the current keymap to a configuration file, sorted by action.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-cards keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: Esc, Ctrl+c, Up, Down, PageUp, PageDown, Home, End, Tab\n");
        buf.push_str("# Actions: Quit, ScrollUp, ScrollDown, PageUp, PageDown, Home, End, ClearQuery, Ignore\n");
        buf.push_str("# Unbound plain characters are typed into the search field.\n\n");

        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                format!("{} = {}", format_action(*action), Self::format_key(*mods, *code))
            })
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }

        std::fs::write(path, buf)
    }

    /// Resolve a key event to its action, if bound.
    ///
    /// Shifted characters are reported by some terminals with the SHIFT
    /// modifier and by others without it, so SHIFT is ignored for `Char`.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        let mut mods = key.modifiers;
        if matches!(key.code, KeyCode::Char(_)) {
            mods.remove(KeyModifiers::SHIFT);
        }
        self.bindings.get(&(mods, key.code)).copied()
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// First key bound to `action`, formatted for display.
    pub fn key_for(&self, action: KeyAction) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.into_iter().next()
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+c", "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
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
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let name = s.trim();
    ACTIONS.iter().find(|(n, _)| *n == name).map(|(_, a)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTIONS
        .iter()
        .find(|(_, action)| *action == a)
        .map(|(n, _)| *n)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_bind_quit_to_esc_and_ctrl_c() {
        let km = Keymap::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&esc), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&ctrl_c), Some(KeyAction::Quit));
    }

    #[test]
    fn plain_characters_are_unbound_by_default() {
        let km = Keymap::default();
        for c in ['q', 'a', 'Z', '@', ' '] {
            let ev = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(km.resolve(&ev), None, "{c:?} should reach the search field");
        }
    }

    #[test]
    fn parse_overrides_defaults_and_skips_garbage() {
        let km = Keymap::parse("# comment\nQuit = Ctrl+q\nNotAnAction = x\nScrollDown = Ctrl+n\n");
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(km.resolve(&ctrl_q), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&ctrl_n), Some(KeyAction::ScrollDown));
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(km.resolve(&esc), Some(KeyAction::Quit));
    }

    #[test]
    fn action_names_round_trip() {
        for (name, action) in ACTIONS {
            assert_eq!(parse_action(name), Some(action));
            assert_eq!(format_action(action), name);
        }
    }
}
