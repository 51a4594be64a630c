//! Application state types and entry glue.
//!
//! Holds the fetched users, the filtered subset and its rendered cards, the
//! load state machine, and the theme/keymap configuration. The event loop
//! lives in `update` (re-exported as `run`).
//!
pub mod keymap;
pub mod update;

use ratatui::style::Color;
use std::time::Instant;
use tracing::{error, info};

use crate::api::User;
use crate::error::FetchError;
use crate::view::{Node, render_card};

pub const STATUS_LOADING: &str = "Cargando usuarios…";
pub const STATUS_LOAD_FAILED: &str = "Error al cargar datos. Reintenta más tarde.";
pub const STATUS_NO_MATCHES: &str = "Sin coincidencias.";

pub fn status_loaded(count: usize) -> String {
    format!("Mostrando {count} usuarios.")
}

pub fn status_results(count: usize) -> String {
    format!("Resultados: {count}")
}

/// Lifecycle of the initial load. `Loaded` and `Failed` are terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub link: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub error_fg: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),      // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),     // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),     // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),    // surface2
            link: Color::Rgb(0x89, 0xb4, 0xfa),      // blue
            header_bg: Color::Rgb(0x31, 0x32, 0x44), // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe), // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4), // text
            error_fg: Color::Rgb(0xf3, 0x8b, 0xa8),  // red
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
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "link" => theme.link = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "error_fg" => theme.error_fg = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-cards theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors: best-effort hex approximation
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

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("link", self.link);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("error_fg", self.error_fg);

        std::fs::write(path, buf)
    }

    /// Load from `path`, or write the default theme there and return it.
    pub fn load_or_init(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme");
        }
        t
    }
}

/// Single application context handed to the event loop and renderers.
pub struct AppState {
    pub started_at: Instant,
    pub users: Vec<User>,
    pub filtered: Vec<User>,
    pub cards: Vec<Node>,
    pub phase: LoadPhase,
    pub status: String,
    pub query: String,
    /// First visible row of the card grid.
    pub scroll: usize,
    /// Card rows that fit on screen, updated on every draw.
    pub rows_per_page: usize,
    /// Cards per grid row, updated on every draw.
    pub columns: usize,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
}

impl AppState {
    pub fn new(theme: Theme, keymap: keymap::Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            users: Vec::new(),
            filtered: Vec::new(),
            cards: Vec::new(),
            phase: LoadPhase::Idle,
            status: String::new(),
            query: String::new(),
            scroll: 0,
            rows_per_page: 1,
            columns: 1,
            theme,
            keymap,
        }
    }

    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
        self.status = STATUS_LOADING.to_string();
    }

    /// Apply the outcome of the initial fetch. Either error kind ends in the
    /// same generic status; the detail only goes to the log.
    pub fn finish_load(&mut self, result: Result<Vec<User>, FetchError>) {
        match result {
            Ok(users) => {
                info!(count = users.len(), elapsed = ?self.started_at.elapsed(), "users loaded");
                self.filtered = users.clone();
                self.users = users;
                self.render_cards();
                self.status = status_loaded(self.filtered.len());
                self.phase = LoadPhase::Loaded;
            }
            Err(err) => self.fail_load(&err),
        }
    }

    /// Enter the terminal `Failed` state. No retry is scheduled.
    pub fn fail_load(&mut self, reason: &dyn std::fmt::Display) {
        error!(error = %reason, "failed to load users");
        self.status = STATUS_LOAD_FAILED.to_string();
        self.phase = LoadPhase::Failed;
    }

    /// Replace every card with a fresh render of `filtered`.
    pub fn render_cards(&mut self) {
        self.cards = self.filtered.iter().map(render_card).collect();
        self.scroll = 0;
    }

    /// Number of grid rows the current cards occupy.
    pub fn total_rows(&self) -> usize {
        self.cards.len().div_ceil(self.columns.max(1))
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.total_rows().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), keymap::Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
