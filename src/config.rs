//! Command-line and environment configuration.

use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_ENDPOINT, DEFAULT_LOADING_DELAY};

#[derive(Debug, Clone, Parser)]
#[command(name = "user-cards", version, about = "Searchable grid of user cards fetched over HTTP")]
pub struct Cli {
    /// Users endpoint (GET, JSON array)
    #[arg(long, env = "USER_CARDS_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    /// Pause after the response arrives, so the loading status is visible
    #[arg(long, env = "USER_CARDS_DELAY_MS", default_value_t = DEFAULT_LOADING_DELAY.as_millis() as u64)]
    pub delay_ms: u64,

    /// Theme file (key = #RRGGBB); created with defaults when missing
    #[arg(long, env = "USER_CARDS_THEME", default_value = "theme.conf")]
    pub theme: String,

    /// Keybindings file (Action = Key); created with defaults when missing
    #[arg(long, env = "USER_CARDS_KEYBINDS", default_value = "keybinds.conf")]
    pub keybinds: String,

    /// Log file for the interactive UI [default: <tmp>/user-cards.log]
    #[arg(long, env = "USER_CARDS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Fetch once, write the card grid as an HTML page to this path and exit
    #[arg(long, value_name = "PATH")]
    pub export_html: Option<PathBuf>,

    /// Search applied before exporting (only with --export-html)
    #[arg(long, requires = "export_html")]
    pub query: Option<String>,
}

impl Cli {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("user-cards.log"))
    }
}
