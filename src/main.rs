//! user-cards binary entry point.
//!
//! Starts the single users fetch on a background runtime, runs the TUI event
//! loop in raw mode, and restores the terminal state on exit. With
//! `--export-html` it fetches once and writes a static page instead.
//!
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

use user_cards::api::UsersClient;
use user_cards::app::keymap::Keymap;
use user_cards::app::{AppState, LoadPhase, Theme};
use user_cards::config::Cli;
use user_cards::error::{Context, Result};
use user_cards::{export, search};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs go to a file while the TUI owns the screen.
fn init_file_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn export_html(cli: &Cli, path: &Path) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let client = UsersClient::new(cli.endpoint.clone(), cli.loading_delay())?;

    let mut app = AppState::default();
    app.begin_load();
    app.finish_load(runtime.block_on(client.fetch_users()));
    if let Some(query) = &cli.query {
        if app.phase == LoadPhase::Loaded {
            app.query = query.clone();
            search::apply_search(&mut app);
        }
    }
    export::write_document(&app, path)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.export_html.as_deref() {
        init_stderr_logging();
        return export_html(&cli, path);
    }

    init_file_logging(&cli.log_path())?;
    tracing::info!(endpoint = %cli.endpoint, "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let client = UsersClient::new(cli.endpoint.clone(), cli.loading_delay())?;
    let (tx, rx) = oneshot::channel();

    let mut app = AppState::new(
        Theme::load_or_init(&cli.theme),
        Keymap::load_or_init(&cli.keybinds),
    );
    app.begin_load();
    runtime.spawn(async move {
        if tx.send(client.fetch_users().await).is_err() {
            tracing::debug!("UI closed before the fetch completed");
        }
    });

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = user_cards::app::run(&mut terminal, &mut app, rx);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
    runtime.shutdown_background();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
