use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::api::User;
use crate::app::keymap::KeyAction;
use crate::app::{AppState, LoadPhase};
use crate::error::FetchError;
use crate::search::apply_search;
use crate::ui;

pub type FetchOutcome = std::result::Result<Vec<User>, FetchError>;

/// Whether the loop keeps running after a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drive the UI until the user quits.
///
/// `pending` carries the result of the single initial fetch; it is polled
/// once per tick while the app is `Loading`.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    pending: oneshot::Receiver<FetchOutcome>,
) -> Result<()> {
    let mut pending = Some(pending);
    if app.phase == LoadPhase::Idle {
        app.begin_load();
    }

    loop {
        if let Some(rx) = pending.as_mut() {
            match rx.try_recv() {
                Ok(outcome) => {
                    app.finish_load(outcome);
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    app.fail_load(&"fetch task ended without a result");
                    pending = None;
                }
            }
        }

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    tracing::info!(uptime = ?app.started_at.elapsed(), "quitting");
    Ok(())
}

/// Apply one key press. Bound keys run their action; any other printable
/// character edits the query, which re-filters synchronously.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.keymap.resolve(&key) {
        Some(KeyAction::Quit) => return Flow::Quit,
        Some(KeyAction::ScrollUp) => app.scroll_by(-1),
        Some(KeyAction::ScrollDown) => app.scroll_by(1),
        Some(KeyAction::PageUp) => app.scroll_by(-page_step(app)),
        Some(KeyAction::PageDown) => app.scroll_by(page_step(app)),
        Some(KeyAction::Home) => app.scroll = 0,
        Some(KeyAction::End) => app.scroll = app.total_rows().saturating_sub(1),
        Some(KeyAction::ClearQuery) => {
            if !app.query.is_empty() {
                app.query.clear();
                apply_search(app);
            }
        }
        Some(KeyAction::Ignore) => {}
        None => match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                app.query.push(c);
                apply_search(app);
            }
            KeyCode::Backspace => {
                if app.query.pop().is_some() {
                    apply_search(app);
                }
            }
            _ => {}
        },
    }
    Flow::Continue
}

fn page_step(app: &AppState) -> isize {
    isize::try_from(app.rows_per_page.max(1)).unwrap_or(isize::MAX)
}
