//! Shared UI components: the search input and the status line.
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, LoadPhase};

/// Render the always-focused search input and place the cursor at its end.
pub fn render_search_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let quit = app
        .keymap
        .key_for(KeyAction::Quit)
        .unwrap_or_else(|| "Esc".to_string());
    let title = format!("Buscar por nombre o email ({quit}: salir)");
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);

    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(app.theme.muted)),
        Span::styled(app.query.clone(), Style::default().fg(app.theme.header_fg)),
    ]);
    let p = Paragraph::new(line)
        .block(block)
        .style(Style::default().bg(app.theme.header_bg));
    f.render_widget(p, area);

    let typed = u16::try_from(app.query.chars().count()).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(2).saturating_add(typed);
    if inner.height > 0 && x < inner.x + inner.width {
        f.set_cursor_position((x, inner.y));
    }
}

/// Render the bottom status line with the current status message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mut style = Style::default()
        .fg(app.theme.status_fg)
        .bg(app.theme.status_bg);
    match app.phase {
        LoadPhase::Failed => style = style.fg(app.theme.error_fg).add_modifier(Modifier::BOLD),
        LoadPhase::Loading => style = style.add_modifier(Modifier::ITALIC),
        LoadPhase::Idle | LoadPhase::Loaded => {}
    }
    let p = Paragraph::new(format!(" {}", app.status)).style(style);
    f.render_widget(p, area);
}
