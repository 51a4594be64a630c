pub mod cards;
pub mod components;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::AppState;

/// Draw the whole screen: search input, card grid, status line.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)].as_ref())
        .split(f.area());

    components::render_search_bar(f, root[0], app);
    cards::render_card_grid(f, root[1], app);
    components::render_status_bar(f, root[2], app);
}
