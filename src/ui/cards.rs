//! Card grid: lays the rendered card fragments out in rows of equal-width columns.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, LoadPhase, Theme};
use crate::view::{Node, Tag};

/// Narrowest a card column may get before the grid drops a column.
pub const MIN_CARD_WIDTH: u16 = 34;

pub fn grid_columns(width: u16) -> usize {
    usize::from((width / MIN_CARD_WIDTH).max(1))
}

pub fn render_card_grid(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title(format!("Usuarios ({})", app.cards.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.columns = grid_columns(inner.width);

    if app.cards.is_empty() {
        let style = match app.phase {
            LoadPhase::Failed => Style::default().fg(app.theme.error_fg),
            _ => Style::default().fg(app.theme.muted),
        };
        let p = Paragraph::new(app.status.clone())
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(p, inner);
        return;
    }

    let rendered: Vec<Vec<Line<'static>>> = app
        .cards
        .iter()
        .map(|c| card_body_lines(c, &app.theme))
        .collect();
    let rows: Vec<&[Vec<Line<'static>>]> = rendered.chunks(app.columns).collect();
    app.scroll = app.scroll.min(rows.len().saturating_sub(1));

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    let mut visible = 0usize;
    for row in rows.iter().skip(app.scroll) {
        if y >= bottom {
            break;
        }
        let wanted = row.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 2;
        let height = wanted.min(bottom - y);
        let row_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, app.columns as u32); app.columns])
            .split(row_area);
        for (lines, cell) in row.iter().zip(cells.iter()) {
            let p = Paragraph::new(lines.clone()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.border)),
            );
            f.render_widget(p, *cell);
        }
        y += height;
        visible += 1;
    }
    app.rows_per_page = visible.max(1);
}

/// Lines for one card. The outer article becomes the bordered box, so only
/// its children are laid out as text: block elements start and end a line,
/// inline elements and text extend the current one.
pub fn card_body_lines(card: &Node, theme: &Theme) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme.text);
    let mut lines = Vec::new();
    let mut current = Vec::new();
    for child in card.children() {
        walk(child, theme, base, &mut lines, &mut current);
    }
    flush(&mut lines, &mut current);
    lines
}

fn walk(
    node: &Node,
    theme: &Theme,
    inherited: Style,
    lines: &mut Vec<Line<'static>>,
    current: &mut Vec<Span<'static>>,
) {
    match node {
        Node::Text(s) => current.push(Span::styled(s.clone(), inherited)),
        Node::Element { tag, children, .. } => {
            let style = inherited.patch(tag_style(*tag, theme));
            let block = !tag.is_inline();
            if block {
                flush(lines, current);
            }
            for child in children {
                walk(child, theme, style, lines, current);
            }
            if block {
                flush(lines, current);
            }
        }
    }
}

fn flush(lines: &mut Vec<Line<'static>>, current: &mut Vec<Span<'static>>) {
    if !current.is_empty() {
        lines.push(Line::from(std::mem::take(current)));
    }
}

fn tag_style(tag: Tag, theme: &Theme) -> Style {
    match tag {
        Tag::Heading3 => Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        Tag::Anchor => Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED),
        Tag::Strong => Style::default().add_modifier(Modifier::BOLD),
        Tag::Article | Tag::Div => Style::default(),
    }
}
