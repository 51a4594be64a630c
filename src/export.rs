//! Static HTML export of the card grid.

use std::path::Path;

use crate::app::AppState;
use crate::error::{Context, Result};
use crate::view::escape_html;

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:2rem;background:#1e1e2e;color:#cdd6f4}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:1rem}\
.card{background:#313244;border-radius:8px;padding:1rem}\
.card h3{margin:0 0 .25rem;color:#cba6f7}\
.email{color:#89b4fa}\
.meta{margin-top:.5rem;font-size:.9rem}";

/// Full HTML document: status line followed by the card grid.
pub fn render_document(app: &AppState) -> String {
    let cards: String = app.cards.iter().map(|c| c.to_html()).collect();
    format!(
        "<!doctype html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>Usuarios</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
<p id=\"status\" role=\"status\">{status}</p>\n\
<section id=\"usersGrid\" class=\"grid\" role=\"list\">{cards}</section>\n\
</body>\n</html>\n",
        status = escape_html(&app.status),
    )
}

pub fn write_document(app: &AppState, path: &Path) -> Result<()> {
    std::fs::write(path, render_document(app))
        .with_ctx(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), cards = app.cards.len(), "exported HTML");
    Ok(())
}
