use crate::api::User;
use crate::app::{AppState, STATUS_NO_MATCHES, status_results};

/// Normalize raw input into the query that is matched: lowercased and trimmed.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Stable filter of `users` whose name or email contains `query`, case-insensitively.
/// An empty query keeps every user.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let q = normalize_query(query);
    if q.is_empty() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| u.name.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q))
        .cloned()
        .collect()
}

/// Input handler: recompute `filtered` from `users` and the current query,
/// re-render every card and update the status line.
pub fn apply_search(app: &mut AppState) {
    app.filtered = filter_users(&app.users, &app.query);
    app.render_cards();
    app.status = if app.filtered.is_empty() {
        STATUS_NO_MATCHES.to_string()
    } else {
        status_results(app.filtered.len())
    };
    tracing::trace!(query = %app.query, matches = app.filtered.len(), "search applied");
}
