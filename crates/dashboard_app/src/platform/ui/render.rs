use std::fmt::Write;

use dashboard_core::{AppViewModel, SessionState, StockStatus, ToastKind};

/// Text snapshot of the whole screen for the current view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    match &view.session {
        SessionState::LoggedOut => render_login(&mut out, view),
        SessionState::LoggedIn { username } => render_dashboard(&mut out, username, view),
    }
    render_toasts(&mut out, view);
    out
}

fn render_login(out: &mut String, view: &AppViewModel) {
    let login = &view.login;
    let _ = writeln!(out, "== Sign in ==");
    let _ = writeln!(
        out,
        "user: {}   remember me: {}",
        if login.username.is_empty() { "-" } else { login.username.as_str() },
        if login.remember_me { "on" } else { "off" }
    );
    if login.loading {
        let _ = writeln!(out, "signing in...");
    }
    if let Some(error) = &login.error {
        let _ = writeln!(out, "! {error}");
    }
}

fn render_dashboard(out: &mut String, username: &str, view: &AppViewModel) {
    let _ = writeln!(out, "== Dashboard ({username}) ==");

    if !view.history.preview.is_empty() {
        let recent: Vec<&str> = view
            .history
            .preview
            .iter()
            .map(|entry| entry.action.as_str())
            .collect();
        let _ = writeln!(out, "recent: {}", recent.join(", "));
    }

    let _ = writeln!(out, "\n-- Stock --");
    match &view.stock.status {
        StockStatus::Idle => {}
        StockStatus::Loading => {
            let _ = writeln!(out, "loading {}...", view.stock.symbol_input);
        }
        StockStatus::Ready => {
            if let Some(quote) = &view.stock.quote {
                let _ = writeln!(
                    out,
                    "{}: ${} {}",
                    quote.symbol,
                    quote.price,
                    quote.change_percent.as_deref().unwrap_or("")
                );
            }
        }
        StockStatus::Failed(reason) => {
            let _ = writeln!(out, "{}: {reason}", view.stock.symbol_input);
        }
    }

    let news = &view.news;
    let filter = match (news.topic.trim(), news.category) {
        ("", None) => String::new(),
        (topic, None) => format!(" [{topic}]"),
        ("", Some(category)) => format!(" [{category}]"),
        (topic, Some(category)) => format!(" [{topic} / {category}]"),
    };
    let _ = writeln!(out, "\n-- News{filter} --");
    for (index, article) in news.articles.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, article.title);
        if !article.url.is_empty() {
            let _ = writeln!(out, "     {}", article.url);
        }
    }
    if news.loading {
        let _ = writeln!(out, "loading page {}...", news.page);
    } else if news.articles.is_empty() {
        let _ = writeln!(out, "no articles");
    } else if news.has_more {
        let _ = writeln!(out, "(more news)");
    }

    let search = &view.search;
    if !search.results.is_empty() || search.error.is_some() || search.no_results || search.loading
    {
        let _ = writeln!(out, "\n-- Search: {} --", search.query);
        for result in &search.results {
            let _ = writeln!(out, "  * {} <{}>", result.title, result.link);
            if !result.snippet.is_empty() {
                let _ = writeln!(out, "    {}", result.snippet);
            }
        }
        if let Some(error) = &search.error {
            let _ = writeln!(out, "! {error}");
        } else if search.no_results {
            let _ = writeln!(out, "no results");
        }
        if search.loading {
            let _ = writeln!(out, "searching...");
        }
    }

    let uploads = &view.uploads;
    let _ = writeln!(out, "\n-- Uploads --");
    for row in &uploads.rows {
        let _ = writeln!(
            out,
            "  {} ({} KB) {}",
            row.filename, row.size_kb, row.uploaded_at
        );
    }
    if uploads.uploading {
        let chosen = uploads.chosen_file.as_deref().unwrap_or("file");
        let _ = writeln!(out, "uploading {chosen}...");
    }

    let _ = writeln!(out, "\n-- History --");
    for entry in &view.history.entries {
        let _ = writeln!(out, "  {} {}", entry.created_at, entry.action);
    }

    let report = &view.report;
    let _ = writeln!(out, "\n-- Report builder: {} --", report.title);
    if !report.symbol.is_empty() {
        let _ = writeln!(out, "stock: {}", report.symbol);
    }
    if !report.notes.is_empty() {
        let _ = writeln!(out, "notes: {}", report.notes);
    }
    for article in &report.news {
        let _ = writeln!(
            out,
            "  [{}] {}. {}",
            if article.selected { 'x' } else { ' ' },
            article.index + 1,
            article.title
        );
    }
    for upload in &report.uploads {
        let _ = writeln!(
            out,
            "  [{}] {}",
            if upload.selected { 'x' } else { ' ' },
            upload.filename
        );
    }
    if report.building {
        let _ = writeln!(out, "building...");
    }
    if let Some(url) = &report.result_url {
        let _ = writeln!(out, "report: {url}");
    }
    if let Some(message) = &view.quick_report_message {
        let _ = writeln!(out, "{message}");
    }
}

fn render_toasts(out: &mut String, view: &AppViewModel) {
    for toast in &view.toasts {
        let label = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
        };
        let _ = writeln!(out, "<{}> [{label}] {}", toast.id, toast.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{update, AppState, Msg};

    #[test]
    fn login_screen_shows_validation_error() {
        let state = AppState::new();
        let (state, _) = update(state, Msg::UsernameChanged("al".into()));
        let (state, _) = update(state, Msg::PasswordChanged("secret1".into()));
        let (state, _) = update(state, Msg::LoginSubmitted);

        let text = render(&state.view());
        assert!(text.contains("== Sign in =="));
        assert!(text.contains("Username must be at least 3 characters."));
    }

    #[test]
    fn dashboard_lists_sections_after_login() {
        let state = AppState::new();
        let (state, _) = update(state, Msg::UsernameChanged("alice".into()));
        let (state, _) = update(state, Msg::PasswordChanged("secret1".into()));
        let (state, _) = update(state, Msg::LoginSubmitted);
        let (state, _) = update(state, Msg::LoginFinished(Ok(())));

        let text = render(&state.view());
        assert!(text.contains("== Dashboard (alice) =="));
        assert!(text.contains("-- News --"));
        assert!(text.contains("-- Report builder: Custom Report --"));
    }
}
