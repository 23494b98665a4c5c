use crate::{AppState, Consumer, Effect, Msg, ToastKind, UPLOAD_FAILED, UPLOAD_SUCCEEDED};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ToastExpired(id) | Msg::ToastDismissed(id) => {
            if state.toasts.dismiss(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        msg if is_login_msg(&msg) => update_login(&mut state, msg),
        // Dashboard input and late replies are dropped on the login screen.
        _ if !state.is_logged_in() => Vec::new(),
        msg => update_dashboard(&mut state, msg),
    };

    (state, effects)
}

fn is_login_msg(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::UsernameChanged(_)
            | Msg::PasswordChanged(_)
            | Msg::RememberMeToggled(_)
            | Msg::LoginSubmitted
            | Msg::LoginFinished(_)
            | Msg::RememberedUserRestored(_)
            | Msg::LogoutClicked
    )
}

fn update_login(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    if state.is_logged_in() && !matches!(msg, Msg::LogoutClicked) {
        return Vec::new();
    }
    match msg {
        Msg::UsernameChanged(username) => {
            state.login.username = username;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PasswordChanged(password) => {
            state.login.password = password;
            state.mark_dirty();
            Vec::new()
        }
        Msg::RememberMeToggled(remember) => {
            state.login.remember_me = remember;
            state.mark_dirty();
            Vec::new()
        }
        Msg::RememberedUserRestored(username) => {
            state.login.restore(username);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LoginSubmitted => {
            state.mark_dirty();
            match state.login.begin_submit() {
                Some((username, password)) => vec![Effect::Login { username, password }],
                None => Vec::new(),
            }
        }
        Msg::LoginFinished(result) => {
            if !state.login.loading {
                return Vec::new();
            }
            state.mark_dirty();
            match result {
                Ok(()) => {
                    state.login.succeed();
                    let username = state.login.username.clone();
                    let remembered = state.login.remember_me.then(|| username.clone());
                    let mut effects = vec![Effect::RememberUser(remembered)];
                    effects.extend(state.enter_dashboard(username));
                    effects
                }
                Err(_) => {
                    state.login.fail();
                    Vec::new()
                }
            }
        }
        Msg::LogoutClicked => {
            if state.is_logged_in() {
                state.leave_dashboard();
                state.mark_dirty();
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn update_dashboard(state: &mut AppState, msg: Msg) -> Vec<Effect> {
    let mut effects = Vec::new();
    let changed = match msg {
        Msg::NewsTopicChanged(topic) => {
            state.news.topic = topic;
            true
        }
        Msg::NewsCategoryChanged(category) => {
            state.news.category = category;
            // Picking a category reloads right away; the topic waits for submit.
            effects.push(state.news.restart());
            true
        }
        Msg::NewsSearchSubmitted => {
            effects.push(state.news.restart());
            true
        }
        Msg::NewsScrolled(metrics) => push_some(&mut effects, state.news.scrolled(metrics)),
        Msg::NewsLoadMore => push_some(&mut effects, state.news.load_more()),
        Msg::NewsLoaded {
            consumer: Consumer::Dashboard,
            ticket,
            result,
        } => match result {
            Ok(items) => state.news.list.apply(ticket, items),
            Err(_) => state.news.list.fail(ticket),
        },
        Msg::NewsLoaded {
            consumer: Consumer::ReportBuilder,
            ticket,
            result,
        } => match result {
            Ok(items) => state.report.news_loaded(ticket, items),
            Err(_) => false,
        },

        Msg::SearchQueryChanged(query) => {
            state.search.query = query;
            true
        }
        Msg::SearchSubmitted => {
            effects.extend(state.search.submit());
            true
        }
        Msg::SearchScrolled(metrics) => push_some(&mut effects, state.search.scrolled(metrics)),
        Msg::SearchLoadMore => push_some(&mut effects, state.search.load_more()),
        Msg::SearchLoaded { ticket, result } => state.search.loaded(ticket, result),

        Msg::StockSymbolChanged(symbol) => {
            state.stock.symbol_input = symbol;
            true
        }
        Msg::StockSymbolSubmitted => push_some(&mut effects, state.stock.request()),
        Msg::StockLoaded { symbol, result } => state.stock.loaded(&symbol, result),

        Msg::UploadFileChosen(path) => {
            state.uploads.chosen = path;
            true
        }
        Msg::UploadSubmitted => push_some(&mut effects, state.uploads.submit()),
        Msg::UploadFinished(result) => {
            if !state.uploads.uploading {
                return Vec::new();
            }
            let succeeded = result.is_ok();
            effects.extend(state.uploads.finished(succeeded));
            let toast = if succeeded {
                state.toast(ToastKind::Success, UPLOAD_SUCCEEDED)
            } else {
                state.toast(ToastKind::Error, UPLOAD_FAILED)
            };
            effects.push(toast);
            true
        }
        Msg::UploadsLoaded {
            consumer: Consumer::Dashboard,
            generation,
            result,
        } => state.uploads.loaded(generation, result),
        Msg::UploadsLoaded {
            consumer: Consumer::ReportBuilder,
            generation,
            result,
        } => match result {
            Ok(records) => state.report.uploads_loaded(generation, records),
            Err(_) => false,
        },
        Msg::DownloadRequested(filename) => {
            effects.push(Effect::DownloadUpload { filename });
            false
        }
        Msg::DownloadFinished { filename, result } => {
            let toast = match result {
                Ok(path) => state.toast(
                    ToastKind::Success,
                    format!("Saved {filename} to {}", path.display()),
                ),
                Err(_) => state.toast(ToastKind::Error, format!("Download of {filename} failed!")),
            };
            effects.push(toast);
            true
        }

        Msg::HistoryRefreshRequested => {
            effects.push(state.history.refresh());
            true
        }
        Msg::HistoryLoaded { generation, result } => state.history.loaded(generation, result),

        Msg::ReportTitleChanged(title) => {
            state.report.title = title;
            true
        }
        Msg::ReportNotesChanged(notes) => {
            state.report.notes = notes;
            true
        }
        Msg::ReportSymbolChanged(symbol) => {
            state.report.symbol = symbol;
            true
        }
        Msg::ReportNewsToggled(id) => {
            state.report.toggle_news(id);
            true
        }
        Msg::ReportNewsToggledAt(index) => state.report.toggle_news_at(index),
        Msg::ReportUploadToggled(filename) => {
            state.report.toggle_upload(filename);
            true
        }
        Msg::ReportBuildClicked => push_some(&mut effects, state.report.begin_build()),
        Msg::ReportStockResolved(result) => {
            push_some(&mut effects, state.report.stock_resolved(result))
        }
        Msg::ReportSubmitted(result) => {
            let was_building = state.report.is_building();
            if let Some((kind, alert)) = state.report.submitted(result) {
                effects.push(state.toast(kind, alert));
            }
            was_building
        }
        Msg::QuickReportClicked => push_some(&mut effects, state.quick_report.start()),
        Msg::QuickReportFinished(result) => {
            state.quick_report.finished(result);
            true
        }

        Msg::UsernameChanged(_)
        | Msg::PasswordChanged(_)
        | Msg::RememberMeToggled(_)
        | Msg::LoginSubmitted
        | Msg::LoginFinished(_)
        | Msg::RememberedUserRestored(_)
        | Msg::LogoutClicked
        | Msg::ToastExpired(_)
        | Msg::ToastDismissed(_) => false,
    };

    if changed {
        state.mark_dirty();
    }
    effects
}

fn push_some(effects: &mut Vec<Effect>, effect: Option<Effect>) -> bool {
    match effect {
        Some(effect) => {
            effects.push(effect);
            true
        }
        None => false,
    }
}
