use crate::view_model::AppViewModel;
use crate::{
    Effect, HistoryPanel, LoginForm, NewsFeed, QuickReport, ReportBuilder, SearchPanel,
    SessionState, StockPanel, ToastKind, ToastQueue, UploadsPanel, TOAST_LIFETIME,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    pub(crate) login: LoginForm,
    pub(crate) news: NewsFeed,
    pub(crate) search: SearchPanel,
    pub(crate) stock: StockPanel,
    pub(crate) uploads: UploadsPanel,
    pub(crate) history: HistoryPanel,
    pub(crate) report: ReportBuilder,
    pub(crate) quick_report: QuickReport,
    pub(crate) toasts: ToastQueue,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::build(self)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.session, SessionState::LoggedIn { .. })
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn news(&self) -> &NewsFeed {
        &self.news
    }

    pub fn search(&self) -> &SearchPanel {
        &self.search
    }

    pub fn stock(&self) -> &StockPanel {
        &self.stock
    }

    pub fn uploads(&self) -> &UploadsPanel {
        &self.uploads
    }

    pub fn history(&self) -> &HistoryPanel {
        &self.history
    }

    pub fn report(&self) -> &ReportBuilder {
        &self.report
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Switches to the dashboard and mounts every panel.
    pub(crate) fn enter_dashboard(&mut self, username: String) -> Vec<Effect> {
        self.session = SessionState::LoggedIn { username };
        let mut effects = Vec::with_capacity(6);
        effects.push(self.news.restart());
        effects.extend(self.stock.request());
        effects.push(self.uploads.refresh());
        effects.push(self.history.refresh());
        effects.extend(self.report.mount());
        effects
    }

    /// Back to the login screen. Panel state is dropped; the login form keeps
    /// the username only when it is remembered.
    pub(crate) fn leave_dashboard(&mut self) {
        self.session = SessionState::LoggedOut;
        self.news.reset();
        self.search.reset();
        self.stock = StockPanel::default();
        self.uploads.reset();
        self.history.reset();
        self.report.reset();
        self.quick_report = QuickReport::default();
        if !self.login.remember_me {
            self.login.username.clear();
        }
        self.login.password.clear();
        self.login.error = None;
    }

    /// Publishes a toast and returns the effect that expires it.
    pub(crate) fn toast(&mut self, kind: ToastKind, message: impl Into<String>) -> Effect {
        let id = self.toasts.publish(kind, message);
        Effect::ExpireToast {
            id,
            after: TOAST_LIFETIME,
        }
    }
}
