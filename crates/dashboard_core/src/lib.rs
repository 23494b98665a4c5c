//! Dashboard core: pure state machine and view-model helpers.
//!
//! Every feature panel keeps its latest fetched data here. `update` never
//! performs IO; it returns [`Effect`]s for the shell to execute and receives
//! their outcomes back as [`Msg`]s.
mod effect;
mod failure;
mod history;
mod login;
mod model;
mod msg;
mod news;
mod paging;
mod report;
mod search;
mod state;
mod stock;
mod toast;
mod update;
mod uploads;
mod view_model;

pub use effect::{Consumer, Effect};
pub use failure::FetchFailure;
pub use history::{HistoryPanel, HISTORY_PREVIEW_LIMIT};
pub use login::{
    LoginForm, SessionState, INVALID_CREDENTIALS, MIN_PASSWORD_CHARS, MIN_USERNAME_CHARS,
    PASSWORD_TOO_SHORT, USERNAME_TOO_SHORT,
};
pub use model::{
    ArticleId, HistoryEntry, NewsArticle, NewsCategory, NewsItem, ReportReceipt, ReportRequest,
    SearchResult, StockQuote, UploadRecord,
};
pub use msg::Msg;
pub use news::NewsFeed;
pub use paging::{PageTicket, PagedList, ScrollMetrics, SCROLL_THRESHOLD_PX};
pub use report::{
    BuildPhase, QuickReport, ReportBuilder, DEFAULT_REPORT_TITLE, NO_URL_RETURNED,
    QUICK_REPORT_DONE, QUICK_REPORT_FAILED,
};
pub use search::{SearchPanel, EMPTY_QUERY, SEARCH_FAILED, SEARCH_UNREACHABLE};
pub use state::AppState;
pub use stock::{StockPanel, StockStatus, DEFAULT_SYMBOL, NO_STOCK_DATA};
pub use toast::{Toast, ToastId, ToastKind, ToastQueue, TOAST_LIFETIME};
pub use update::update;
pub use uploads::{UploadsPanel, UPLOAD_FAILED, UPLOAD_SUCCEEDED};
pub use view_model::{
    AppViewModel, ArticleRow, HistoryView, LoginView, NewsView, ReportView, SearchView,
    SelectableArticle, SelectableUpload, StockView, UploadRow, UploadsView,
};
