use std::path::PathBuf;

use crate::{
    ArticleId, Consumer, FetchFailure, HistoryEntry, NewsCategory, NewsItem, PageTicket,
    ReportReceipt, ScrollMetrics, SearchResult, StockQuote, ToastId, UploadRecord,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Login form username edited.
    UsernameChanged(String),
    /// Login form password edited.
    PasswordChanged(String),
    RememberMeToggled(bool),
    LoginSubmitted,
    LoginFinished(Result<(), FetchFailure>),
    /// Username read back from local storage at start-up.
    RememberedUserRestored(String),
    LogoutClicked,

    NewsTopicChanged(String),
    NewsCategoryChanged(Option<NewsCategory>),
    NewsSearchSubmitted,
    NewsScrolled(ScrollMetrics),
    /// Explicit "load more" (no scroll threshold).
    NewsLoadMore,
    NewsLoaded {
        consumer: Consumer,
        ticket: PageTicket,
        result: Result<Vec<NewsItem>, FetchFailure>,
    },

    SearchQueryChanged(String),
    SearchSubmitted,
    SearchScrolled(ScrollMetrics),
    SearchLoadMore,
    SearchLoaded {
        ticket: PageTicket,
        result: Result<Vec<SearchResult>, FetchFailure>,
    },

    StockSymbolChanged(String),
    StockSymbolSubmitted,
    StockLoaded {
        symbol: String,
        result: Result<StockQuote, FetchFailure>,
    },

    UploadFileChosen(Option<PathBuf>),
    UploadSubmitted,
    UploadFinished(Result<(), FetchFailure>),
    UploadsLoaded {
        consumer: Consumer,
        generation: u64,
        result: Result<Vec<UploadRecord>, FetchFailure>,
    },
    DownloadRequested(String),
    DownloadFinished {
        filename: String,
        result: Result<PathBuf, FetchFailure>,
    },

    HistoryRefreshRequested,
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<HistoryEntry>, FetchFailure>,
    },

    ReportTitleChanged(String),
    ReportNotesChanged(String),
    ReportSymbolChanged(String),
    ReportNewsToggled(ArticleId),
    /// Toggle by position in the builder's news list.
    ReportNewsToggledAt(usize),
    ReportUploadToggled(String),
    ReportBuildClicked,
    ReportStockResolved(Result<StockQuote, FetchFailure>),
    ReportSubmitted(Result<ReportReceipt, FetchFailure>),
    QuickReportClicked,
    QuickReportFinished(Result<Option<String>, FetchFailure>),

    ToastExpired(ToastId),
    ToastDismissed(ToastId),
}
