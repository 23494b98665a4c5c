use crate::{
    AppState, ArticleId, HistoryEntry, NewsCategory, SearchResult, SessionState, StockQuote,
    StockStatus, Toast, HISTORY_PREVIEW_LIMIT,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub login: LoginView,
    pub news: NewsView,
    pub search: SearchView,
    pub stock: StockView,
    pub uploads: UploadsView,
    pub history: HistoryView,
    pub report: ReportView,
    pub quick_report_message: Option<String>,
    pub toasts: Vec<Toast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginView {
    pub username: String,
    pub remember_me: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsView {
    pub topic: String,
    pub category: Option<NewsCategory>,
    pub articles: Vec<ArticleRow>,
    pub page: u32,
    pub loading: bool,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub no_results: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockView {
    pub symbol_input: String,
    pub quote: Option<StockQuote>,
    pub status: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRow {
    pub id: i64,
    pub filename: String,
    pub size_kb: u64,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadsView {
    pub rows: Vec<UploadRow>,
    pub chosen_file: Option<String>,
    pub uploading: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryView {
    /// Compact header preview.
    pub preview: Vec<HistoryEntry>,
    pub entries: Vec<HistoryEntry>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableArticle {
    pub index: usize,
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableUpload {
    pub filename: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportView {
    pub title: String,
    pub notes: String,
    pub symbol: String,
    pub news: Vec<SelectableArticle>,
    pub uploads: Vec<SelectableUpload>,
    pub building: bool,
    pub result_url: Option<String>,
}

impl AppViewModel {
    pub(crate) fn build(state: &AppState) -> Self {
        let login = state.login();
        let news = state.news();
        let search = state.search();
        let stock = state.stock();
        let uploads = state.uploads();
        let history = state.history();
        let report = state.report();

        Self {
            session: state.session().clone(),
            login: LoginView {
                username: login.username.clone(),
                remember_me: login.remember_me,
                loading: login.loading,
                error: login.error.clone(),
            },
            news: NewsView {
                topic: news.topic.clone(),
                category: news.category,
                articles: news
                    .articles()
                    .iter()
                    .map(|item| ArticleRow {
                        title: item.article.title.clone(),
                        description: item.article.description.clone(),
                        url: item.article.url.clone(),
                        image_url: item.article.image_url.clone(),
                        published_at: item.article.published_at.clone(),
                        summary: item.article.summary.clone(),
                    })
                    .collect(),
                page: news.list.page(),
                loading: news.list.is_loading(),
                has_more: news.list.has_more(),
            },
            search: SearchView {
                query: search.query.clone(),
                results: search.results().to_vec(),
                loading: search.list.is_loading(),
                error: search.error.clone(),
                no_results: search.shows_no_results(),
            },
            stock: StockView {
                symbol_input: stock.symbol_input.clone(),
                quote: stock.quote().cloned(),
                status: stock.status.clone(),
            },
            uploads: UploadsView {
                rows: uploads
                    .records()
                    .iter()
                    .map(|record| UploadRow {
                        id: record.id,
                        filename: record.filename.clone(),
                        size_kb: record.size_kb(),
                        uploaded_at: record.uploaded_at.clone(),
                    })
                    .collect(),
                chosen_file: uploads
                    .chosen
                    .as_ref()
                    .map(|path| path.display().to_string()),
                uploading: uploads.uploading,
                loading: uploads.loading,
            },
            history: HistoryView {
                preview: history.preview(HISTORY_PREVIEW_LIMIT).to_vec(),
                entries: history.entries().to_vec(),
                loading: history.loading,
            },
            report: ReportView {
                title: report.title.clone(),
                notes: report.notes.clone(),
                symbol: report.symbol.clone(),
                news: report
                    .news
                    .iter()
                    .enumerate()
                    .map(|(index, item)| SelectableArticle {
                        index,
                        id: item.id.clone(),
                        title: item.article.title.clone(),
                        description: item.article.description.clone(),
                        selected: report.is_news_selected(&item.id),
                    })
                    .collect(),
                uploads: report
                    .uploads
                    .iter()
                    .map(|record| SelectableUpload {
                        filename: record.filename.clone(),
                        selected: report.is_upload_selected(&record.filename),
                    })
                    .collect(),
                building: report.is_building(),
                result_url: report.result_url().map(ToOwned::to_owned),
            },
            quick_report_message: state.quick_report.message.clone(),
            toasts: state.toasts().active().to_vec(),
        }
    }
}
