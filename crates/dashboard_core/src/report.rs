//! Report aggregator.
//!
//! Combines a news snapshot, the upload list and an optional stock lookup
//! into one `ReportRequest`. Each source is best effort: whatever loaded is
//! used and nothing is retried.

use crate::{
    ArticleId, Consumer, Effect, FetchFailure, NewsItem, PageTicket, ReportReceipt, ReportRequest,
    StockQuote, ToastKind, UploadRecord,
};

pub const DEFAULT_REPORT_TITLE: &str = "Custom Report";
pub const NO_URL_RETURNED: &str = "Report created but no URL returned.";
pub const QUICK_REPORT_DONE: &str = "Report generated!";
pub const QUICK_REPORT_FAILED: &str = "Report generation failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildPhase {
    #[default]
    Idle,
    AwaitingStock,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBuilder {
    pub(crate) title: String,
    pub(crate) notes: String,
    pub(crate) symbol: String,
    /// Page 1 of news as fetched when the builder was mounted.
    pub(crate) news: Vec<NewsItem>,
    pub(crate) uploads: Vec<UploadRecord>,
    pub(crate) selected_news: Vec<ArticleId>,
    pub(crate) selected_uploads: Vec<String>,
    pub(crate) phase: BuildPhase,
    pub(crate) result_url: Option<String>,
    pub(crate) generation: u64,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            notes: String::new(),
            symbol: String::new(),
            news: Vec::new(),
            uploads: Vec::new(),
            selected_news: Vec::new(),
            selected_uploads: Vec::new(),
            phase: BuildPhase::Idle,
            result_url: None,
            generation: 0,
        }
    }
}

impl ReportBuilder {
    pub fn is_building(&self) -> bool {
        self.phase != BuildPhase::Idle
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    pub fn is_news_selected(&self, id: &ArticleId) -> bool {
        self.selected_news.contains(id)
    }

    pub fn is_upload_selected(&self, filename: &str) -> bool {
        self.selected_uploads.iter().any(|name| name == filename)
    }

    /// Fresh builder state; replies to earlier fetches become stale.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    /// Fresh builder state plus the two source fetches.
    pub(crate) fn mount(&mut self) -> Vec<Effect> {
        self.reset();
        vec![
            Effect::FetchNews {
                consumer: Consumer::ReportBuilder,
                ticket: self.news_ticket(),
                topic: None,
                category: None,
            },
            Effect::FetchUploads {
                consumer: Consumer::ReportBuilder,
                generation: self.generation,
            },
        ]
    }

    pub(crate) fn news_ticket(&self) -> PageTicket {
        PageTicket {
            generation: self.generation,
            page: 1,
        }
    }

    pub(crate) fn news_loaded(&mut self, ticket: PageTicket, items: Vec<NewsItem>) -> bool {
        if ticket != self.news_ticket() {
            return false;
        }
        self.news = items;
        true
    }

    /// Returns `false` for a reply addressed to an earlier mount.
    pub(crate) fn uploads_loaded(&mut self, generation: u64, records: Vec<UploadRecord>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.uploads = records;
        true
    }

    pub(crate) fn toggle_news(&mut self, id: ArticleId) {
        toggle(&mut self.selected_news, id);
    }

    /// Returns `false` for an index outside the held snapshot.
    pub(crate) fn toggle_news_at(&mut self, index: usize) -> bool {
        let Some(item) = self.news.get(index) else {
            return false;
        };
        let id = item.id.clone();
        self.toggle_news(id);
        true
    }

    pub(crate) fn toggle_upload(&mut self, filename: String) {
        toggle(&mut self.selected_uploads, filename);
    }

    /// Starts a build: a stock lookup first when a symbol is set, otherwise
    /// the submission itself.
    pub(crate) fn begin_build(&mut self) -> Option<Effect> {
        if self.is_building() {
            return None;
        }
        self.result_url = None;
        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            self.phase = BuildPhase::Submitting;
            Some(Effect::SubmitReport(self.compose(None)))
        } else {
            let symbol = symbol.to_string();
            self.phase = BuildPhase::AwaitingStock;
            Some(Effect::LookupReportStock { symbol })
        }
    }

    /// Any failure, or a reply without a symbol, leaves the stock out.
    pub(crate) fn stock_resolved(
        &mut self,
        result: Result<StockQuote, FetchFailure>,
    ) -> Option<Effect> {
        if self.phase != BuildPhase::AwaitingStock {
            return None;
        }
        let stock = result.ok().filter(|quote| !quote.symbol.is_empty());
        self.phase = BuildPhase::Submitting;
        Some(Effect::SubmitReport(self.compose(stock)))
    }

    /// Returns the alert to show, if any.
    pub(crate) fn submitted(
        &mut self,
        result: Result<ReportReceipt, FetchFailure>,
    ) -> Option<(ToastKind, String)> {
        if self.phase != BuildPhase::Submitting {
            return None;
        }
        self.phase = BuildPhase::Idle;
        match result {
            Ok(receipt) => match receipt.resolved_url() {
                Some(url) => {
                    self.result_url = Some(url);
                    None
                }
                None => Some((ToastKind::Warning, NO_URL_RETURNED.to_string())),
            },
            Err(failure) => Some((
                ToastKind::Error,
                format!("Error building report: {failure}"),
            )),
        }
    }

    /// Selected articles still present in the snapshot, in snapshot order.
    pub fn compose(&self, stock: Option<StockQuote>) -> ReportRequest {
        let news = self
            .news
            .iter()
            .filter(|item| self.selected_news.contains(&item.id))
            .map(|item| item.article.clone())
            .collect();
        ReportRequest {
            title: self.title.clone(),
            news,
            stock,
            uploads: self.selected_uploads.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// The one-click `POST /report/` panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuickReport {
    pub(crate) running: bool,
    pub(crate) message: Option<String>,
}

impl QuickReport {
    pub(crate) fn start(&mut self) -> Option<Effect> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Effect::GenerateQuickReport)
    }

    pub(crate) fn finished(&mut self, result: Result<Option<String>, FetchFailure>) {
        self.running = false;
        self.message = Some(match result {
            Ok(Some(message)) if !message.is_empty() => message,
            Ok(_) => QUICK_REPORT_DONE.to_string(),
            Err(_) => QUICK_REPORT_FAILED.to_string(),
        });
    }
}

fn toggle<T: PartialEq>(selection: &mut Vec<T>, value: T) {
    if let Some(pos) = selection.iter().position(|existing| *existing == value) {
        selection.remove(pos);
    } else {
        selection.push(value);
    }
}
