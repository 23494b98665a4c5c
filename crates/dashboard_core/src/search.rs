use crate::{Effect, FetchFailure, PagedList, PageTicket, ScrollMetrics, SearchResult};

pub const EMPTY_QUERY: &str = "Please enter a search query";
pub const SEARCH_FAILED: &str = "Search failed. Please try again.";
pub const SEARCH_UNREACHABLE: &str =
    "Failed to connect to search service. Please check if the backend is running.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPanel {
    pub(crate) query: String,
    /// Query the current result list belongs to; follow-up pages use it.
    pub(crate) active_query: String,
    pub(crate) list: PagedList<SearchResult>,
    pub(crate) error: Option<String>,
    pub(crate) has_searched: bool,
}

impl SearchPanel {
    pub fn results(&self) -> &[SearchResult] {
        self.list.items()
    }

    pub(crate) fn reset(&mut self) {
        self.query.clear();
        self.active_query.clear();
        self.list.reset();
        self.error = None;
        self.has_searched = false;
    }

    pub(crate) fn submit(&mut self) -> Option<Effect> {
        let query = self.query.trim();
        if query.is_empty() {
            self.error = Some(EMPTY_QUERY.to_string());
            return None;
        }
        self.active_query = query.to_string();
        self.error = None;
        self.has_searched = true;
        let ticket = self.list.restart();
        Some(self.fetch(ticket))
    }

    pub(crate) fn scrolled(&mut self, metrics: ScrollMetrics) -> Option<Effect> {
        if !metrics.near_bottom() {
            return None;
        }
        self.load_more()
    }

    pub(crate) fn load_more(&mut self) -> Option<Effect> {
        if self.active_query.is_empty() || self.error.is_some() {
            return None;
        }
        let ticket = self.list.advance()?;
        Some(self.fetch(ticket))
    }

    pub(crate) fn loaded(
        &mut self,
        ticket: PageTicket,
        result: Result<Vec<SearchResult>, FetchFailure>,
    ) -> bool {
        match result {
            Ok(results) => self.list.apply(ticket, results),
            Err(failure) => {
                if !self.list.fail(ticket) {
                    return false;
                }
                self.error = Some(match failure {
                    FetchFailure::Application(Some(message)) if !message.is_empty() => message,
                    FetchFailure::Transport(_) => SEARCH_UNREACHABLE.to_string(),
                    FetchFailure::Application(_) | FetchFailure::Rejected { .. } => {
                        SEARCH_FAILED.to_string()
                    }
                });
                true
            }
        }
    }

    /// True once a search ran, finished, and found nothing.
    pub fn shows_no_results(&self) -> bool {
        self.has_searched
            && !self.list.is_loading()
            && self.list.items().is_empty()
            && self.error.is_none()
    }

    fn fetch(&self, ticket: PageTicket) -> Effect {
        Effect::FetchSearch {
            ticket,
            query: self.active_query.clone(),
        }
    }
}
