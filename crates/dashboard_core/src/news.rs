use crate::{Consumer, Effect, NewsCategory, NewsItem, PagedList, PageTicket, ScrollMetrics};

/// The dashboard's news feed: topic/category filter plus endless paging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsFeed {
    pub(crate) topic: String,
    pub(crate) category: Option<NewsCategory>,
    pub(crate) list: PagedList<NewsItem>,
}

impl NewsFeed {
    pub fn articles(&self) -> &[NewsItem] {
        self.list.items()
    }

    /// Back to an empty, unfiltered feed. Outstanding pages become stale.
    pub(crate) fn reset(&mut self) {
        self.topic.clear();
        self.category = None;
        self.list.reset();
    }

    /// Reloads page 1 with the current filter.
    pub(crate) fn restart(&mut self) -> Effect {
        let ticket = self.list.restart();
        self.fetch(ticket)
    }

    pub(crate) fn scrolled(&mut self, metrics: ScrollMetrics) -> Option<Effect> {
        if !metrics.near_bottom() {
            return None;
        }
        self.load_more()
    }

    pub(crate) fn load_more(&mut self) -> Option<Effect> {
        let ticket = self.list.advance()?;
        Some(self.fetch(ticket))
    }

    pub(crate) fn fetch(&self, ticket: PageTicket) -> Effect {
        let topic = self.topic.trim();
        Effect::FetchNews {
            consumer: Consumer::Dashboard,
            ticket,
            topic: (!topic.is_empty()).then(|| topic.to_string()),
            category: self.category,
        }
    }
}
