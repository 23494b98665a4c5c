//! Page-at-a-time list state shared by the news feed and search panels.

/// Distance from the bottom, in pixels, at which the next page is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

/// Scroll position reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn near_bottom(&self) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + SCROLL_THRESHOLD_PX
    }
}

/// Identifies one outstanding request. Responses whose ticket does not
/// match the owner's current generation are stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub page: u32,
}

/// Pages are appended until the server returns an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    /// Last page requested and not failed; 0 before the first one.
    page: u32,
    generation: u64,
    started: bool,
    loading: bool,
    exhausted: bool,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PagedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            generation: 0,
            started: false,
            loading: false,
            exhausted: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Starts over at page 1. Earlier outstanding requests become stale.
    pub fn restart(&mut self) -> PageTicket {
        self.generation += 1;
        self.items.clear();
        self.page = 1;
        self.started = true;
        self.loading = true;
        self.exhausted = false;
        self.ticket()
    }

    /// Requests the page after the last one loaded, unless a load is in
    /// flight, the list has not been started, or the last page was reached.
    pub fn advance(&mut self) -> Option<PageTicket> {
        if self.loading || self.exhausted || !self.started {
            return None;
        }
        self.page += 1;
        self.loading = true;
        Some(self.ticket())
    }

    /// Applies a page. Returns `false` when the ticket is stale.
    pub fn apply(&mut self, ticket: PageTicket, page_items: Vec<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.exhausted = page_items.is_empty();
        if ticket.page <= 1 {
            self.items = page_items;
        } else {
            self.items.extend(page_items);
        }
        true
    }

    /// Clears the loading flag after a failed request. Items stay as they are
    /// and the failed page, page 1 included, is requested again on the next
    /// advance.
    pub fn fail(&mut self, ticket: PageTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::new()
        };
    }

    fn is_current(&self, ticket: PageTicket) -> bool {
        self.loading && ticket.generation == self.generation && ticket.page == self.page
    }

    fn ticket(&self) -> PageTicket {
        PageTicket {
            generation: self.generation,
            page: self.page,
        }
    }
}
