use crate::{Effect, FetchFailure, StockQuote};

/// Symbol shown when the dashboard opens.
pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const NO_STOCK_DATA: &str = "No data found";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StockStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Single in-memory quote slot; each fetch replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPanel {
    pub(crate) symbol_input: String,
    pub(crate) requested: Option<String>,
    pub(crate) quote: Option<StockQuote>,
    pub(crate) status: StockStatus,
}

impl Default for StockPanel {
    fn default() -> Self {
        Self {
            symbol_input: DEFAULT_SYMBOL.to_string(),
            requested: None,
            quote: None,
            status: StockStatus::Idle,
        }
    }
}

impl StockPanel {
    pub fn quote(&self) -> Option<&StockQuote> {
        self.quote.as_ref()
    }

    pub(crate) fn request(&mut self) -> Option<Effect> {
        let symbol = self.symbol_input.trim().to_ascii_uppercase();
        if symbol.is_empty() {
            return None;
        }
        self.requested = Some(symbol.clone());
        self.status = StockStatus::Loading;
        Some(Effect::FetchStock { symbol })
    }

    /// Applies a reply. Replies for a symbol other than the latest request
    /// are dropped.
    pub(crate) fn loaded(&mut self, symbol: &str, result: Result<StockQuote, FetchFailure>) -> bool {
        if self.requested.as_deref() != Some(symbol) {
            return false;
        }
        match result {
            Ok(quote) if !quote.symbol.is_empty() => {
                self.quote = Some(quote);
                self.status = StockStatus::Ready;
            }
            Ok(_) | Err(FetchFailure::Application(None)) => {
                self.quote = None;
                self.status = StockStatus::Failed(NO_STOCK_DATA.to_string());
            }
            Err(failure) => {
                self.quote = None;
                self.status = StockStatus::Failed(failure.to_string());
            }
        }
        true
    }
}
