use std::fmt;
use std::path::PathBuf;

use dashboard_core::{
    Consumer, HistoryEntry, NewsCategory, NewsItem, PageTicket, ReportReceipt, ReportRequest,
    SearchResult, StockQuote, UploadRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// An `{error, message}` body inside a successful response.
    pub(crate) fn application(message: Option<String>) -> Self {
        let text = message.clone().unwrap_or_else(|| "unexpected response".to_string());
        Self::new(FailureKind::Application(message), text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not the JSON shape expected.
    Decode,
    /// The backend reported an error in a 200 response. Carries the text
    /// meant for the user, if any.
    Application(Option<String>),
    /// Reading or writing a local file failed.
    LocalIo,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Application(_) => write!(f, "backend error"),
            FailureKind::LocalIo => write!(f, "local file error"),
        }
    }
}

/// Filter for `GET /news`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub page: u32,
    pub topic: Option<String>,
    pub category: Option<NewsCategory>,
}

/// Who asked for a stock quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockPurpose {
    Panel,
    Report,
}

/// One unit of work for [`GatewayHandle`](crate::GatewayHandle), carrying
/// whatever the caller needs to route the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Login {
        username: String,
        password: String,
    },
    News {
        consumer: Consumer,
        ticket: PageTicket,
        query: NewsQuery,
    },
    Search {
        ticket: PageTicket,
        query: String,
    },
    Stock {
        purpose: StockPurpose,
        symbol: String,
    },
    Uploads {
        consumer: Consumer,
        generation: u64,
    },
    Upload {
        path: PathBuf,
    },
    Download {
        filename: String,
    },
    History {
        generation: u64,
    },
    BuildReport(ReportRequest),
    QuickReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    Login(Result<(), GatewayError>),
    News {
        consumer: Consumer,
        ticket: PageTicket,
        result: Result<Vec<NewsItem>, GatewayError>,
    },
    Search {
        ticket: PageTicket,
        result: Result<Vec<SearchResult>, GatewayError>,
    },
    Stock {
        purpose: StockPurpose,
        symbol: String,
        result: Result<StockQuote, GatewayError>,
    },
    Uploads {
        consumer: Consumer,
        generation: u64,
        result: Result<Vec<UploadRecord>, GatewayError>,
    },
    Upload(Result<(), GatewayError>),
    Download {
        filename: String,
        result: Result<PathBuf, GatewayError>,
    },
    History {
        generation: u64,
        result: Result<Vec<HistoryEntry>, GatewayError>,
    },
    BuildReport(Result<ReportReceipt, GatewayError>),
    QuickReport(Result<Option<String>, GatewayError>),
}
