use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dashboard_core::{Effect, FetchFailure, Msg, ToastId};
use dashboard_gateway::{
    FailureKind, GatewayError, GatewayEvent, GatewayHandle, NewsQuery, Request, StockPurpose,
};
use dashboard_logging::{dash_debug, dash_info, dash_warn};

use super::persistence;

/// Executes core effects: remote ones go to the gateway worker, local ones
/// (remembered user, toast timers) are handled here.
pub struct EffectRunner {
    gateway: GatewayHandle,
    state_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

enum Dispatch {
    Remote(Request),
    Remember(Option<String>),
    ExpireToast { id: ToastId, after: Duration },
}

impl EffectRunner {
    pub fn new(gateway: GatewayHandle, state_dir: PathBuf, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            gateway,
            state_dir,
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match dispatch(effect) {
                Dispatch::Remote(request) => {
                    dash_info!("request {}", describe(&request));
                    self.gateway.submit(request);
                }
                Dispatch::Remember(user) => {
                    persistence::save_remembered_user(&self.state_dir, user.as_deref());
                }
                Dispatch::ExpireToast { id, after } => {
                    let msg_tx = self.msg_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = msg_tx.send(Msg::ToastExpired(id));
                    });
                }
            }
        }
    }

    /// Gateway replies that arrived since the last call, as messages.
    pub fn drain_events(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.gateway.try_recv() {
            inbox.push(event_to_msg(event));
        }
        inbox
    }
}

fn dispatch(effect: Effect) -> Dispatch {
    match effect {
        Effect::Login { username, password } => {
            Dispatch::Remote(Request::Login { username, password })
        }
        Effect::RememberUser(user) => Dispatch::Remember(user),
        Effect::FetchNews {
            consumer,
            ticket,
            topic,
            category,
        } => Dispatch::Remote(Request::News {
            consumer,
            ticket,
            query: NewsQuery {
                page: ticket.page,
                topic,
                category,
            },
        }),
        Effect::FetchSearch { ticket, query } => Dispatch::Remote(Request::Search { ticket, query }),
        Effect::FetchStock { symbol } => Dispatch::Remote(Request::Stock {
            purpose: StockPurpose::Panel,
            symbol,
        }),
        Effect::LookupReportStock { symbol } => Dispatch::Remote(Request::Stock {
            purpose: StockPurpose::Report,
            symbol,
        }),
        Effect::FetchUploads {
            consumer,
            generation,
        } => Dispatch::Remote(Request::Uploads {
            consumer,
            generation,
        }),
        Effect::UploadFile { path } => Dispatch::Remote(Request::Upload { path }),
        Effect::DownloadUpload { filename } => Dispatch::Remote(Request::Download { filename }),
        Effect::FetchHistory { generation } => Dispatch::Remote(Request::History { generation }),
        Effect::SubmitReport(report) => Dispatch::Remote(Request::BuildReport(report)),
        Effect::GenerateQuickReport => Dispatch::Remote(Request::QuickReport),
        Effect::ExpireToast { id, after } => Dispatch::ExpireToast { id, after },
    }
}

fn describe(request: &Request) -> String {
    match request {
        Request::Login { username, .. } => format!("login user={username}"),
        Request::News {
            consumer,
            ticket,
            query,
        } => format!(
            "news consumer={consumer:?} page={} generation={} topic={:?} category={:?}",
            ticket.page, ticket.generation, query.topic, query.category
        ),
        Request::Search { ticket, query } => {
            format!("search query={query:?} page={}", ticket.page)
        }
        Request::Stock { purpose, symbol } => format!("stock {symbol} for {purpose:?}"),
        Request::Uploads {
            consumer,
            generation,
        } => format!("uploads consumer={consumer:?} generation={generation}"),
        Request::Upload { path } => format!("upload {}", path.display()),
        Request::Download { filename } => format!("download {filename}"),
        Request::History { generation } => format!("history generation={generation}"),
        Request::BuildReport(report) => format!(
            "build report title={:?} news={} uploads={} stock={}",
            report.title,
            report.news.len(),
            report.uploads.len(),
            report.stock.is_some()
        ),
        Request::QuickReport => "quick report".to_string(),
    }
}

fn event_to_msg(event: GatewayEvent) -> Msg {
    match event {
        GatewayEvent::Login(result) => Msg::LoginFinished(failed("login", result)),
        GatewayEvent::News {
            consumer,
            ticket,
            result,
        } => Msg::NewsLoaded {
            consumer,
            ticket,
            result: failed("news", result),
        },
        GatewayEvent::Search { ticket, result } => Msg::SearchLoaded {
            ticket,
            result: failed("search", result),
        },
        GatewayEvent::Stock {
            purpose: StockPurpose::Panel,
            symbol,
            result,
        } => Msg::StockLoaded {
            result: failed("stock", result),
            symbol,
        },
        GatewayEvent::Stock {
            purpose: StockPurpose::Report,
            result,
            ..
        } => Msg::ReportStockResolved(failed("report stock", result)),
        GatewayEvent::Uploads {
            consumer,
            generation,
            result,
        } => Msg::UploadsLoaded {
            consumer,
            generation,
            result: failed("upload list", result),
        },
        GatewayEvent::Upload(result) => Msg::UploadFinished(failed("upload", result)),
        GatewayEvent::Download { filename, result } => {
            if let Ok(path) = &result {
                dash_debug!("{} downloaded to {}", filename, path.display());
            }
            Msg::DownloadFinished {
                result: failed("download", result),
                filename,
            }
        }
        GatewayEvent::History { generation, result } => Msg::HistoryLoaded {
            generation,
            result: failed("history", result),
        },
        GatewayEvent::BuildReport(result) => Msg::ReportSubmitted(failed("report build", result)),
        GatewayEvent::QuickReport(result) => {
            Msg::QuickReportFinished(failed("quick report", result))
        }
    }
}

/// Logs a failed request and converts the error for the core.
fn failed<T>(what: &str, result: Result<T, GatewayError>) -> Result<T, FetchFailure> {
    result.map_err(|err| {
        dash_warn!("{} failed: {}", what, err);
        to_failure(err)
    })
}

fn to_failure(err: GatewayError) -> FetchFailure {
    match err.kind {
        FailureKind::HttpStatus(status) => FetchFailure::Rejected { status },
        FailureKind::Application(message) => FetchFailure::Application(message),
        FailureKind::Decode => FetchFailure::Application(None),
        FailureKind::InvalidUrl
        | FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::TooLarge { .. }
        | FailureKind::LocalIo => FetchFailure::Transport(err.message),
    }
}
