use std::path::PathBuf;
use std::time::Duration;

use crate::{NewsCategory, PageTicket, ReportRequest, ToastId};

/// Which view state container a shared endpoint's response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Consumer {
    Dashboard,
    ReportBuilder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login {
        username: String,
        password: String,
    },
    /// Store (`Some`) or forget (`None`) the remembered username.
    RememberUser(Option<String>),
    FetchNews {
        consumer: Consumer,
        ticket: PageTicket,
        topic: Option<String>,
        category: Option<NewsCategory>,
    },
    FetchSearch {
        ticket: PageTicket,
        query: String,
    },
    FetchStock {
        symbol: String,
    },
    /// `generation` is echoed back so replies from before a logout are
    /// recognised as stale.
    FetchUploads {
        consumer: Consumer,
        generation: u64,
    },
    UploadFile {
        path: PathBuf,
    },
    DownloadUpload {
        filename: String,
    },
    FetchHistory {
        generation: u64,
    },
    LookupReportStock {
        symbol: String,
    },
    SubmitReport(ReportRequest),
    GenerateQuickReport,
    ExpireToast {
        id: ToastId,
        after: Duration,
    },
}
