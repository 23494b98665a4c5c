use std::fmt;

/// Why a request produced no usable data, as seen by the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request never got a response (connect error, timeout, bad URL).
    Transport(String),
    /// The backend answered with a non-success status.
    Rejected { status: u16 },
    /// A 200 response carrying an `error` field, or missing required data.
    Application(Option<String>),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(message) => write!(f, "network error: {message}"),
            FetchFailure::Rejected { status } => write!(f, "http status {status}"),
            FetchFailure::Application(Some(message)) => f.write_str(message),
            FetchFailure::Application(None) => f.write_str("unexpected response"),
        }
    }
}
