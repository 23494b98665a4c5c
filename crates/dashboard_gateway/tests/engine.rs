use std::sync::{Arc, Mutex};
use std::time::Duration;

use dashboard_core::{
    Consumer, HistoryEntry, NewsItem, PageTicket, ReportReceipt, ReportRequest, SearchResult,
    StockQuote, UploadRecord,
};
use dashboard_gateway::{
    FailureKind, Gateway, GatewayError, GatewayEvent, GatewayHandle, NewsQuery, Request,
    StockPurpose,
};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct FakeGateway {
    uploaded: Mutex<Vec<(String, Vec<u8>)>>,
    searches: Mutex<Vec<(String, u32)>>,
}

fn unsupported<T>() -> Result<T, GatewayError> {
    Err(GatewayError {
        kind: FailureKind::Network,
        message: "not wired in this test".into(),
    })
}

#[async_trait::async_trait]
impl Gateway for FakeGateway {
    async fn news(&self, _query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError> {
        Ok(Vec::new())
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<SearchResult>, GatewayError> {
        self.searches.lock().unwrap().push((query.to_string(), page));
        Ok(vec![SearchResult {
            title: format!("{query} p{page}"),
            ..SearchResult::default()
        }])
    }

    async fn stock(&self, symbol: &str) -> Result<StockQuote, GatewayError> {
        Ok(StockQuote {
            symbol: symbol.to_string(),
            price: "1.00".into(),
            change: None,
            change_percent: None,
            high: None,
            low: None,
        })
    }

    async fn list_uploads(&self) -> Result<Vec<UploadRecord>, GatewayError> {
        unsupported()
    }

    async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<(), GatewayError> {
        self.uploaded
            .lock()
            .unwrap()
            .push((filename.to_string(), contents));
        Ok(())
    }

    async fn download_upload(&self, filename: &str) -> Result<Vec<u8>, GatewayError> {
        Ok(format!("contents of {filename}").into_bytes())
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        unsupported()
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn build_report(&self, _request: &ReportRequest) -> Result<ReportReceipt, GatewayError> {
        unsupported()
    }

    async fn generate_report(&self) -> Result<Option<String>, GatewayError> {
        Ok(None)
    }
}

fn next_event(handle: &GatewayHandle) -> GatewayEvent {
    handle
        .recv_timeout(Duration::from_secs(5))
        .expect("event within timeout")
}

#[test]
fn search_reply_keeps_its_ticket() {
    let fake = Arc::new(FakeGateway::default());
    let dir = tempfile::tempdir().unwrap();
    let handle = GatewayHandle::new(fake.clone(), dir.path().to_path_buf()).unwrap();

    let ticket = PageTicket {
        generation: 4,
        page: 3,
    };
    handle.submit(Request::Search {
        ticket,
        query: "markets".into(),
    });

    match next_event(&handle) {
        GatewayEvent::Search { ticket: got, result } => {
            assert_eq!(got, ticket);
            assert_eq!(result.unwrap()[0].title, "markets p3");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        fake.searches.lock().unwrap().as_slice(),
        &[("markets".to_string(), 3)]
    );
}

#[test]
fn upload_reads_local_file() {
    let fake = Arc::new(FakeGateway::default());
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("notes.txt");
    std::fs::write(&source, b"quarterly").unwrap();
    let handle = GatewayHandle::new(fake.clone(), dir.path().join("downloads")).unwrap();

    handle.submit(Request::Upload { path: source });

    assert_eq!(next_event(&handle), GatewayEvent::Upload(Ok(())));
    assert_eq!(
        fake.uploaded.lock().unwrap().as_slice(),
        &[("notes.txt".to_string(), b"quarterly".to_vec())]
    );
}

#[test]
fn upload_of_missing_file_is_a_local_failure() {
    let fake = Arc::new(FakeGateway::default());
    let dir = tempfile::tempdir().unwrap();
    let handle = GatewayHandle::new(fake.clone(), dir.path().to_path_buf()).unwrap();

    handle.submit(Request::Upload {
        path: dir.path().join("absent.txt"),
    });

    match next_event(&handle) {
        GatewayEvent::Upload(Err(err)) => assert_eq!(err.kind, FailureKind::LocalIo),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(fake.uploaded.lock().unwrap().is_empty());
}

#[test]
fn download_lands_in_directory_under_safe_name() {
    let fake = Arc::new(FakeGateway::default());
    let dir = tempfile::tempdir().unwrap();
    let target_dir = dir.path().join("downloads");
    let handle = GatewayHandle::new(fake, target_dir.clone()).unwrap();

    handle.submit(Request::Download {
        filename: "q1:notes.txt".into(),
    });

    match next_event(&handle) {
        GatewayEvent::Download { filename, result } => {
            assert_eq!(filename, "q1:notes.txt");
            let saved = result.expect("saved");
            assert_eq!(saved, target_dir.join("q1_notes.txt"));
            let contents = std::fs::read_to_string(saved).unwrap();
            assert_eq!(contents, "contents of q1:notes.txt");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn failures_are_routed_back_with_context() {
    let fake = Arc::new(FakeGateway::default());
    let dir = tempfile::tempdir().unwrap();
    let handle = GatewayHandle::new(fake, dir.path().to_path_buf()).unwrap();

    handle.submit(Request::Uploads {
        consumer: Consumer::ReportBuilder,
        generation: 3,
    });
    match next_event(&handle) {
        GatewayEvent::Uploads {
            consumer,
            generation,
            result,
        } => {
            assert_eq!(consumer, Consumer::ReportBuilder);
            assert_eq!(generation, 3);
            assert!(result.is_err());
        }
        other => panic!("unexpected event {other:?}"),
    }

    handle.submit(Request::Stock {
        purpose: StockPurpose::Report,
        symbol: "MSFT".into(),
    });
    match next_event(&handle) {
        GatewayEvent::Stock {
            purpose, symbol, ..
        } => {
            assert_eq!(purpose, StockPurpose::Report);
            assert_eq!(symbol, "MSFT");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
