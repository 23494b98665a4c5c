use dashboard_core::{
    update, AppState, ArticleId, Consumer, Effect, FetchFailure, Msg, NewsArticle, NewsItem,
    PageTicket, ReportReceipt, ReportRequest, StockQuote, ToastKind, UploadRecord,
    DEFAULT_REPORT_TITLE, NO_URL_RETURNED,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    dashboard_logging::initialize_for_tests();
}

fn article(n: usize) -> NewsArticle {
    NewsArticle {
        title: format!("Headline {n}"),
        description: format!("Body {n}"),
        url: format!("https://news.example.com/{n}"),
        ..NewsArticle::default()
    }
}

fn snapshot(count: usize) -> Vec<NewsItem> {
    (0..count)
        .map(|n| NewsItem::new(ArticleId::new(format!("id-{n}")), article(n)))
        .collect()
}

fn upload(id: i64, filename: &str) -> UploadRecord {
    UploadRecord {
        id,
        filename: filename.to_string(),
        size: 2048,
        uploaded_at: "2024-05-01 10:00:00".to_string(),
    }
}

fn quote(symbol: &str) -> StockQuote {
    StockQuote {
        symbol: symbol.to_string(),
        price: "189.84".to_string(),
        change: Some("1.20".to_string()),
        change_percent: Some("0.64%".to_string()),
        high: None,
        low: None,
    }
}

/// Logged in, with the builder's news snapshot and upload list loaded.
fn mounted_builder(news: usize, uploads: Vec<UploadRecord>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::UsernameChanged("alice".into()));
    let (state, _) = update(state, Msg::PasswordChanged("secret123".into()));
    let (state, _) = update(state, Msg::LoginSubmitted);
    let (state, effects) = update(state, Msg::LoginFinished(Ok(())));
    let ticket = builder_ticket(&effects);
    let (state, _) = update(
        state,
        Msg::NewsLoaded {
            consumer: Consumer::ReportBuilder,
            ticket,
            result: Ok(snapshot(news)),
        },
    );
    let (state, _) = update(
        state,
        Msg::UploadsLoaded {
            consumer: Consumer::ReportBuilder,
            generation: ticket.generation,
            result: Ok(uploads),
        },
    );
    state
}

fn builder_ticket(effects: &[Effect]) -> PageTicket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchNews {
                consumer: Consumer::ReportBuilder,
                ticket,
                ..
            } => Some(*ticket),
            _ => None,
        })
        .expect("report builder news fetch")
}

fn submitted_request(effects: &[Effect]) -> ReportRequest {
    match effects {
        [Effect::SubmitReport(request)] => request.clone(),
        other => panic!("expected a single submit, got {other:?}"),
    }
}

#[test]
fn build_with_symbol_looks_up_stock_then_submits_once() {
    init_logging();
    let state = mounted_builder(3, Vec::new());
    let (state, _) = update(state, Msg::ReportNewsToggledAt(1));
    let (state, _) = update(state, Msg::ReportSymbolChanged(" AAPL ".into()));

    let (state, effects) = update(state, Msg::ReportBuildClicked);
    assert_eq!(
        effects,
        vec![Effect::LookupReportStock {
            symbol: "AAPL".to_string()
        }]
    );
    assert!(state.view().report.building);

    let (state, effects) = update(state, Msg::ReportStockResolved(Ok(quote("AAPL"))));
    let request = submitted_request(&effects);
    assert_eq!(request.title, DEFAULT_REPORT_TITLE);
    assert_eq!(request.news, vec![article(1)]);
    assert_eq!(request.stock, Some(quote("AAPL")));
    assert!(request.uploads.is_empty());
    assert_eq!(request.notes, "");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["stock"]["symbol"], "AAPL");

    // A stray second stock reply does not submit again.
    let (_state, effects) = update(state, Msg::ReportStockResolved(Ok(quote("AAPL"))));
    assert!(effects.is_empty());
}

#[test]
fn stock_reply_without_symbol_is_discarded() {
    init_logging();
    for reply in [
        Ok(quote("")),
        Err(FetchFailure::Application(None)),
        Err(FetchFailure::Transport("timeout".into())),
    ] {
        let state = mounted_builder(1, Vec::new());
        let (state, _) = update(state, Msg::ReportNewsToggledAt(0));
        let (state, _) = update(state, Msg::ReportSymbolChanged("AAPL".into()));
        let (state, _) = update(state, Msg::ReportBuildClicked);
        let (_state, effects) = update(state, Msg::ReportStockResolved(reply));

        let request = submitted_request(&effects);
        assert_eq!(request.stock, None);
        assert_eq!(request.news.len(), 1);
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["stock"].is_null());
    }
}

#[test]
fn build_without_symbol_submits_directly() {
    init_logging();
    let state = mounted_builder(2, vec![upload(1, "a.csv"), upload(2, "b.json")]);
    let (state, _) = update(state, Msg::ReportUploadToggled("b.json".into()));
    let (state, _) = update(state, Msg::ReportUploadToggled("a.csv".into()));
    let (state, _) = update(state, Msg::ReportTitleChanged("Weekly".into()));
    let (state, _) = update(state, Msg::ReportNotesChanged("for the team".into()));
    let (state, _) = update(state, Msg::ReportSymbolChanged("   ".into()));

    let (state, effects) = update(state, Msg::ReportBuildClicked);
    let request = submitted_request(&effects);
    assert_eq!(request.title, "Weekly");
    assert!(request.news.is_empty());
    assert_eq!(request.uploads, vec!["b.json".to_string(), "a.csv".to_string()]);
    assert_eq!(request.notes, "for the team");

    // Building: another click is ignored.
    let (_state, effects) = update(state, Msg::ReportBuildClicked);
    assert!(effects.is_empty());
}

#[test]
fn selection_is_keyed_by_article_identity() {
    init_logging();
    let state = mounted_builder(3, Vec::new());
    let (state, _) = update(state, Msg::ReportNewsToggled(ArticleId::new("id-2")));
    let (state, _) = update(state, Msg::ReportNewsToggled(ArticleId::new("id-0")));
    let (state, _) = update(state, Msg::ReportNewsToggled(ArticleId::new("missing")));
    // Toggled twice: deselected again.
    let (state, _) = update(state, Msg::ReportNewsToggledAt(2));
    let (state, _) = update(state, Msg::ReportNewsToggledAt(2));
    let (state, _) = update(state, Msg::ReportNewsToggledAt(9));

    let selected: Vec<_> = state
        .view()
        .report
        .news
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.index)
        .collect();
    assert_eq!(selected, vec![0, 2]);

    let (_state, effects) = update(state, Msg::ReportBuildClicked);
    let request = submitted_request(&effects);
    assert_eq!(request.news, vec![article(0), article(2)]);
}

#[test]
fn receipt_url_is_used_directly_or_derived() {
    init_logging();
    let receipts = [
        (
            ReportReceipt {
                url: Some("/reports/Weekly_1.pdf".into()),
                filename: Some("ignored.pdf".into()),
            },
            "/reports/Weekly_1.pdf",
        ),
        (
            ReportReceipt {
                url: None,
                filename: Some("Weekly_2.txt".into()),
            },
            "/reports/Weekly_2.txt",
        ),
    ];
    for (receipt, expected) in receipts {
        let state = mounted_builder(0, Vec::new());
        let (state, _) = update(state, Msg::ReportBuildClicked);
        let (state, effects) = update(state, Msg::ReportSubmitted(Ok(receipt)));
        assert!(effects.is_empty());
        let view = state.view();
        assert_eq!(view.report.result_url.as_deref(), Some(expected));
        assert!(!view.report.building);
    }
}

#[test]
fn receipt_without_url_or_filename_alerts() {
    init_logging();
    let state = mounted_builder(1, Vec::new());
    let (state, _) = update(state, Msg::ReportBuildClicked);
    let (state, effects) = update(state, Msg::ReportSubmitted(Ok(ReportReceipt::default())));

    assert!(matches!(&effects[..], [Effect::ExpireToast { .. }]));
    let view = state.view();
    assert_eq!(view.report.result_url, None);
    assert_eq!(view.toasts.len(), 1);
    assert_eq!(view.toasts[0].kind, ToastKind::Warning);
    assert_eq!(view.toasts[0].message, NO_URL_RETURNED);
}

#[test]
fn submit_failure_is_surfaced() {
    init_logging();
    let state = mounted_builder(1, Vec::new());
    let (state, _) = update(state, Msg::ReportBuildClicked);
    let (state, _) = update(
        state,
        Msg::ReportSubmitted(Err(FetchFailure::Transport("connection refused".into()))),
    );
    let view = state.view();
    assert_eq!(view.toasts[0].kind, ToastKind::Error);
    assert!(view.toasts[0].message.starts_with("Error building report: "));
    assert!(!view.report.building);
    assert_eq!(view.report.result_url, None);
}

#[test]
fn new_build_clears_previous_result() {
    init_logging();
    let state = mounted_builder(0, Vec::new());
    let (state, _) = update(state, Msg::ReportBuildClicked);
    let (state, _) = update(
        state,
        Msg::ReportSubmitted(Ok(ReportReceipt {
            url: Some("/reports/a.txt".into()),
            filename: None,
        })),
    );
    let (state, _) = update(state, Msg::ReportBuildClicked);
    assert_eq!(state.view().report.result_url, None);
}

#[test]
fn builder_source_failures_leave_empty_defaults() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::UsernameChanged("alice".into()));
    let (state, _) = update(state, Msg::PasswordChanged("secret123".into()));
    let (state, _) = update(state, Msg::LoginSubmitted);
    let (state, effects) = update(state, Msg::LoginFinished(Ok(())));
    let (state, _) = update(
        state,
        Msg::NewsLoaded {
            consumer: Consumer::ReportBuilder,
            ticket: builder_ticket(&effects),
            result: Err(FetchFailure::Rejected { status: 500 }),
        },
    );
    let (state, _) = update(
        state,
        Msg::UploadsLoaded {
            consumer: Consumer::ReportBuilder,
            generation: builder_ticket(&effects).generation,
            result: Err(FetchFailure::Transport("down".into())),
        },
    );
    let view = state.view();
    assert!(view.report.news.is_empty());
    assert!(view.report.uploads.is_empty());
    assert!(view.toasts.is_empty());

    let (_state, effects) = update(state, Msg::ReportBuildClicked);
    let request = submitted_request(&effects);
    assert!(request.news.is_empty());
}

#[test]
fn builder_snapshot_is_independent_of_feed() {
    init_logging();
    let state = mounted_builder(2, Vec::new());
    let (state, effects) = update(state, Msg::NewsSearchSubmitted);
    let feed_ticket = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchNews {
                consumer: Consumer::Dashboard,
                ticket,
                ..
            } => Some(*ticket),
            _ => None,
        })
        .unwrap();
    let (state, _) = update(
        state,
        Msg::NewsLoaded {
            consumer: Consumer::Dashboard,
            ticket: feed_ticket,
            result: Ok(Vec::new()),
        },
    );
    assert_eq!(state.view().report.news.len(), 2);
}

#[test]
fn quick_report_shows_message_or_default() {
    init_logging();
    let state = mounted_builder(0, Vec::new());
    let (state, effects) = update(state, Msg::QuickReportClicked);
    assert_eq!(effects, vec![Effect::GenerateQuickReport]);
    let (state, _) = update(
        state,
        Msg::QuickReportFinished(Ok(Some("Report generated".into()))),
    );
    assert_eq!(
        state.view().quick_report_message.as_deref(),
        Some("Report generated")
    );

    let (state, _) = update(state, Msg::QuickReportClicked);
    let (state, _) = update(state, Msg::QuickReportFinished(Ok(None)));
    assert_eq!(
        state.view().quick_report_message.as_deref(),
        Some("Report generated!")
    );
}
