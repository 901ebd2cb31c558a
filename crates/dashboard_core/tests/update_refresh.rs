use std::sync::Once;

use dashboard_core::{update, AnalysisRecord, AppState, Effect, Msg, RecordStatus};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn record(id: u64, url: &str) -> AnalysisRecord {
    AnalysisRecord {
        id,
        url: url.to_string(),
        status: RecordStatus::Done,
        html_version: "HTML5".to_string(),
        page_title: String::new(),
        h1_count: 0,
        h2_count: 0,
        h3_count: 0,
        h4_count: 0,
        h5_count: 0,
        h6_count: 0,
        internal_links: 0,
        external_links: 0,
        inaccessible_links: 0,
        inaccessible_link_details: String::new(),
        has_login_form: false,
        error_message: String::new(),
        created_at: "2025-07-01T10:00:00Z".to_string(),
        updated_at: "2025-07-01T10:00:00Z".to_string(),
    }
}

fn tick(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::PollTick);
    match effects.as_slice() {
        [Effect::FetchSnapshot { seq }] => (state, *seq),
        other => panic!("expected a fetch effect, got {other:?}"),
    }
}

#[test]
fn poll_ticks_issue_monotonic_sequences() {
    init_logging();
    let state = AppState::new();
    let (state, first) = tick(state);
    let (state, second) = tick(state);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert!(state.view().is_fetching);
    assert!(state.view().is_loading);
}

#[test]
fn snapshot_application_populates_rows() {
    init_logging();
    let state = AppState::new();
    let (mut state, seq) = tick(state);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Ok(vec![record(1, "https://a.example.com")]),
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let view = state.view();
    assert!(!view.is_loading);
    assert!(!view.is_fetching);
    assert!(!view.is_error);
    assert_eq!(view.record_count, 1);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].url, "https://a.example.com");
}

#[test]
fn older_response_after_newer_is_discarded() {
    init_logging();
    let state = AppState::new();
    let (state, first) = tick(state);
    let (state, second) = tick(state);

    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq: second,
            result: Ok(vec![record(2, "https://fresh.example.com")]),
        },
    );
    // The slower, older request resolves afterwards and must not regress.
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq: first,
            result: Ok(vec![record(1, "https://stale.example.com")]),
        },
    );

    let view = state.view();
    assert_eq!(view.record_count, 1);
    assert_eq!(view.rows[0].url, "https://fresh.example.com");
    assert!(!view.is_fetching);
}

#[test]
fn fetch_failure_keeps_previous_snapshot() {
    init_logging();
    let state = AppState::new();
    let (state, seq) = tick(state);
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Ok(vec![record(1, "https://a.example.com")]),
        },
    );

    let (state, seq) = tick(state);
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Err("connection refused".to_string()),
        },
    );

    let view = state.view();
    assert!(view.is_error);
    assert_eq!(view.last_error.as_deref(), Some("connection refused"));
    assert_eq!(view.record_count, 1);

    // The next successful poll clears the error flag.
    let (state, seq) = tick(state);
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Ok(vec![record(1, "https://a.example.com")]),
        },
    );
    assert!(!state.view().is_error);
}

#[test]
fn stale_failure_after_newer_success_is_discarded() {
    init_logging();
    let state = AppState::new();
    let (state, first) = tick(state);
    let (state, second) = tick(state);

    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq: second,
            result: Ok(vec![record(1, "https://a.example.com")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq: first,
            result: Err("timed out".to_string()),
        },
    );

    assert!(!state.view().is_error);
}

#[test]
fn initial_failure_surfaces_without_data() {
    init_logging();
    let state = AppState::new();
    let (state, seq) = tick(state);
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Err("boom".to_string()),
        },
    );

    let view = state.view();
    assert!(view.is_error);
    assert!(!view.is_loading);
    assert_eq!(view.record_count, 0);
}

#[test]
fn shrinking_snapshot_reclamps_page_index() {
    init_logging();
    let records: Vec<AnalysisRecord> = (1..=25)
        .map(|id| record(id, &format!("https://{id}.example.com")))
        .collect();

    let state = AppState::new();
    let (state, seq) = tick(state);
    let (state, _) = update(state, Msg::SnapshotFetched { seq, result: Ok(records) });
    let (state, _) = update(state, Msg::GoToPage(2));
    assert_eq!(state.view().page_index, 2);

    // Deletion server-side shrinks the collection below page 2's start.
    let (state, seq) = tick(state);
    let (state, _) = update(
        state,
        Msg::SnapshotFetched {
            seq,
            result: Ok(vec![record(1, "https://1.example.com")]),
        },
    );

    let view = state.view();
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.page_index, 1);
    assert_eq!(view.rows.len(), 1);
}
