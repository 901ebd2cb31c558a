use std::sync::Once;

use dashboard_core::{update, AnalysisRecord, AppState, Effect, Msg, RecordStatus, SortKey};

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

fn load_snapshot(state: AppState, records: Vec<AnalysisRecord>) -> AppState {
    let (state, effects) = update(state, Msg::PollTick);
    let seq = match effects.as_slice() {
        [Effect::FetchSnapshot { seq }] => *seq,
        other => panic!("expected a fetch effect, got {other:?}"),
    };
    let (state, _) = update(state, Msg::SnapshotFetched { seq, result: Ok(records) });
    state
}

#[test]
fn row_checkbox_selects_and_deselects() {
    init_logging();
    let state = load_snapshot(
        AppState::new(),
        vec![record(1, "https://a.example.com"), record(2, "https://b.example.com")],
    );

    let (state, _) = update(state, Msg::RowChecked { id: 1, checked: true });
    assert_eq!(state.selection().to_vec(), vec![1]);

    let (state, _) = update(state, Msg::RowChecked { id: 1, checked: false });
    assert!(state.selection().is_empty());
}

#[test]
fn select_all_targets_the_filtered_set_not_the_page() {
    init_logging();
    let mut records: Vec<AnalysisRecord> = (1..=30)
        .map(|id| record(id, &format!("https://site{id}.example.com")))
        .collect();
    for needle in records.iter_mut().take(3) {
        needle.page_title = "needle".to_string();
    }

    let state = load_snapshot(AppState::new(), records);
    let (state, _) = update(state, Msg::SearchChanged("needle".to_string()));
    let (state, _) = update(state, Msg::SelectAllChecked { checked: true });

    // Only the three matching records, even though page size is 20.
    assert_eq!(state.selection().to_vec(), vec![1, 2, 3]);

    let (state, _) = update(state, Msg::SelectAllChecked { checked: false });
    assert!(state.selection().is_empty());
}

#[test]
fn selection_survives_search_sort_and_page_changes() {
    init_logging();
    let records: Vec<AnalysisRecord> = (1..=25)
        .map(|id| record(id, &format!("https://site{id}.example.com")))
        .collect();

    let state = load_snapshot(AppState::new(), records);
    let (state, _) = update(state, Msg::SelectAllChecked { checked: true });
    assert_eq!(state.selection().len(), 25);

    // Narrow the view to 3 records; the selection set is untouched.
    let (state, _) = update(state, Msg::SearchChanged("site1".to_string()));
    assert!(state.view().filtered_count < 25);
    assert_eq!(state.selection().len(), 25);

    let (state, _) = update(state, Msg::SortClicked(SortKey::Url));
    let (state, _) = update(state, Msg::NextPage);
    assert_eq!(state.selection().len(), 25);
}

#[test]
fn stale_selected_ids_are_dropped_on_snapshot_application() {
    init_logging();
    let state = load_snapshot(
        AppState::new(),
        vec![record(1, "https://a.example.com"), record(2, "https://b.example.com")],
    );
    let (state, _) = update(state, Msg::SelectAllChecked { checked: true });
    assert_eq!(state.selection().to_vec(), vec![1, 2]);

    // Record 2 was deleted by another client; the next poll drops it.
    let state = load_snapshot(state, vec![record(1, "https://a.example.com")]);
    assert_eq!(state.selection().to_vec(), vec![1]);
}

#[test]
fn indeterminate_reflects_partial_coverage_of_filtered_set() {
    init_logging();
    let state = load_snapshot(
        AppState::new(),
        vec![record(1, "https://a.example.com"), record(2, "https://b.example.com")],
    );

    let (state, _) = update(state, Msg::RowChecked { id: 1, checked: true });
    assert!(state.view().is_indeterminate);

    let (state, _) = update(state, Msg::RowChecked { id: 2, checked: true });
    assert!(!state.view().is_indeterminate);
}

#[test]
fn narrowing_search_reclamps_page() {
    init_logging();
    let records: Vec<AnalysisRecord> = (1..=25)
        .map(|id| record(id, &format!("https://site{id}.example.com")))
        .collect();

    let state = load_snapshot(AppState::new(), records);
    let (state, _) = update(state, Msg::GoToPage(2));
    assert_eq!(state.view().page_index, 2);

    let (state, _) = update(state, Msg::SearchChanged("site3".to_string()));
    assert_eq!(state.view().page_index, 1);
    assert!(!state.view().rows.is_empty());
}
