use url::Url;

use crate::{AppState, Effect, Msg, MutationKind, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::AddSubmitted => {
            // Single aggregate gate: while any mutation is pending, further
            // submissions of any kind are ignored.
            if state.any_action_pending() {
                return (state, Vec::new());
            }
            let raw = state.url_input().trim().to_string();
            if raw.is_empty() {
                return (state, Vec::new());
            }
            match Url::parse(&raw) {
                Ok(_) => {
                    state.begin_mutation(MutationKind::Add, Vec::new());
                    vec![Effect::SubmitUrl { url: raw }]
                }
                // The backend would reject this anyway; skip the round trip
                // and keep the input so the user can fix it.
                Err(err) => vec![Effect::Notify(Notice::error(
                    "Error adding URL.",
                    format!("Not a valid URL: {err}"),
                ))],
            }
        }
        Msg::SearchChanged(term) => {
            state.set_search_term(term);
            Vec::new()
        }
        Msg::SortClicked(key) => {
            state.toggle_sort(key);
            Vec::new()
        }
        Msg::GoToPage(page) => {
            state.go_to_page(page);
            Vec::new()
        }
        Msg::NextPage => {
            state.next_page();
            Vec::new()
        }
        Msg::PrevPage => {
            state.prev_page();
            Vec::new()
        }
        Msg::PageSizeChanged(size) => {
            state.set_page_size(size);
            Vec::new()
        }
        Msg::RowChecked { id, checked } => {
            state.set_row_checked(id, checked);
            Vec::new()
        }
        Msg::SelectAllChecked { checked } => {
            if checked {
                state.select_all_filtered();
            } else {
                state.clear_selection();
            }
            Vec::new()
        }
        Msg::RerunClicked => {
            dispatch_bulk(&mut state, MutationKind::Rerun, |ids| Effect::RerunRecords { ids })
        }
        Msg::DeleteClicked => {
            dispatch_bulk(&mut state, MutationKind::Delete, |ids| Effect::DeleteRecords { ids })
        }
        Msg::PollTick => {
            let seq = state.begin_fetch();
            vec![Effect::FetchSnapshot { seq }]
        }
        Msg::SnapshotFetched { seq, result } => {
            match result {
                Ok(records) => {
                    state.apply_snapshot(seq, records);
                }
                Err(message) => {
                    state.apply_fetch_failure(seq, message);
                }
            }
            Vec::new()
        }
        Msg::MutationFinished { kind, result } => {
            state.finish_mutation();
            match result {
                Ok(()) => {
                    let mut effects = Vec::new();
                    match kind {
                        MutationKind::Add => {
                            state.clear_url_input();
                            effects.push(Effect::Notify(Notice::success(
                                "URL Added.",
                                "URL accepted for analysis.",
                            )));
                        }
                        MutationKind::Rerun => {
                            state.clear_selection();
                            effects.push(Effect::Notify(Notice::info(
                                "Re-analysis started.",
                                "Selected URLs are being re-processed.",
                            )));
                        }
                        MutationKind::Delete => {
                            state.clear_selection();
                            effects.push(Effect::Notify(Notice::success(
                                "URLs Deleted.",
                                "Selected URLs have been removed.",
                            )));
                        }
                    }
                    // Edge-triggered refresh: don't assume the mutation's
                    // outcome is visible yet, ask the backend again.
                    let seq = state.begin_fetch();
                    effects.push(Effect::FetchSnapshot { seq });
                    effects
                }
                Err(message) => vec![Effect::Notify(failure_notice(kind, message))],
            }
        }
        Msg::DetailOpened { id } => {
            state.open_detail(id);
            vec![Effect::FetchDetail { id }]
        }
        Msg::DetailFetched { id, result } => {
            state.apply_detail(id, result);
            Vec::new()
        }
        Msg::DetailClosed => {
            state.close_detail();
            Vec::new()
        }
    };

    (state, effects)
}

/// Shared dispatch for the two selection-targeted bulk actions.
fn dispatch_bulk(
    state: &mut AppState,
    kind: MutationKind,
    make_effect: impl FnOnce(Vec<crate::RecordId>) -> Effect,
) -> Vec<Effect> {
    if state.any_action_pending() {
        return Vec::new();
    }
    let ids = state.selection().to_vec();
    if ids.is_empty() {
        return Vec::new();
    }
    state.begin_mutation(kind, ids.clone());
    vec![make_effect(ids)]
}

fn failure_notice(kind: MutationKind, message: String) -> Notice {
    let (title, fallback) = match kind {
        MutationKind::Add => ("Error adding URL.", "Could not add URL."),
        MutationKind::Rerun => ("Error re-running analysis.", "Could not re-run analysis."),
        MutationKind::Delete => ("Error deleting URLs.", "Could not delete URLs."),
    };
    let description = if message.is_empty() {
        fallback.to_string()
    } else {
        message
    };
    Notice::error(title, description)
}
