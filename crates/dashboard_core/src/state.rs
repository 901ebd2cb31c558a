use std::collections::BTreeSet;

use crate::query::{self, SortDirection, SortKey};
use crate::record::{AnalysisRecord, RecordId};
use crate::selection::SelectionSet;
use crate::view_model::{project_detail, DashboardViewModel, DetailPane, RecordRowView};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The kind of bulk mutation currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Rerun,
    Delete,
}

/// An in-flight add/re-run/delete request. Created on dispatch, destroyed on
/// success or failure; its presence closes the aggregate action gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub kind: MutationKind,
    pub ids: Vec<RecordId>,
}

/// Lifecycle of the single-record detail projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: RecordId,
    },
    Loaded {
        record: AnalysisRecord,
    },
    Failed {
        id: RecordId,
        message: String,
    },
}

/// Ephemeral view parameters: search, sort, page. Reset only at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewState {
    search_term: String,
    sort_key: SortKey,
    sort_direction: SortDirection,
    page_index: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: SortKey::CreatedAt,
            sort_direction: SortDirection::Desc,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The whole client-side state: snapshot, fetch sequencing, view parameters,
/// selection, mutation gate, and detail projection.
///
/// Mutated only through `update`; everything else reads via `view()`.
/// Fetch ordering is last-fetch-wins by issue order: every fetch carries a
/// sequence number and a completion is applied only if its sequence is newer
/// than the last applied one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    records: Vec<AnalysisRecord>,
    has_snapshot: bool,
    issued_fetch_seq: u64,
    applied_fetch_seq: u64,
    inflight_fetches: BTreeSet<u64>,
    last_fetch_error: Option<String>,
    url_input: String,
    view: ViewState,
    selection: SelectionSet,
    pending: Option<PendingMutation>,
    detail: DetailState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        let mut state = Self::default();
        state.view.page_size = page_size.max(1);
        state
    }

    // --- fetch sequencing ---

    /// Issues a new fetch sequence number and records it as in flight.
    pub(crate) fn begin_fetch(&mut self) -> u64 {
        self.issued_fetch_seq += 1;
        self.inflight_fetches.insert(self.issued_fetch_seq);
        self.mark_dirty();
        self.issued_fetch_seq
    }

    /// Applies a successful fetch. Returns false when the response is stale
    /// (an older request resolving after a newer one) and was discarded.
    pub(crate) fn apply_snapshot(&mut self, seq: u64, records: Vec<AnalysisRecord>) -> bool {
        self.inflight_fetches.remove(&seq);
        self.mark_dirty();
        if seq <= self.applied_fetch_seq {
            log::debug!("discarding stale snapshot seq={seq} applied={}", self.applied_fetch_seq);
            return false;
        }
        self.applied_fetch_seq = seq;
        self.records = records;
        self.has_snapshot = true;
        self.last_fetch_error = None;

        // Stale-selection reconciliation: a selected record deleted
        // server-side must not linger in the selection.
        let known: BTreeSet<RecordId> = self.records.iter().map(|record| record.id).collect();
        let dropped = self.selection.retain_known(&known);
        if dropped > 0 {
            log::debug!("reconciled {dropped} stale selected id(s)");
        }

        self.clamp_page();
        true
    }

    /// Records a failed fetch. The previous snapshot stays intact. A failure
    /// older than the applied snapshot is discarded like any stale response.
    pub(crate) fn apply_fetch_failure(&mut self, seq: u64, message: String) -> bool {
        self.inflight_fetches.remove(&seq);
        self.mark_dirty();
        if seq <= self.applied_fetch_seq {
            log::debug!("discarding stale fetch failure seq={seq}: {message}");
            return false;
        }
        self.last_fetch_error = Some(message);
        true
    }

    pub fn is_fetching(&self) -> bool {
        !self.inflight_fetches.is_empty()
    }

    /// True only before the first snapshot has been applied.
    pub fn is_loading(&self) -> bool {
        !self.has_snapshot && self.is_fetching()
    }

    pub fn is_error(&self) -> bool {
        self.last_fetch_error.is_some()
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    // --- url input ---

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn clear_url_input(&mut self) {
        self.url_input.clear();
        self.mark_dirty();
    }

    // --- view parameters ---

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.view.search_term = term;
        self.clamp_page();
        self.mark_dirty();
    }

    /// Clicking the active column flips direction; a new column sorts
    /// ascending.
    pub(crate) fn toggle_sort(&mut self, key: SortKey) {
        if self.view.sort_key == key {
            self.view.sort_direction = self.view.sort_direction.flipped();
        } else {
            self.view.sort_key = key;
            self.view.sort_direction = SortDirection::Asc;
        }
        self.mark_dirty();
    }

    pub(crate) fn go_to_page(&mut self, page: usize) {
        self.view.page_index = query::clamp_page_index(page, self.total_pages());
        self.mark_dirty();
    }

    pub(crate) fn next_page(&mut self) {
        self.go_to_page(self.view.page_index.saturating_add(1));
    }

    pub(crate) fn prev_page(&mut self) {
        self.go_to_page(self.view.page_index.saturating_sub(1));
    }

    pub(crate) fn set_page_size(&mut self, size: usize) {
        self.view.page_size = size.max(1);
        self.clamp_page();
        self.mark_dirty();
    }

    fn total_pages(&self) -> usize {
        query::total_pages(self.filtered_sorted().len(), self.view.page_size)
    }

    /// Re-clamps the page index whenever the filtered sequence may have
    /// shrunk below the current page's start.
    fn clamp_page(&mut self) {
        self.view.page_index = query::clamp_page_index(self.view.page_index, self.total_pages());
    }

    // --- selection ---

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub(crate) fn set_row_checked(&mut self, id: RecordId, checked: bool) {
        if checked {
            self.selection.select(id);
        } else {
            self.selection.deselect(id);
        }
        self.mark_dirty();
    }

    /// Selects the entire filtered/sorted result set, not just the page.
    pub(crate) fn select_all_filtered(&mut self) {
        let ids: Vec<RecordId> = self.filtered_sorted().iter().map(|record| record.id).collect();
        self.selection.select_exactly(ids);
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.mark_dirty();
    }

    // --- mutation gate ---

    pub fn any_action_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PendingMutation> {
        self.pending.as_ref()
    }

    pub(crate) fn begin_mutation(&mut self, kind: MutationKind, ids: Vec<RecordId>) {
        self.pending = Some(PendingMutation { kind, ids });
        self.mark_dirty();
    }

    pub(crate) fn finish_mutation(&mut self) -> Option<PendingMutation> {
        self.mark_dirty();
        self.pending.take()
    }

    // --- detail projection ---

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub(crate) fn open_detail(&mut self, id: RecordId) {
        self.detail = DetailState::Loading { id };
        self.mark_dirty();
    }

    pub(crate) fn close_detail(&mut self) {
        self.detail = DetailState::Closed;
        self.mark_dirty();
    }

    /// Applies a detail fetch completion. A response for an identifier that
    /// is no longer the one being loaded (projection closed, user moved on)
    /// is discarded; returns false in that case.
    pub(crate) fn apply_detail(
        &mut self,
        id: RecordId,
        result: Result<AnalysisRecord, String>,
    ) -> bool {
        let wanted = match &self.detail {
            DetailState::Loading { id } => *id,
            _ => {
                log::debug!("discarding detail response for id={id}: projection not loading");
                return false;
            }
        };
        if wanted != id {
            log::debug!("discarding stale detail response for id={id}, now loading id={wanted}");
            return false;
        }
        self.detail = match result {
            Ok(record) => DetailState::Loaded { record },
            Err(message) => DetailState::Failed { id, message },
        };
        self.mark_dirty();
        true
    }

    // --- derived views ---

    pub(crate) fn filtered_sorted(&self) -> Vec<&AnalysisRecord> {
        query::filter_and_sort(
            &self.records,
            &self.view.search_term,
            self.view.sort_key,
            self.view.sort_direction,
        )
    }

    pub fn view(&self) -> DashboardViewModel {
        let filtered = self.filtered_sorted();
        let filtered_ids: Vec<RecordId> = filtered.iter().map(|record| record.id).collect();
        let total_pages = query::total_pages(filtered.len(), self.view.page_size);
        let page_index = query::clamp_page_index(self.view.page_index, total_pages);
        let rows = query::page_slice(&filtered, page_index, self.view.page_size)
            .iter()
            .map(|record| RecordRowView {
                id: record.id,
                url: record.url.clone(),
                status: record.status,
                page_title: record.page_title.clone(),
                html_version: record.html_version.clone(),
                internal_links: record.internal_links,
                external_links: record.external_links,
                inaccessible_links: record.inaccessible_links,
                selected: self.selection.contains(record.id),
            })
            .collect();

        DashboardViewModel {
            url_input: self.url_input.clone(),
            search_term: self.view.search_term.clone(),
            sort_key: self.view.sort_key,
            sort_direction: self.view.sort_direction,
            page_index,
            page_size: self.view.page_size,
            total_pages,
            rows,
            filtered_count: filtered.len(),
            record_count: self.records.len(),
            selection_count: self.selection.len(),
            is_indeterminate: self.selection.is_indeterminate(&filtered_ids),
            is_loading: self.is_loading(),
            is_fetching: self.is_fetching(),
            is_error: self.is_error(),
            last_error: self.last_fetch_error.clone(),
            any_action_pending: self.any_action_pending(),
            pending_kind: self.pending.as_ref().map(|pending| pending.kind),
            detail: self.detail_pane(),
        }
    }

    fn detail_pane(&self) -> DetailPane {
        match &self.detail {
            DetailState::Closed => DetailPane::Closed,
            DetailState::Loading { id } => DetailPane::Loading { id: *id },
            DetailState::Failed { id, message } => DetailPane::Failed {
                id: *id,
                message: message.clone(),
            },
            DetailState::Loaded { record } => DetailPane::Loaded(project_detail(record)),
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
