use crate::query::{SortDirection, SortKey};
use crate::record::{parse_broken_link_details, AnalysisRecord, BrokenLink, RecordId, RecordStatus};
use crate::state::MutationKind;

/// Everything a renderer needs for the dashboard screen. Plain data, no
/// behavior; built fresh from `AppState::view()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardViewModel {
    pub url_input: String,
    pub search_term: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// The visible page of the filtered/sorted sequence.
    pub rows: Vec<RecordRowView>,
    pub filtered_count: usize,
    pub record_count: usize,
    pub selection_count: usize,
    pub is_indeterminate: bool,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub is_error: bool,
    pub last_error: Option<String>,
    pub any_action_pending: bool,
    pub pending_kind: Option<MutationKind>,
    pub detail: DetailPane,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRowView {
    pub id: RecordId,
    pub url: String,
    pub status: RecordStatus,
    pub page_title: String,
    pub html_version: String,
    pub internal_links: u32,
    pub external_links: u32,
    pub inaccessible_links: u32,
    pub selected: bool,
}

/// Render state of the single-record detail projection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailPane {
    #[default]
    Closed,
    Loading {
        id: RecordId,
    },
    Failed {
        id: RecordId,
        message: String,
    },
    Loaded(DetailViewModel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: RecordId,
    pub url: String,
    pub status: RecordStatus,
    pub error_message: String,
    pub page_title: String,
    pub html_version: String,
    pub has_login_form: bool,
    pub updated_at: String,
    pub heading_counts: [u32; 6],
    /// Two-slice internal/external split for the chart collaborator.
    pub link_distribution: [LinkSlice; 2],
    pub inaccessible_links: u32,
    pub broken_links: Vec<BrokenLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSlice {
    pub label: &'static str,
    pub value: u32,
}

/// Derives the detail projection from a fetched record. Broken-link parsing
/// is best-effort; malformed payloads yield an empty list.
pub fn project_detail(record: &AnalysisRecord) -> DetailViewModel {
    DetailViewModel {
        id: record.id,
        url: record.url.clone(),
        status: record.status,
        error_message: record.error_message.clone(),
        page_title: record.page_title.clone(),
        html_version: record.html_version.clone(),
        has_login_form: record.has_login_form,
        updated_at: record.updated_at.clone(),
        heading_counts: record.heading_counts(),
        link_distribution: [
            LinkSlice {
                label: "Internal Links",
                value: record.internal_links,
            },
            LinkSlice {
                label: "External Links",
                value: record.external_links,
            },
        ],
        inaccessible_links: record.inaccessible_links,
        broken_links: parse_broken_link_details(&record.inaccessible_link_details),
    }
}
