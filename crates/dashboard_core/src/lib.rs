//! Dashboard core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod query;
mod record;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Notice, NoticeKind};
pub use msg::Msg;
pub use query::{
    clamp_page_index, filter_and_sort, matches_search, page_slice, total_pages, SortDirection,
    SortKey,
};
pub use record::{
    parse_broken_link_details, AnalysisRecord, BrokenLink, RecordId, RecordStatus,
};
pub use selection::SelectionSet;
pub use state::{
    AppState, DetailState, MutationKind, PendingMutation, DEFAULT_PAGE_SIZE,
};
pub use update::update;
pub use view_model::{
    project_detail, DashboardViewModel, DetailPane, DetailViewModel, LinkSlice, RecordRowView,
};
