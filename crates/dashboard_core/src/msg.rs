use crate::query::SortKey;
use crate::record::{AnalysisRecord, RecordId};
use crate::state::MutationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current URL input for analysis.
    AddSubmitted,
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked a column header; same key flips direction.
    SortClicked(SortKey),
    GoToPage(usize),
    NextPage,
    PrevPage,
    PageSizeChanged(usize),
    /// User toggled one row's checkbox.
    RowChecked { id: RecordId, checked: bool },
    /// User toggled the select-all checkbox. Checked selects the entire
    /// filtered result set, not just the visible page.
    SelectAllChecked { checked: bool },
    /// User clicked Re-run Analysis for the current selection.
    RerunClicked,
    /// User clicked Delete Selected for the current selection.
    DeleteClicked,
    /// Refresh timer fired (also sent once at startup).
    PollTick,
    /// A snapshot fetch completed.
    SnapshotFetched {
        seq: u64,
        result: Result<Vec<AnalysisRecord>, String>,
    },
    /// A bulk mutation completed.
    MutationFinished {
        kind: MutationKind,
        result: Result<(), String>,
    },
    /// User navigated to a record's detail view.
    DetailOpened { id: RecordId },
    /// The detail fetch completed.
    DetailFetched {
        id: RecordId,
        result: Result<AnalysisRecord, String>,
    },
    /// User navigated away from the detail view.
    DetailClosed,
}
