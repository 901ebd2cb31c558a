use dashboard_core::{AnalysisRecord, MutationKind, RecordId};

/// Failure taxonomy for data-source calls.
///
/// `Backend` carries the `{error}` body's message when the backend sent one,
/// else the HTTP status text, so the notice shown to the user can prefer the
/// backend's wording.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Completion events emitted by the engine thread, in arbitrary order.
/// The core's sequence/identifier discipline decides what gets applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SnapshotFetched {
        seq: u64,
        result: Result<Vec<AnalysisRecord>, ApiError>,
    },
    MutationFinished {
        kind: MutationKind,
        result: Result<(), ApiError>,
    },
    DetailFetched {
        id: RecordId,
        result: Result<AnalysisRecord, ApiError>,
    },
}
