use serde::{Deserialize, Serialize};

/// Backend-assigned record identifier. Stable and never reused in a session.
pub type RecordId = u64;

/// Crawl lifecycle state as reported by the backend.
///
/// `Unknown` absorbs unrecognized status strings so a single odd record
/// cannot fail deserialization of a whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Queued,
    Running,
    Done,
    Error,
    #[serde(other)]
    Unknown,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Queued => "queued",
            RecordStatus::Running => "running",
            RecordStatus::Done => "done",
            RecordStatus::Error => "error",
            RecordStatus::Unknown => "unknown",
        }
    }

    /// Capitalized badge text, e.g. "Queued".
    pub fn label(self) -> &'static str {
        match self {
            RecordStatus::Queued => "Queued",
            RecordStatus::Running => "Running",
            RecordStatus::Done => "Done",
            RecordStatus::Error => "Error",
            RecordStatus::Unknown => "Unknown",
        }
    }
}

/// One URL's crawl/analysis result as serialized by the backend.
///
/// Field names on the wire follow the backend's Go struct (`ID`, `URL`,
/// `HTMLVersion`, then PascalCase). Timestamps stay strings; sorting parses
/// them on demand (see `query::compare_timestamps`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisRecord {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(rename = "URL")]
    pub url: String,
    pub status: RecordStatus,
    #[serde(rename = "HTMLVersion")]
    pub html_version: String,
    pub page_title: String,
    pub h1_count: u32,
    pub h2_count: u32,
    pub h3_count: u32,
    pub h4_count: u32,
    pub h5_count: u32,
    pub h6_count: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub inaccessible_links: u32,
    /// Serialized JSON list of `{url, statusCode}`; may be empty or malformed.
    pub inaccessible_link_details: String,
    pub has_login_form: bool,
    /// Populated only when `status` is `error`.
    pub error_message: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AnalysisRecord {
    pub fn heading_counts(&self) -> [u32; 6] {
        [
            self.h1_count,
            self.h2_count,
            self.h3_count,
            self.h4_count,
            self.h5_count,
            self.h6_count,
        ]
    }
}

/// A link the crawler could not reach, with the HTTP status it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Best-effort parse of the broken-link payload.
///
/// Malformed JSON degrades to an empty list; the parse failure is logged for
/// diagnostics only and never surfaces to the caller.
pub fn parse_broken_link_details(details: &str) -> Vec<BrokenLink> {
    if details.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str(details) {
        Ok(links) => links,
        Err(err) => {
            log::warn!("discarding malformed broken-link payload: {err}");
            Vec::new()
        }
    }
}
