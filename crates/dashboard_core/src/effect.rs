use crate::record::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSnapshot { seq: u64 },
    SubmitUrl { url: String },
    RerunRecords { ids: Vec<RecordId> },
    DeleteRecords { ids: Vec<RecordId> },
    FetchDetail { id: RecordId },
    Notify(Notice),
}

/// What the notification collaborator receives. The engine supplies only
/// title, description, kind, and duration; presentation is out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Success,
            duration_ms: 3000,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Info,
            duration_ms: 3000,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Error,
            duration_ms: 5000,
        }
    }
}
