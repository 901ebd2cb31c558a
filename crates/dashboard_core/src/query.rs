//! Pure filter/sort/paginate pipeline over a records snapshot.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::record::AnalysisRecord;

/// Sortable record attribute. Dispatches the comparator on the attribute's
/// semantic type: case-insensitive text, numeric count, or timestamp value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Url,
    Status,
    PageTitle,
    HtmlVersion,
    InternalLinks,
    ExternalLinks,
    InaccessibleLinks,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Case-insensitive substring match against url, page title, or status.
/// An empty term matches every record.
pub fn matches_search(record: &AnalysisRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.url.to_lowercase().contains(&needle)
        || record.page_title.to_lowercase().contains(&needle)
        || record.status.as_str().contains(&needle)
}

/// Filters by `term` and sorts by `key`/`direction`, borrowing from the
/// snapshot. Ties break on record id, so the result is a total order and
/// flipping the direction yields the exact reverse sequence.
pub fn filter_and_sort<'a>(
    records: &'a [AnalysisRecord],
    term: &str,
    key: SortKey,
    direction: SortDirection,
) -> Vec<&'a AnalysisRecord> {
    let mut rows: Vec<&AnalysisRecord> = records
        .iter()
        .filter(|record| matches_search(record, term))
        .collect();
    rows.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key).then_with(|| a.id.cmp(&b.id));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

fn compare_by_key(a: &AnalysisRecord, b: &AnalysisRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Url => compare_text(&a.url, &b.url),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        SortKey::PageTitle => compare_text(&a.page_title, &b.page_title),
        SortKey::HtmlVersion => compare_text(&a.html_version, &b.html_version),
        SortKey::InternalLinks => a.internal_links.cmp(&b.internal_links),
        SortKey::ExternalLinks => a.external_links.cmp(&b.external_links),
        SortKey::InaccessibleLinks => a.inaccessible_links.cmp(&b.inaccessible_links),
        SortKey::CreatedAt => compare_timestamps(&a.created_at, &b.created_at),
        SortKey::UpdatedAt => compare_timestamps(&a.updated_at, &b.updated_at),
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Timestamps are strings on the wire but must order by time value, not
/// lexicographically, so mixed formats still sort correctly. Unparseable
/// values order before parseable ones.
fn compare_timestamps(a: &str, b: &str) -> Ordering {
    parse_timestamp(a).cmp(&parse_timestamp(b))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    None
}

/// `max(1, ceil(len / page_size))`. A zero page size is treated as one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Clamps a 1-based page index into `[1, total]`.
pub fn clamp_page_index(page_index: usize, total: usize) -> usize {
    page_index.clamp(1, total.max(1))
}

/// The visible slice for a page, after clamping. Never panics and never
/// yields elements outside `items`.
pub fn page_slice<T>(items: &[T], page_index: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let page = clamp_page_index(page_index, total_pages(items.len(), page_size));
    let start = (page - 1) * page_size;
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}
