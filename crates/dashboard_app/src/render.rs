//! Plain-text rendering of the view models.

use dashboard_core::{
    DashboardViewModel, DetailPane, DetailViewModel, RecordRowView, SortDirection, SortKey,
};

pub fn print_dashboard(view: &DashboardViewModel) {
    for line in render(view) {
        println!("{line}");
    }
}

/// Renders the whole screen: the detail projection when one is open,
/// otherwise the record table.
pub fn render(view: &DashboardViewModel) -> Vec<String> {
    match &view.detail {
        DetailPane::Closed => render_dashboard(view),
        DetailPane::Loading { id } => vec![format!("Loading details for #{id}...")],
        DetailPane::Failed { id, message } => {
            vec![format!("Error loading details for #{id}: {message}")]
        }
        DetailPane::Loaded(detail) => render_detail(detail),
    }
}

fn render_dashboard(view: &DashboardViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = format!("Web Crawler Dashboard - {} URLs", view.record_count);
    if view.is_fetching && !view.is_loading {
        header.push_str(" (refreshing)");
    }
    if view.any_action_pending {
        header.push_str(" [action pending]");
    }
    lines.push(header);

    if let Some(error) = &view.last_error {
        lines.push(format!("Error: {error}"));
    }
    if view.is_loading {
        lines.push("Loading URLs...".to_string());
        return lines;
    }

    if !view.search_term.is_empty() {
        lines.push(format!("search: {:?}", view.search_term));
    }
    lines.push(format!(
        "sorted by {} {}",
        sort_label(view.sort_key),
        match view.sort_direction {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    ));

    if view.rows.is_empty() {
        lines.push(
            if view.search_term.is_empty() {
                "No URLs added yet. Add one above to get started!"
            } else {
                "No results found for your search."
            }
            .to_string(),
        );
        return lines;
    }

    for row in &view.rows {
        lines.push(render_row(row));
    }
    lines.push(format!(
        "page {}/{} - {} of {} shown, {} selected",
        view.page_index, view.total_pages, view.rows.len(), view.filtered_count,
        view.selection_count,
    ));
    lines
}

fn render_row(row: &RecordRowView) -> String {
    let mark = if row.selected { "[x]" } else { "[ ]" };
    format!(
        "{mark} #{:<5} {:<8} {}  title={}  html={}  links={}int/{}ext/{}broken",
        row.id,
        row.status.label(),
        row.url,
        fallback(&row.page_title),
        fallback(&row.html_version),
        row.internal_links,
        row.external_links,
        row.inaccessible_links,
    )
}

fn render_detail(detail: &DetailViewModel) -> Vec<String> {
    let mut lines = vec![
        format!("Details for: {}", detail.url),
        format!("Status: {}", detail.status.label()),
    ];
    if !detail.error_message.is_empty() {
        lines.push(format!("Error: {}", detail.error_message));
    }
    lines.push(format!("Title: {}", fallback(&detail.page_title)));
    lines.push(format!("HTML Version: {}", fallback(&detail.html_version)));
    lines.push(format!(
        "Has Login Form: {}",
        if detail.has_login_form { "Yes" } else { "No" }
    ));
    lines.push(format!("Last Updated: {}", detail.updated_at));

    let headings = detail
        .heading_counts
        .iter()
        .enumerate()
        .map(|(i, count)| format!("H{}: {count}", i + 1))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(format!("Heading Counts: {headings}"));

    // The two-slice split the chart collaborator would plot.
    let total: u32 = detail.link_distribution.iter().map(|slice| slice.value).sum();
    for slice in &detail.link_distribution {
        let percent = if total == 0 {
            0
        } else {
            (u64::from(slice.value) * 100 / u64::from(total)) as u32
        };
        lines.push(format!("{}: {} ({percent}%)", slice.label, slice.value));
    }

    lines.push(format!("Inaccessible Links ({})", detail.inaccessible_links));
    if detail.broken_links.is_empty() {
        lines.push("No inaccessible links found.".to_string());
    } else {
        for link in &detail.broken_links {
            lines.push(format!("  [{}] {}", link.status_code, link.url));
        }
    }
    lines
}

fn fallback(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Url => "URL",
        SortKey::Status => "Status",
        SortKey::PageTitle => "Title",
        SortKey::HtmlVersion => "HTML Version",
        SortKey::InternalLinks => "Internal Links",
        SortKey::ExternalLinks => "External Links",
        SortKey::InaccessibleLinks => "Inaccessible Links",
        SortKey::CreatedAt => "Created",
        SortKey::UpdatedAt => "Updated",
    }
}
