use dashboard_core::{Msg, SortKey};

/// One parsed line of terminal input.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  add <url>          submit a URL for analysis
  search [term]      filter by URL, title, or status (no term clears)
  sort <column>      url|status|title|html|internal|external|broken|created|updated
  page <n> | next | prev
  pagesize <n>       rows per page
  select <id> | deselect <id> | all | none
  rerun | delete     bulk action on the selection
  detail <id> | back
  refresh            poll now
  help | quit";

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Dispatch(Vec::new());
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "add" if !rest.is_empty() => Command::Dispatch(vec![
            Msg::InputChanged(rest.to_string()),
            Msg::AddSubmitted,
        ]),
        "search" => Command::Dispatch(vec![Msg::SearchChanged(rest.to_string())]),
        "sort" => match sort_key(rest) {
            Some(key) => Command::Dispatch(vec![Msg::SortClicked(key)]),
            None => Command::Unknown(format!("sort {rest}")),
        },
        "page" => match rest.parse() {
            Ok(page) => Command::Dispatch(vec![Msg::GoToPage(page)]),
            Err(_) => Command::Unknown(format!("page {rest}")),
        },
        "next" => Command::Dispatch(vec![Msg::NextPage]),
        "prev" => Command::Dispatch(vec![Msg::PrevPage]),
        "pagesize" => match rest.parse() {
            Ok(size) => Command::Dispatch(vec![Msg::PageSizeChanged(size)]),
            Err(_) => Command::Unknown(format!("pagesize {rest}")),
        },
        "select" | "deselect" => match rest.parse() {
            Ok(id) => Command::Dispatch(vec![Msg::RowChecked {
                id,
                checked: word == "select",
            }]),
            Err(_) => Command::Unknown(format!("{word} {rest}")),
        },
        "all" => Command::Dispatch(vec![Msg::SelectAllChecked { checked: true }]),
        "none" => Command::Dispatch(vec![Msg::SelectAllChecked { checked: false }]),
        "rerun" => Command::Dispatch(vec![Msg::RerunClicked]),
        "delete" => Command::Dispatch(vec![Msg::DeleteClicked]),
        "detail" => match rest.parse() {
            Ok(id) => Command::Dispatch(vec![Msg::DetailOpened { id }]),
            Err(_) => Command::Unknown(format!("detail {rest}")),
        },
        "back" => Command::Dispatch(vec![Msg::DetailClosed]),
        "refresh" => Command::Dispatch(vec![Msg::PollTick]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

fn sort_key(name: &str) -> Option<SortKey> {
    match name {
        "url" => Some(SortKey::Url),
        "status" => Some(SortKey::Status),
        "title" => Some(SortKey::PageTitle),
        "html" => Some(SortKey::HtmlVersion),
        "internal" => Some(SortKey::InternalLinks),
        "external" => Some(SortKey::ExternalLinks),
        "broken" => Some(SortKey::InaccessibleLinks),
        "created" => Some(SortKey::CreatedAt),
        "updated" => Some(SortKey::UpdatedAt),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_dispatches_input_then_submit() {
        assert_eq!(
            parse("add https://example.com"),
            Command::Dispatch(vec![
                Msg::InputChanged("https://example.com".to_string()),
                Msg::AddSubmitted,
            ])
        );
    }

    #[test]
    fn bare_search_clears_the_term() {
        assert_eq!(
            parse("search"),
            Command::Dispatch(vec![Msg::SearchChanged(String::new())])
        );
    }

    #[test]
    fn sort_maps_column_names() {
        assert_eq!(
            parse("sort created"),
            Command::Dispatch(vec![Msg::SortClicked(SortKey::CreatedAt)])
        );
        assert!(matches!(parse("sort bogus"), Command::Unknown(_)));
    }

    #[test]
    fn selection_commands_parse_identifiers() {
        assert_eq!(
            parse("select 12"),
            Command::Dispatch(vec![Msg::RowChecked {
                id: 12,
                checked: true,
            }])
        );
        assert_eq!(
            parse("deselect 12"),
            Command::Dispatch(vec![Msg::RowChecked {
                id: 12,
                checked: false,
            }])
        );
        assert!(matches!(parse("select twelve"), Command::Unknown(_)));
    }

    #[test]
    fn quit_and_help_are_recognized() {
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("q"), Command::Quit);
        assert_eq!(parse("?"), Command::Help);
    }

    #[test]
    fn blank_lines_dispatch_nothing() {
        assert_eq!(parse("   "), Command::Dispatch(Vec::new()));
    }
}
