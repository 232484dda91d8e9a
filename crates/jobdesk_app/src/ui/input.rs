use chrono::NaiveDate;
use jobdesk_core::{Msg, ProjectFilter, SortOrder, StatusFilter};

/// What a line of user input asks the app to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Dispatch(Msg),
    Help,
    Quit,
    /// Input that did not parse; the text explains why.
    Invalid(String),
}

/// Parses one input line. Blank lines mean nothing.
pub fn parse(line: &str) -> Option<Action> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (trimmed, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "reload" | "r" => Action::Dispatch(Msg::ReloadRequested),
        "sort" => match parse_sort(rest) {
            Some(sort) => Action::Dispatch(Msg::SortChanged(sort)),
            None => Action::Invalid(format!(
                "unknown sort {rest:?} (none, date-asc, date-desc, wc-asc, wc-desc)"
            )),
        },
        "status" => match parse_status(rest) {
            Some(filter) => Action::Dispatch(Msg::StatusFilterChanged(filter)),
            None => Action::Invalid(format!(
                "unknown status {rest:?} (all, waiting, in-progress, completed)"
            )),
        },
        "project" => {
            if rest.is_empty() {
                Action::Invalid("project needs a name, or all".to_string())
            } else if rest.eq_ignore_ascii_case("all") {
                Action::Dispatch(Msg::ProjectFilterChanged(ProjectFilter::All))
            } else {
                Action::Dispatch(Msg::ProjectFilterChanged(ProjectFilter::Named(
                    rest.to_string(),
                )))
            }
        }
        "from" => match parse_bound(rest) {
            Ok(day) => Action::Dispatch(Msg::DateFromChanged(day)),
            Err(reason) => Action::Invalid(reason),
        },
        "to" => match parse_bound(rest) {
            Ok(day) => Action::Dispatch(Msg::DateToChanged(day)),
            Err(reason) => Action::Invalid(reason),
        },
        "accept" => match rest.parse() {
            Ok(job_id) => Action::Dispatch(Msg::AcceptClicked { job_id }),
            Err(_) => Action::Invalid(format!("accept needs a job id, got {rest:?}")),
        },
        "edit" => match rest.parse() {
            Ok(job_id) => Action::Dispatch(Msg::EditClicked { job_id }),
            Err(_) => Action::Invalid(format!("edit needs a job id, got {rest:?}")),
        },
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        _ => Action::Invalid(format!("unrecognized command {command:?} (try help)")),
    };
    Some(action)
}

fn parse_sort(raw: &str) -> Option<SortOrder> {
    match raw.to_lowercase().as_str() {
        "none" | "" => Some(SortOrder::None),
        "date-asc" => Some(SortOrder::DateAsc),
        "date-desc" => Some(SortOrder::DateDesc),
        "wc-asc" => Some(SortOrder::WcAsc),
        "wc-desc" => Some(SortOrder::WcDesc),
        _ => None,
    }
}

fn parse_status(raw: &str) -> Option<StatusFilter> {
    match raw.to_lowercase().as_str() {
        "all" | "" => Some(StatusFilter::All),
        "waiting" => Some(StatusFilter::Waiting),
        "in-progress" | "in_progress" => Some(StatusFilter::InProgress),
        "completed" => Some(StatusFilter::Completed),
        _ => None,
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, String> {
    if raw.is_empty() || raw == "-" || raw.eq_ignore_ascii_case("clear") {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("dates are YYYY-MM-DD, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_do_nothing() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   \n"), None);
    }

    #[test]
    fn reload_and_quit() {
        assert_eq!(parse("reload"), Some(Action::Dispatch(Msg::ReloadRequested)));
        assert_eq!(parse("q"), Some(Action::Quit));
    }

    #[test]
    fn sort_variants() {
        assert_eq!(
            parse("sort wc-desc"),
            Some(Action::Dispatch(Msg::SortChanged(SortOrder::WcDesc)))
        );
        assert!(matches!(parse("sort sideways"), Some(Action::Invalid(_))));
    }

    #[test]
    fn project_names_keep_spaces_and_case() {
        assert_eq!(
            parse("project Brand Site IT"),
            Some(Action::Dispatch(Msg::ProjectFilterChanged(
                ProjectFilter::Named("Brand Site IT".to_string())
            )))
        );
        assert_eq!(
            parse("project ALL"),
            Some(Action::Dispatch(Msg::ProjectFilterChanged(
                ProjectFilter::All
            )))
        );
    }

    #[test]
    fn date_bounds_parse_and_clear() {
        assert_eq!(
            parse("from 2024-03-01"),
            Some(Action::Dispatch(Msg::DateFromChanged(
                NaiveDate::from_ymd_opt(2024, 3, 1)
            )))
        );
        assert_eq!(parse("to clear"), Some(Action::Dispatch(Msg::DateToChanged(None))));
        assert!(matches!(parse("from 01/03/2024"), Some(Action::Invalid(_))));
    }

    #[test]
    fn job_actions_need_numeric_ids() {
        assert_eq!(
            parse("accept 48429"),
            Some(Action::Dispatch(Msg::AcceptClicked { job_id: 48429 }))
        );
        assert!(matches!(parse("accept that-one"), Some(Action::Invalid(_))));
    }
}
