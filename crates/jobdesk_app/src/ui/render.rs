use chrono::{DateTime, Utc};
use jobdesk_core::{
    AcceptControl, AppViewModel, JobAction, JobCardView, JobId, ProjectFilter, SortOrder, Tone,
};

/// Renders the whole view model as terminal lines. The visible list is
/// rebuilt from scratch on every render; the same view model always yields
/// the same lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("-".repeat(72));
    lines.push(status_text(view));
    lines.push(summary_text(view));
    if !view.project_options.is_empty() {
        lines.push(format!("Projects: {}", view.project_options.join(", ")));
    }
    if view.cards.is_empty() {
        lines.push("No jobs found.".to_string());
    } else {
        for card in &view.cards {
            render_card(&mut lines, card);
        }
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn help_banner() -> Vec<String> {
    [
        "Commands:",
        "  reload                     fetch the job list from the TMS",
        "  sort <key>                 none | date-asc | date-desc | wc-asc | wc-desc",
        "  status <filter>            all | waiting | in-progress | completed",
        "  project <name>|all         filter by project (names as listed)",
        "  from <YYYY-MM-DD>|clear    inclusive lower date bound",
        "  to <YYYY-MM-DD>|clear      inclusive upper date bound",
        "  accept <id>                accept a waiting job",
        "  edit <id>                  open a work item in the browser",
        "  help, quit",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn status_text(view: &AppViewModel) -> String {
    let prefix = match view.status_line.tone {
        Tone::Neutral => "",
        Tone::Ok => "[ok] ",
        Tone::Error => "[error] ",
    };
    format!("{prefix}{}", view.status_line.text)
}

fn summary_text(view: &AppViewModel) -> String {
    format!(
        "Jobs: {} shown / {} loaded | sort: {} | status: {} | project: {} | from: {} | to: {}",
        view.cards.len(),
        view.total_jobs,
        sort_label(view.sort),
        view.filters.status.label(),
        project_label(&view.filters.project),
        bound_label(view.filters.date_from),
        bound_label(view.filters.date_to),
    )
}

fn render_card(lines: &mut Vec<String>, card: &JobCardView) {
    let marker = if card.accepted { "✓ " } else { "" };
    lines.push(format!("{marker}{}", card.title));
    lines.push(format!(
        "    Project: {} | Words: {} | Due: {} | Status: {}",
        card.project,
        format_grouped(card.word_count),
        card.due_date,
        card.status_raw,
    ));
    // The action area is omitted entirely when the status offers none.
    if let Some(action) = card.action {
        lines.push(format!("    {}", action_label(action, card.job_id)));
    }
}

fn action_label(action: JobAction, job_id: Option<JobId>) -> String {
    let id = job_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
    match action {
        JobAction::Accept(AcceptControl::Ready) => format!("[accept {id}]"),
        JobAction::Accept(AcceptControl::InFlight) => "[accepting...]".to_string(),
        JobAction::Accept(AcceptControl::Accepted) => "[accepted]".to_string(),
        JobAction::Edit => format!("[edit {id}]"),
    }
}

fn sort_label(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::None => "none",
        SortOrder::DateAsc => "date-asc",
        SortOrder::DateDesc => "date-desc",
        SortOrder::WcAsc => "wc-asc",
        SortOrder::WcDesc => "wc-desc",
    }
}

fn project_label(filter: &ProjectFilter) -> String {
    match filter {
        ProjectFilter::All => "ALL".to_string(),
        ProjectFilter::Named(name) => name.clone(),
    }
}

fn bound_label(bound: Option<DateTime<Utc>>) -> String {
    bound
        .map(|b| b.date_naive().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// it-IT digit grouping for word counts.
fn format_grouped(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
