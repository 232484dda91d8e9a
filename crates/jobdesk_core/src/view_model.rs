use crate::filter::{FilterState, SortOrder};
use crate::job::{Job, JobId, StatusKind};
use crate::state::StatusLine;

/// Abstract view tree: everything the front end needs to rebuild the
/// visible list from scratch. Pure function of the state, never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub status_line: StatusLine,
    /// Options for the dynamic project selector (without the ALL entry).
    pub project_options: Vec<String>,
    pub filters: FilterState,
    pub sort: SortOrder,
    /// Size of the full collection, before filtering.
    pub total_jobs: usize,
    pub loading: bool,
    pub cards: Vec<JobCardView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCardView {
    pub job_id: Option<JobId>,
    pub title: String,
    pub project: String,
    pub word_count: u64,
    pub due_date: String,
    /// Raw status text as the TMS sent it.
    pub status_raw: String,
    /// Normalized status, for styling.
    pub status_kind: StatusKind,
    /// Status-dependent action control; `None` omits the action area.
    pub action: Option<JobAction>,
    pub accepted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Accept(AcceptControl),
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptControl {
    Ready,
    InFlight,
    Accepted,
}

impl JobCardView {
    pub(crate) fn for_job(job: &Job, accepted: bool, in_flight: bool) -> Self {
        let id_text = job
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "?".to_string());
        let name = job.job_name.as_deref().unwrap_or("(unnamed)");
        let status_kind = job.status_kind();
        let action = match status_kind {
            StatusKind::Waiting => Some(JobAction::Accept(if accepted {
                AcceptControl::Accepted
            } else if in_flight {
                AcceptControl::InFlight
            } else {
                AcceptControl::Ready
            })),
            StatusKind::InProgress => Some(JobAction::Edit),
            StatusKind::Completed | StatusKind::Other => None,
        };
        Self {
            job_id: job.id,
            title: format!("{id_text} — {name}"),
            project: job.project_name().unwrap_or("N/A").to_string(),
            word_count: job.word_count(),
            due_date: job.display_due_date(),
            status_raw: job.status.clone().unwrap_or_else(|| "N/A".to_string()),
            status_kind,
            action,
            accepted,
        }
    }
}
