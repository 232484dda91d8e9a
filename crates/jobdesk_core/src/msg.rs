use chrono::NaiveDate;

use crate::{Job, JobId, ProjectFilter, SortOrder, StatusFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked for a fresh load of the job list.
    ReloadRequested,
    /// Client progress: a list page is being requested.
    PageLoading { page: u32 },
    /// Client finished the full paginated fetch; replaces the collection.
    JobsLoaded(Vec<Job>),
    /// The reload failed; the previous collection stays untouched.
    ReloadFailed(String),
    /// User changed the sort selector.
    SortChanged(SortOrder),
    /// User changed the status selector.
    StatusFilterChanged(StatusFilter),
    /// User changed the project selector.
    ProjectFilterChanged(ProjectFilter),
    /// User set or cleared the inclusive lower date bound (day granularity).
    DateFromChanged(Option<NaiveDate>),
    /// User set or cleared the inclusive upper date bound (day granularity).
    DateToChanged(Option<NaiveDate>),
    /// User clicked Accept on a listed job.
    AcceptClicked { job_id: JobId },
    /// Client completion for an accept call.
    AcceptFinished {
        job_id: JobId,
        outcome: Result<(), String>,
    },
    /// User clicked Edit on a listed job.
    EditClicked { job_id: JobId },
    /// Fallback for placeholder wiring.
    NoOp,
}
