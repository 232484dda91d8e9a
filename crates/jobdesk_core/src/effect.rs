use crate::{Job, JobId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch every page of the job list; reports back with
    /// `Msg::JobsLoaded` or `Msg::ReloadFailed`.
    FetchJobs,
    /// Issue the accept call for one job; reports back with
    /// `Msg::AcceptFinished`.
    AcceptJob { job: Job },
    /// Open the translation work item for one job in the browser.
    OpenWorkItem { job_id: JobId },
}
