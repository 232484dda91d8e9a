use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::filter::{derive_display_list, FilterState, ProjectFilter, SortOrder, StatusFilter};
use crate::job::{Job, JobId};
use crate::view_model::{AppViewModel, JobCardView};

/// Visual mode of the single status-line sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Neutral,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

/// All mutable session state. Lives for the lifetime of the process and is
/// only ever mutated through `update`, one message at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Full job collection, append order = page-fetch order. Replaced
    /// wholesale on reload, never merged.
    jobs: Vec<Job>,
    filters: FilterState,
    sort: SortOrder,
    /// Sorted unique project names observed in the current collection.
    project_names: Vec<String>,
    /// Cosmetic markers for jobs accepted during this session. The job
    /// records themselves are immutable snapshots.
    accepted: BTreeSet<JobId>,
    /// Accepts whose remote call has not come back yet; their controls are
    /// disabled so a double click cannot submit twice.
    accepts_in_flight: BTreeSet<JobId>,
    loading: bool,
    status_line: StatusLine,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let cards = derive_display_list(&self.jobs, &self.filters, self.sort)
            .iter()
            .map(|job| {
                let accepted = job.id.is_some_and(|id| self.accepted.contains(&id));
                let in_flight = job.id.is_some_and(|id| self.accepts_in_flight.contains(&id));
                JobCardView::for_job(job, accepted, in_flight)
            })
            .collect();
        AppViewModel {
            status_line: self.status_line.clone(),
            project_options: self.project_names.clone(),
            filters: self.filters.clone(),
            sort: self.sort,
            total_jobs: self.jobs.len(),
            loading: self.loading,
            cards,
        }
    }

    /// Returns whether a re-render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn project_names(&self) -> &[String] {
        &self.project_names
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_accepted(&self, job_id: JobId) -> bool {
        self.accepted.contains(&job_id)
    }

    pub fn job_by_id(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == Some(job_id))
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: Tone) {
        self.status_line = StatusLine {
            text: text.into(),
            tone,
        };
        self.dirty = true;
    }

    pub(crate) fn begin_reload(&mut self) {
        self.loading = true;
        self.dirty = true;
    }

    /// Replaces the collection wholesale and re-derives everything that
    /// depends on it. A project filter naming a project that is no longer
    /// present resets to ALL.
    pub(crate) fn replace_jobs(&mut self, jobs: Vec<Job>) {
        let mut names: Vec<String> = jobs
            .iter()
            .filter_map(|job| job.project_name())
            .map(str::to_owned)
            .collect();
        names.sort();
        names.dedup();

        if let ProjectFilter::Named(current) = &self.filters.project {
            if !names.contains(current) {
                self.filters.project = ProjectFilter::All;
            }
        }

        self.jobs = jobs;
        self.project_names = names;
        self.accepted.clear();
        self.accepts_in_flight.clear();
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn reload_failed(&mut self) {
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.dirty = true;
    }

    pub(crate) fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filters.status = filter;
        self.dirty = true;
    }

    /// Applies a project filter; a named filter must match an observed
    /// project name. Returns false (and leaves the filter untouched) when it
    /// does not.
    pub(crate) fn set_project_filter(&mut self, filter: ProjectFilter) -> bool {
        if let ProjectFilter::Named(name) = &filter {
            if !self.project_names.iter().any(|n| n == name) {
                return false;
            }
        }
        self.filters.project = filter;
        self.dirty = true;
        true
    }

    pub(crate) fn set_date_from(&mut self, bound: Option<DateTime<Utc>>) {
        self.filters.date_from = bound;
        self.dirty = true;
    }

    pub(crate) fn set_date_to(&mut self, bound: Option<DateTime<Utc>>) {
        self.filters.date_to = bound;
        self.dirty = true;
    }

    /// Marks an accept as in flight. Returns false when one is already
    /// pending or done for this job, so the caller emits no second call.
    pub(crate) fn begin_accept(&mut self, job_id: JobId) -> bool {
        if self.accepted.contains(&job_id) || !self.accepts_in_flight.insert(job_id) {
            return false;
        }
        self.dirty = true;
        true
    }

    pub(crate) fn finish_accept_ok(&mut self, job_id: JobId) {
        self.accepts_in_flight.remove(&job_id);
        self.accepted.insert(job_id);
        self.dirty = true;
    }

    pub(crate) fn finish_accept_err(&mut self, job_id: JobId) {
        self.accepts_in_flight.remove(&job_id);
        self.dirty = true;
    }
}
