use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::{AppState, Effect, Msg, StatusKind, Tone};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ReloadRequested => {
            // A reload already in flight is not cancelled or guarded; when
            // two overlap, the last completing JobsLoaded wins wholesale.
            state.begin_reload();
            state.set_status("Loading jobs...", Tone::Neutral);
            vec![Effect::FetchJobs]
        }
        Msg::PageLoading { page } => {
            state.set_status(format!("Loading page {page}..."), Tone::Neutral);
            Vec::new()
        }
        Msg::JobsLoaded(jobs) => {
            let count = jobs.len();
            state.replace_jobs(jobs);
            state.set_status(format!("Jobs loaded: {count}"), Tone::Ok);
            Vec::new()
        }
        Msg::ReloadFailed(message) => {
            state.reload_failed();
            state.set_status(message, Tone::Error);
            Vec::new()
        }
        Msg::SortChanged(sort) => {
            state.set_sort(sort);
            Vec::new()
        }
        Msg::StatusFilterChanged(filter) => {
            state.set_status_filter(filter);
            Vec::new()
        }
        Msg::ProjectFilterChanged(filter) => {
            if !state.set_project_filter(filter) {
                state.set_status("Unknown project name", Tone::Error);
            }
            Vec::new()
        }
        Msg::DateFromChanged(day) => {
            state.set_date_from(day.map(day_start));
            Vec::new()
        }
        Msg::DateToChanged(day) => {
            state.set_date_to(day.map(day_end));
            Vec::new()
        }
        Msg::AcceptClicked { job_id } => match state.job_by_id(job_id).cloned() {
            Some(job) => {
                if state.begin_accept(job_id) {
                    state.set_status(format!("Accepting job {job_id}..."), Tone::Neutral);
                    vec![Effect::AcceptJob { job }]
                } else {
                    // Already pending or done; the click is inert.
                    Vec::new()
                }
            }
            None => {
                state.set_status(format!("No job {job_id} in the current list"), Tone::Error);
                Vec::new()
            }
        },
        Msg::AcceptFinished { job_id, outcome } => {
            match outcome {
                Ok(()) => {
                    state.finish_accept_ok(job_id);
                    state.set_status(format!("Job {job_id} accepted"), Tone::Ok);
                }
                Err(message) => {
                    state.finish_accept_err(job_id);
                    state.set_status(
                        format!("Accept failed for job {job_id}: {message}"),
                        Tone::Error,
                    );
                }
            }
            Vec::new()
        }
        Msg::EditClicked { job_id } => match state.job_by_id(job_id) {
            // Edit is only offered for in-progress jobs; stray requests are
            // ignored.
            Some(job) if job.status_kind() == StatusKind::InProgress => {
                vec![Effect::OpenWorkItem { job_id }]
            }
            _ => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(day: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    day.and_time(end).and_utc()
}
