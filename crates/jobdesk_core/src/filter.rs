use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::job::{Job, StatusKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Waiting,
    InProgress,
    Completed,
}

impl StatusFilter {
    fn matches(self, job: &Job) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Waiting => job.status_kind() == StatusKind::Waiting,
            StatusFilter::InProgress => job.status_kind() == StatusKind::InProgress,
            StatusFilter::Completed => job.status_kind() == StatusKind::Completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Waiting => "WAITING",
            StatusFilter::InProgress => "IN_PROGRESS",
            StatusFilter::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Named(String),
}

/// Current filter selections. Date bounds are day-granularity instants:
/// `date_from` is an inclusive day start, `date_to` an inclusive day end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub status: StatusFilter,
    pub project: ProjectFilter,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl FilterState {
    fn keeps(&self, job: &Job) -> bool {
        if !self.status.matches(job) {
            return false;
        }
        if let ProjectFilter::Named(name) = &self.project {
            // A job without a project name never matches a named filter.
            if job.project_name() != Some(name.as_str()) {
                return false;
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            // Dateless jobs are excluded whenever either bound is set.
            let Some(date) = job.date() else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    DateAsc,
    DateDesc,
    WcAsc,
    WcDesc,
}

/// Derives the display list: filters first, then an optional stable sort.
///
/// Jobs without a resolvable date sort to the end under both date
/// directions, and equal sort keys keep their original relative order.
pub fn derive_display_list(jobs: &[Job], filters: &FilterState, sort: SortOrder) -> Vec<Job> {
    let mut list: Vec<Job> = jobs.iter().filter(|job| filters.keeps(job)).cloned().collect();
    match sort {
        SortOrder::None => {}
        SortOrder::DateAsc => list.sort_by(|a, b| compare_dates(a.date(), b.date(), false)),
        SortOrder::DateDesc => list.sort_by(|a, b| compare_dates(a.date(), b.date(), true)),
        SortOrder::WcAsc => list.sort_by(|a, b| a.word_count().cmp(&b.word_count())),
        SortOrder::WcDesc => list.sort_by(|a, b| b.word_count().cmp(&a.word_count())),
    }
    list
}

fn compare_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    descending: bool,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if descending {
                b.cmp(&a)
            } else {
                a.cmp(&b)
            }
        }
    }
}
