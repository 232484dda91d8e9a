use std::time::Duration;

use jobdesk_core::{Job, JobId};
use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin of the TMS deployment, without a trailing slash.
    pub base_url: String,
    /// Fixed page size for the list API.
    pub page_size: usize,
    /// Locale id; single-locale deployment (Italian).
    pub locale_id: u64,
    /// Hard stop for the pagination loop on a misbehaving server.
    pub max_pages: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.translationtms.com".to_string(),
            page_size: 50,
            locale_id: 20,
            max_pages: 1000,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientSettings {
    pub fn list_url(&self) -> String {
        format!(
            "{}/cms/i18n/tsc/admin/be/translation-jobs/list",
            self.base_url
        )
    }

    pub fn assign_url(&self, job_id: JobId, locale_id: u64, assignee_id: u64) -> String {
        format!(
            "{}/cms/i18n/tsc/admin/be/translation-jobs/{job_id}/locale/{locale_id}/assign/{assignee_id}",
            self.base_url
        )
    }

    pub fn work_item_url(&self, job_id: JobId) -> String {
        format!(
            "{}/translation-work/{job_id}/{}",
            self.base_url, self.locale_id
        )
    }

    /// Locale resolution point. Fixed to the configured single locale for
    /// now; per-job locale resolution would land here.
    pub fn locale_for(&self, _job: &Job) -> u64 {
        self.locale_id
    }
}

#[derive(Debug, Error)]
pub enum TmsError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("job id missing from the job record")]
    MissingJobId,
    #[error("no locale id configured for this job")]
    MissingLocale,
    #[error("assignee id missing from session user info")]
    MissingAssignee,
    #[error(transparent)]
    Session(#[from] SessionError),
}
