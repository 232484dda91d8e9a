use futures_util::future;
use jobdesk_core::Job;
use reqwest::header;

use crate::jobs::{map_transport_error, JobsClient};
use crate::session::SessionSource;
use crate::types::TmsError;

impl JobsClient {
    /// Accepts one job: a single authenticated POST to the per-job,
    /// per-locale, per-assignee assign endpoint, with an empty JSON body.
    ///
    /// Token and user info are resolved concurrently and both must be
    /// available before anything is sent. Each violated precondition fails
    /// fast with its own error and makes no network call. The job
    /// collection is not touched on success; the caller owns any visible
    /// accepted marker.
    pub async fn accept_job(
        &self,
        session: &dyn SessionSource,
        job: &Job,
    ) -> Result<(), TmsError> {
        let (token, user) = future::try_join(session.auth_token(), session.user_info()).await?;

        let job_id = job.id.ok_or(TmsError::MissingJobId)?;
        let locale_id = match self.settings.locale_for(job) {
            0 => return Err(TmsError::MissingLocale),
            id => id,
        };
        let assignee_id = match user.id {
            Some(0) | None => return Err(TmsError::MissingAssignee),
            Some(id) => id,
        };

        let url = self.settings.assign_url(job_id, locale_id, assignee_id);
        let mut request = self
            .http
            .post(url)
            .bearer_auth(&token)
            .header(header::ACCEPT, "application/json, text/plain, */*")
            .header("x-okta-type", "okta")
            .json(&serde_json::json!({}));
        if let Some(email) = user.contact_email() {
            request = request.header("x-user-email", email);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmsError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
