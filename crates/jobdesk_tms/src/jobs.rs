use desk_logging::desk_warn;
use jobdesk_core::{Job, JobId};
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{describe_envelope, extract_items, parse_jobs};
use crate::types::{ClientSettings, TmsError};

/// Events the client reports while it works.
#[derive(Debug)]
pub enum ClientEvent {
    /// A list page request is being issued.
    PageLoading { page: u32 },
    /// The full paginated fetch finished.
    ReloadFinished { result: Result<Vec<Job>, TmsError> },
    /// An accept call finished. `job_id` is `None` only when the record
    /// itself had no id.
    AcceptFinished {
        job_id: Option<JobId>,
        result: Result<(), TmsError>,
    },
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<ClientEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Request body for the list API. Search and server-side filters stay at
/// their neutral values; all filtering happens client-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRequest {
    page: u32,
    page_size: usize,
    job_name: String,
    statuses: Vec<String>,
    project_ids: Vec<u64>,
    tab: String,
}

impl PageRequest {
    fn new(page: u32, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            job_name: String::new(),
            statuses: Vec::new(),
            project_ids: Vec::new(),
            tab: "job".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) settings: ClientSettings,
}

impl JobsClient {
    pub fn new(settings: ClientSettings) -> Result<Self, TmsError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TmsError::Network(err.to_string()))?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn fetch_page(&self, token: &str, page: u32) -> Result<Value, TmsError> {
        let body = PageRequest::new(page, self.settings.page_size);
        let response = self
            .http
            .post(self.settings.list_url())
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmsError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response.json::<Value>().await.map_err(map_transport_error)
    }

    /// Fetches the full job list across all server pages, strictly one page
    /// at a time.
    ///
    /// Stops on an empty page or on a page shorter than the page size.
    /// The short-page rule is a heuristic: a server returning a short page
    /// that is not actually last truncates the result silently. A page
    /// ceiling bounds the loop on a misbehaving server. Any transport or
    /// HTTP error aborts the whole fetch.
    pub async fn fetch_all(
        &self,
        token: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<Job>, TmsError> {
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            sink.emit(ClientEvent::PageLoading { page });
            let data = self.fetch_page(token, page).await?;

            // Termination is decided on the raw item count, so that a
            // malformed record inside a full page cannot end the fetch
            // early.
            let (jobs, raw_len) = match extract_items(&data) {
                Some(items) => (parse_jobs(items), items.len()),
                None => {
                    desk_warn!(
                        "Unrecognized list response envelope: {}",
                        describe_envelope(&data)
                    );
                    (Vec::new(), 0)
                }
            };

            if raw_len == 0 {
                break;
            }
            all.extend(jobs);
            if raw_len < self.settings.page_size {
                // Short page means last page.
                break;
            }

            page += 1;
            if page > self.settings.max_pages {
                desk_warn!(
                    "Stopping at the page safety ceiling ({} pages)",
                    self.settings.max_pages
                );
                break;
            }
        }

        Ok(all)
    }
}

pub(crate) fn map_transport_error(err: reqwest::Error) -> TmsError {
    if err.is_timeout() {
        return TmsError::Timeout;
    }
    TmsError::Network(err.to_string())
}
