//! TMS API client: authenticated list pagination, the job accept call, and
//! the command/event engine that runs them off the UI thread.
mod accept;
mod engine;
mod envelope;
mod jobs;
mod session;
mod types;

pub use engine::TmsHandle;
pub use envelope::{extract_items, parse_jobs};
pub use jobs::{ChannelProgressSink, ClientEvent, JobsClient, ProgressSink};
pub use session::{SessionError, SessionSource, StoredSessionSource, UserInfo};
pub use types::{ClientSettings, TmsError};
