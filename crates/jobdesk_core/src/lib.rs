//! Job desk core: pure state machine and view-model helpers.
mod effect;
mod filter;
mod job;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use filter::{derive_display_list, FilterState, ProjectFilter, SortOrder, StatusFilter};
pub use job::{Job, JobId, JobString, StatusKind, TmsProject};
pub use msg::Msg;
pub use state::{AppState, StatusLine, Tone};
pub use update::update;
pub use view_model::{AcceptControl, AppViewModel, JobAction, JobCardView};
