use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_info, desk_warn};
use jobdesk_core::{Effect, Msg};
use jobdesk_tms::{ClientEvent, ClientSettings, SessionSource, TmsError, TmsHandle};

pub struct EffectRunner {
    engine: TmsHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        session: Arc<dyn SessionSource>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, TmsError> {
        let engine = TmsHandle::new(settings, session)?;
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchJobs => {
                    desk_info!("FetchJobs requested");
                    self.engine.request_reload();
                }
                Effect::AcceptJob { job } => {
                    desk_info!("AcceptJob requested for {:?}", job.id);
                    self.engine.request_accept(job);
                }
                Effect::OpenWorkItem { job_id } => {
                    let url = self.engine.settings().work_item_url(job_id);
                    open_in_browser(&url);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    ClientEvent::PageLoading { page } => Msg::PageLoading { page },
                    ClientEvent::ReloadFinished { result } => match result {
                        Ok(jobs) => Msg::JobsLoaded(jobs),
                        Err(err) => {
                            desk_warn!("Reload failed: {err}");
                            Msg::ReloadFailed(err.to_string())
                        }
                    },
                    ClientEvent::AcceptFinished { job_id, result } => {
                        let Some(job_id) = job_id else {
                            desk_warn!("Accept finished for a job without an id");
                            continue;
                        };
                        if let Err(err) = &result {
                            desk_warn!("Accept for job {} failed: {}", job_id, err);
                        }
                        Msg::AcceptFinished {
                            job_id,
                            outcome: result.map_err(|err| err.to_string()),
                        }
                    }
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Opens a work-item URL with the platform opener, without taking focus
/// away from the terminal where that is supported.
fn open_in_browser(url: &str) {
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", url])
        .spawn();
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").args(["-g", url]).spawn();
    #[cfg(all(unix, not(target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    match result {
        Ok(_) => desk_info!("Opened work item {url}"),
        Err(err) => desk_warn!("Could not open {url}: {err}"),
    }
}
