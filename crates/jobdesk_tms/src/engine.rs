use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use jobdesk_core::Job;

use crate::jobs::{ChannelProgressSink, ClientEvent, JobsClient};
use crate::session::SessionSource;
use crate::types::{ClientSettings, TmsError};

enum ClientCommand {
    Reload,
    Accept { job: Job },
}

/// Handle to the client runtime: commands in, events out.
///
/// The async client runs on a dedicated thread owning its own tokio
/// runtime, so the UI thread never blocks on the network. Commands run
/// concurrently; nothing serializes two overlapping reloads, the last
/// completed one wins at the state layer.
#[derive(Clone)]
pub struct TmsHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
    settings: ClientSettings,
}

impl TmsHandle {
    pub fn new(
        settings: ClientSettings,
        session: Arc<dyn SessionSource>,
    ) -> Result<Self, TmsError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let client = JobsClient::new(settings.clone())?;

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let session = session.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&client, session.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            settings,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn request_reload(&self) {
        let _ = self.cmd_tx.send(ClientCommand::Reload);
    }

    pub fn request_accept(&self, job: Job) {
        let _ = self.cmd_tx.send(ClientCommand::Accept { job });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    client: &JobsClient,
    session: &dyn SessionSource,
    command: ClientCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        ClientCommand::Reload => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = match session.auth_token().await {
                Ok(token) => client.fetch_all(&token, &sink).await,
                Err(err) => Err(TmsError::from(err)),
            };
            let _ = event_tx.send(ClientEvent::ReloadFinished { result });
        }
        ClientCommand::Accept { job } => {
            let result = client.accept_job(session, &job).await;
            let _ = event_tx.send(ClientEvent::AcceptFinished {
                job_id: job.id,
                result,
            });
        }
    }
}
