use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use importer_core::{ImportSource, JobId, PollTiming};
use importer_logging::{importer_debug, importer_info};
use tokio::runtime::Runtime;

use crate::poller::{spawn_poller, ChannelEventSink, EventSink, PollerHandle};
use crate::{
    EngineError, EngineEvent, Gateway, GatewaySettings, ImportSubmitter, ReqwestGateway,
};

enum EngineCommand {
    SubmitImport {
        source: ImportSource,
        folder_url: String,
    },
    StartPolling {
        job_id: JobId,
    },
    StopPolling {
        job_id: JobId,
    },
    StopAll,
}

/// Runs submissions and pollers on a background tokio runtime.
///
/// Dropping the handle disposes every poller and stops the runtime.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: GatewaySettings, timing: PollTiming) -> Result<Self, EngineError> {
        let gateway = ReqwestGateway::new(settings)?;
        Self::with_gateway(Arc::new(gateway), timing)
    }

    pub fn with_gateway(
        gateway: Arc<dyn Gateway>,
        timing: PollTiming,
    ) -> Result<Self, EngineError> {
        let runtime = Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            run_commands(&runtime, gateway, timing, cmd_rx, event_tx);
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit_import(&self, source: ImportSource, folder_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitImport {
            source,
            folder_url: folder_url.into(),
        });
    }

    pub fn start_polling(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            job_id: job_id.into(),
        });
    }

    pub fn stop_polling(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling {
            job_id: job_id.into(),
        });
    }

    pub fn stop_all(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_commands(
    runtime: &Runtime,
    gateway: Arc<dyn Gateway>,
    timing: PollTiming,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let _guard = runtime.enter();
    let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx.clone()));
    let submitter = ImportSubmitter::new(gateway.clone());
    let mut pollers: HashMap<JobId, PollerHandle> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        pollers.retain(|_, handle| !handle.is_finished());
        match command {
            EngineCommand::SubmitImport { source, folder_url } => {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = match submitter.submit(source, &folder_url).await {
                        Ok(job_id) => EngineEvent::ImportStarted { source, job_id },
                        Err(error) => EngineEvent::ImportFailed { source, error },
                    };
                    let _ = event_tx.send(event);
                });
            }
            EngineCommand::StartPolling { job_id } => {
                if pollers.contains_key(&job_id) {
                    importer_debug!("Job {} is already being polled", job_id);
                    continue;
                }
                let handle = spawn_poller(gateway.clone(), job_id.clone(), timing, sink.clone());
                pollers.insert(job_id, handle);
            }
            EngineCommand::StopPolling { job_id } => {
                if let Some(handle) = pollers.remove(&job_id) {
                    handle.dispose();
                }
            }
            EngineCommand::StopAll => {
                for (_, handle) in pollers.drain() {
                    handle.dispose();
                }
            }
        }
    }

    importer_info!("Engine shutting down with {} live pollers", pollers.len());
}
