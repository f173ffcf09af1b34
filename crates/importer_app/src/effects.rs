use std::time::Duration;

use importer_core::{Effect, Msg, PollTiming};
use importer_engine::{EngineError, EngineEvent, EngineHandle, GatewaySettings};
use importer_logging::{importer_debug, importer_info, importer_warn};

/// Carries out effects on the engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: GatewaySettings, timing: PollTiming) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings, timing)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitImport { source, folder_url } => {
                    importer_info!("SubmitImport source={} url={}", source, folder_url);
                    self.engine.submit_import(source, folder_url);
                }
                Effect::StartPolling { job_id } => {
                    importer_debug!("StartPolling job_id={}", job_id);
                    self.engine.start_polling(job_id);
                }
                Effect::StopPolling { job_id } => {
                    importer_debug!("StopPolling job_id={}", job_id);
                    self.engine.stop_polling(job_id);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ImportStarted { source, job_id } => Msg::ImportStarted { source, job_id },
        EngineEvent::ImportFailed { source, error } => Msg::ImportFailed { source, error },
        EngineEvent::JobStatus { job_id, snapshot } => {
            Msg::JobStatusFetched { job_id, snapshot }
        }
        EngineEvent::JobPollFailed { job_id, error } => {
            importer_warn!("Job {} poll failed: {}", job_id, error.cause);
            Msg::JobPollFailed { job_id, error }
        }
        EngineEvent::JobComplete { job_id } => Msg::JobCompleted { job_id },
    }
}
