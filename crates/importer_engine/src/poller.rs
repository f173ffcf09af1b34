//! Runs a [`JobPoller`] on tokio timers.
//!
//! Each poller is a single task, so its fetches and timers are strictly
//! sequential. Disposal cancels the token the task races every await against
//! and clears the liveness flag. Emission holds the same lock as disposal, so
//! an event is either delivered before `dispose` returns or not at all.

use std::collections::VecDeque;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use importer_core::{JobId, JobPoller, PollEffect, PollTiming, PollTransientError};
use importer_logging::{importer_debug, importer_info, importer_warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, Gateway};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Owner's handle on a running poller. Dropping it disposes the poller.
pub struct PollerHandle {
    job_id: JobId,
    live: Arc<Mutex<bool>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

fn lock_live(live: &Mutex<bool>) -> MutexGuard<'_, bool> {
    live.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PollerHandle {
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Nothing is emitted after this returns, even for a fetch already in flight.
    ///
    /// Blocks while an event is being handed to the sink.
    pub fn dispose(&self) {
        let mut live = lock_live(&self.live);
        if std::mem::replace(&mut *live, false) {
            importer_debug!("Disposing poller for job {}", self.job_id);
        }
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Starts polling `job_id`. Must be called from within a tokio runtime.
pub fn spawn_poller(
    gateway: Arc<dyn Gateway>,
    job_id: JobId,
    timing: PollTiming,
    sink: Arc<dyn EventSink>,
) -> PollerHandle {
    let live = Arc::new(Mutex::new(true));
    let cancel = CancellationToken::new();
    let task = tokio::spawn(drive(PollerTask {
        gateway,
        job_id: job_id.clone(),
        timing,
        sink,
        live: live.clone(),
        cancel: cancel.clone(),
    }));
    PollerHandle {
        job_id,
        live,
        cancel,
        task,
    }
}

struct PollerTask {
    gateway: Arc<dyn Gateway>,
    job_id: JobId,
    timing: PollTiming,
    sink: Arc<dyn EventSink>,
    live: Arc<Mutex<bool>>,
    cancel: CancellationToken,
}

impl PollerTask {
    fn is_live(&self) -> bool {
        *lock_live(&self.live) && !self.cancel.is_cancelled()
    }

    fn emit(&self, event: EngineEvent) {
        let live = lock_live(&self.live);
        if *live && !self.cancel.is_cancelled() {
            self.sink.emit(event);
        }
    }

    /// Returns `false` when the poller was disposed while waiting.
    async fn wait(&self, after: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(after) => self.is_live(),
        }
    }
}

async fn drive(task: PollerTask) {
    let mut machine = JobPoller::new(task.job_id.clone(), task.timing);
    let mut queue: VecDeque<PollEffect> = machine.start().into();
    importer_info!("Polling job {}", task.job_id);

    while let Some(effect) = queue.pop_front() {
        if !task.is_live() {
            machine.dispose();
            break;
        }
        match effect {
            PollEffect::Fetch { ticket } => {
                let result = tokio::select! {
                    biased;
                    _ = task.cancel.cancelled() => None,
                    result = task.gateway.job_status(&task.job_id) => Some(result),
                };
                let Some(result) = result.filter(|_| task.is_live()) else {
                    importer_debug!("Discarding status of disposed job {}", task.job_id);
                    break;
                };
                let result = result.map_err(|err| {
                    importer_warn!("Status poll for job {} failed: {}", task.job_id, err);
                    PollTransientError::from(err)
                });
                queue.extend(machine.on_fetch_result(ticket, result));
            }
            PollEffect::ScheduleTick { after } => {
                if !task.wait(after).await {
                    break;
                }
                queue.extend(machine.on_tick());
            }
            PollEffect::ScheduleCompletion { after } => {
                if !task.wait(after).await {
                    break;
                }
                queue.extend(machine.on_completion_due());
            }
            // Timers only exist while the task awaits them; nothing is armed here.
            PollEffect::CancelTimers => {}
            PollEffect::Publish(snapshot) => {
                if snapshot.status.is_terminal() {
                    importer_info!("Job {} finished as {}", task.job_id, snapshot.status);
                }
                task.emit(EngineEvent::JobStatus {
                    job_id: task.job_id.clone(),
                    snapshot,
                });
            }
            PollEffect::ReportError(error) => task.emit(EngineEvent::JobPollFailed {
                job_id: task.job_id.clone(),
                error,
            }),
            PollEffect::Complete => task.emit(EngineEvent::JobComplete {
                job_id: task.job_id.clone(),
            }),
        }
    }
    importer_debug!("Poller for job {} stopped in {:?}", task.job_id, machine.state());
}
