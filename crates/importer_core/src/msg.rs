use crate::{ImportSource, JobId, JobSnapshot, PollTransientError, SubmitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the folder URL of one import form.
    InputChanged { source: ImportSource, text: String },
    /// User pressed Import on one form.
    ImportSubmitted { source: ImportSource },
    /// Gateway accepted the import and assigned a job id.
    ImportStarted { source: ImportSource, job_id: JobId },
    /// Submission failed; nothing is tracked.
    ImportFailed {
        source: ImportSource,
        error: SubmitError,
    },
    /// A poll returned a fresh status record.
    JobStatusFetched { job_id: JobId, snapshot: JobSnapshot },
    /// A single poll failed; polling continues.
    JobPollFailed {
        job_id: JobId,
        error: PollTransientError,
    },
    /// Grace delay after a terminal status elapsed.
    JobCompleted { job_id: JobId },
    /// User stopped watching a job before it finished.
    JobDismissed { job_id: JobId },
    /// The session is going away; every poller must stop.
    ShutdownRequested,
    /// Render tick.
    Tick,
    NoOp,
}
