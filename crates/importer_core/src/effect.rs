use crate::{ImportSource, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitImport {
        source: ImportSource,
        folder_url: String,
    },
    StartPolling {
        job_id: JobId,
    },
    /// Dispose the poller for this job; its pending results are discarded.
    StopPolling {
        job_id: JobId,
    },
}
