use std::fmt;

use importer_core::{
    ImportSource, JobId, JobSnapshot, ListingError, PollTransientError, SubmissionError,
    SubmitError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ImportStarted {
        source: ImportSource,
        job_id: JobId,
    },
    ImportFailed {
        source: ImportSource,
        error: SubmitError,
    },
    JobStatus {
        job_id: JobId,
        snapshot: JobSnapshot,
    },
    JobPollFailed {
        job_id: JobId,
        error: PollTransientError,
    },
    JobComplete {
        job_id: JobId,
    },
}

/// Transport-level failure talking to the import gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: GatewayFailure,
    pub message: String,
    /// `detail` field of an error response body, when the server sent one.
    pub detail: Option<String>,
}

impl GatewayError {
    pub fn new(kind: GatewayFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayFailure {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for GatewayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayFailure::InvalidUrl => write!(f, "invalid url"),
            GatewayFailure::HttpStatus(code) => write!(f, "http status {code}"),
            GatewayFailure::Timeout => write!(f, "timeout"),
            GatewayFailure::Network => write!(f, "network error"),
            GatewayFailure::Decode => write!(f, "malformed response"),
        }
    }
}

impl From<GatewayError> for SubmissionError {
    fn from(err: GatewayError) -> Self {
        SubmissionError::from_detail(err.detail)
    }
}

impl From<GatewayError> for PollTransientError {
    fn from(err: GatewayError) -> Self {
        PollTransientError::new(err.to_string())
    }
}

impl From<GatewayError> for ListingError {
    fn from(err: GatewayError) -> Self {
        ListingError::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
