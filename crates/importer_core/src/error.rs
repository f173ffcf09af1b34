use thiserror::Error;

/// Folder URL rejected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty url")]
    EmptyUrl,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyUrl => "Please enter a folder URL",
        }
    }
}

pub const GENERIC_SUBMISSION_FAILURE: &str = "Failed to start import";
pub const POLL_FAILURE: &str = "Failed to fetch job status";
pub const LISTING_FAILURE: &str = "Failed to load images. Please try again.";

/// The gateway rejected an import or could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmissionError {
    pub message: String,
}

impl SubmissionError {
    /// Prefers the server's `detail` text over the generic message.
    pub fn from_detail(detail: Option<String>) -> Self {
        let message = detail
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| GENERIC_SUBMISSION_FAILURE.to_string());
        Self { message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl SubmitError {
    pub fn user_message(&self) -> &str {
        match self {
            SubmitError::Validation(err) => err.user_message(),
            SubmitError::Submission(err) => &err.message,
        }
    }
}

/// One polling tick failed; the next tick is the retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PollTransientError {
    pub message: String,
    pub cause: String,
}

impl PollTransientError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            message: POLL_FAILURE.to_string(),
            cause: cause.into(),
        }
    }
}

/// A catalog fetch failed; previously loaded records stay visible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ListingError {
    pub message: String,
    pub cause: String,
}

impl ListingError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            message: LISTING_FAILURE.to_string(),
            cause: cause.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page {requested} is outside 1..={pages}")]
pub struct PageOutOfRange {
    pub requested: u32,
    pub pages: u32,
}
