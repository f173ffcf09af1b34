use crate::{ImportSource, JobId, SubmitError, ValidationError};

/// Trims a folder URL and rejects empty input.
pub fn validate_folder_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    Ok(trimmed.to_string())
}

/// Input state of the import form for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportForm {
    source: ImportSource,
    input: String,
    pending: bool,
    error: Option<SubmitError>,
    last_started: Option<JobId>,
}

impl ImportForm {
    pub fn new(source: ImportSource) -> Self {
        Self {
            source,
            input: String::new(),
            pending: false,
            error: None,
            last_started: None,
        }
    }

    pub fn source(&self) -> ImportSource {
        self.source
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&SubmitError> {
        self.error.as_ref()
    }

    pub fn last_started(&self) -> Option<&str> {
        self.last_started.as_deref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Starts a submission and returns the URL to send.
    ///
    /// Returns `None` while a submission is already in flight, and also when
    /// validation fails (the error is kept on the form).
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.pending {
            return None;
        }
        match validate_folder_url(&self.input) {
            Ok(url) => {
                self.pending = true;
                self.error = None;
                self.last_started = None;
                Some(url)
            }
            Err(err) => {
                self.error = Some(err.into());
                self.last_started = None;
                None
            }
        }
    }

    pub fn accept(&mut self, job_id: JobId) {
        self.pending = false;
        self.input.clear();
        self.error = None;
        self.last_started = Some(job_id);
    }

    /// Input is kept so the user can fix it and resubmit.
    pub fn reject(&mut self, error: SubmitError) {
        self.pending = false;
        self.error = Some(error);
        self.last_started = None;
    }
}
