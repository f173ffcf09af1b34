use std::sync::Arc;

use importer_core::{validate_folder_url, ImportSource, JobId, SubmissionError, SubmitError};
use importer_logging::{importer_info, importer_warn};

use crate::Gateway;

/// Sends folder-import requests.
///
/// Validation happens before any IO; a valid request makes exactly one
/// gateway call and is never retried.
#[derive(Clone)]
pub struct ImportSubmitter {
    gateway: Arc<dyn Gateway>,
}

impl ImportSubmitter {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn submit(
        &self,
        source: ImportSource,
        folder_url: &str,
    ) -> Result<JobId, SubmitError> {
        let folder_url = validate_folder_url(folder_url)?;
        match self.gateway.start_import(source, &folder_url).await {
            Ok(job_id) => {
                importer_info!("Import from {} started as job {}", source, job_id);
                Ok(job_id)
            }
            Err(err) => {
                importer_warn!("Import from {} rejected: {}", source, err);
                Err(SubmissionError::from(err).into())
            }
        }
    }
}
