use std::time::Duration;

use importer_core::{
    CatalogPage, CatalogRecord, ImportSource, JobId, JobSnapshot, ListingRequest, RecordId,
};
use url::Url;

use crate::{GatewayError, GatewayFailure};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl GatewaySettings {
    pub fn with_base_url(raw: &str) -> Result<Self, GatewayError> {
        let base_url = Url::parse(raw.trim())
            .map_err(|err| GatewayError::new(GatewayFailure::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::new(
                GatewayFailure::InvalidUrl,
                format!("{raw} cannot be used as a base url"),
            ));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend endpoints the importer relies on.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /import/{source}`.
    async fn start_import(
        &self,
        source: ImportSource,
        folder_url: &str,
    ) -> Result<JobId, GatewayError>;

    /// `GET /import/jobs/{job_id}`.
    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, GatewayError>;

    /// `GET /images?page=&limit=&source=`.
    async fn list_images(&self, request: &ListingRequest) -> Result<CatalogPage, GatewayError>;

    /// `GET /images/{id}`.
    async fn get_image(&self, id: RecordId) -> Result<CatalogRecord, GatewayError>;
}
