use importer_core::{
    CatalogPage, CatalogRecord, ImportSource, JobId, JobSnapshot, ListingRequest, RecordId,
};
use importer_logging::{importer_debug, importer_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{
    ErrorBody, ImageBody, ImageListBody, ImportRequestBody, ImportResponseBody, JobStatusBody,
};
use crate::{Gateway, GatewayError, GatewayFailure, GatewaySettings};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(GatewayFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GatewayError::new(GatewayFailure::InvalidUrl, "base url cannot take a path")
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        importer_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: Vec<u8>,
    ) -> Result<T, GatewayError> {
        importer_debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn start_import(
        &self,
        source: ImportSource,
        folder_url: &str,
    ) -> Result<JobId, GatewayError> {
        let url = self.endpoint(&["import", source.path_segment()])?;
        let body = serde_json::to_vec(&ImportRequestBody { folder_url })
            .map_err(|err| GatewayError::new(GatewayFailure::Decode, err.to_string()))?;
        let response: ImportResponseBody = self.post_json(url, body).await?;
        Ok(response.job_id)
    }

    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, GatewayError> {
        let url = self.endpoint(&["import", "jobs", job_id])?;
        let body: JobStatusBody = self.get_json(url).await?;
        Ok(body.into())
    }

    async fn list_images(&self, request: &ListingRequest) -> Result<CatalogPage, GatewayError> {
        let mut url = self.endpoint(&["images"])?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.page.to_string())
                .append_pair("limit", &request.limit.to_string());
            if let Some(source) = request.source {
                query.append_pair("source", source.as_query());
            }
        }
        let body: ImageListBody = self.get_json(url).await?;
        Ok(body.into())
    }

    async fn get_image(&self, id: RecordId) -> Result<CatalogRecord, GatewayError> {
        let url = self.endpoint(&["images", &id.to_string()])?;
        let body: ImageBody = self.get_json(url).await?;
        Ok(body.into())
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(ErrorBody::detail_text);
        importer_warn!("Gateway answered {} (detail: {:?})", status, detail);
        return Err(
            GatewayError::new(GatewayFailure::HttpStatus(status.as_u16()), status.to_string())
                .with_detail(detail),
        );
    }

    serde_json::from_slice(&bytes)
        .map_err(|err| GatewayError::new(GatewayFailure::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(GatewayFailure::Timeout, err.to_string());
    }
    GatewayError::new(GatewayFailure::Network, err.to_string())
}
