//! JSON bodies exchanged with the import gateway.

use chrono::{DateTime, NaiveDateTime, Utc};
use importer_core::{
    CatalogPage, CatalogRecord, CatalogSource, JobSnapshot, JobStatus, Pagination,
};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ImportRequestBody<'a> {
    pub folder_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportResponseBody {
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Only a plain string `detail` is meant for people; validation errors
    /// arrive as structured lists and are skipped.
    pub fn detail_text(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WireJobStatus {
    Pending,
    Processing,
    Completed,
    CompletedWithErrors,
    Failed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobStatusBody {
    pub status: WireJobStatus,
    pub total_files: u32,
    pub processed_files: u32,
    pub failed_files: u32,
    pub progress_percent: f64,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum WireCatalogSource {
    GoogleDrive,
    Dropbox,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageBody {
    pub id: i64,
    pub name: String,
    pub source: WireCatalogSource,
    pub size: u64,
    pub mime_type: String,
    pub storage_url: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub google_drive_id: Option<String>,
    #[serde(default)]
    pub dropbox_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageListBody {
    pub images: Vec<ImageBody>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub page_size: u32,
}

fn map_status(status: WireJobStatus) -> JobStatus {
    match status {
        WireJobStatus::Pending => JobStatus::Pending,
        WireJobStatus::Processing => JobStatus::Processing,
        WireJobStatus::Completed => JobStatus::Completed,
        WireJobStatus::CompletedWithErrors => JobStatus::CompletedWithErrors,
        WireJobStatus::Failed => JobStatus::Failed,
    }
}

fn map_source(source: WireCatalogSource) -> CatalogSource {
    match source {
        WireCatalogSource::GoogleDrive => CatalogSource::GoogleDrive,
        WireCatalogSource::Dropbox => CatalogSource::Dropbox,
    }
}

/// The backend reports a float such as `33.33`.
pub(crate) fn clamp_percent(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

impl From<JobStatusBody> for JobSnapshot {
    fn from(body: JobStatusBody) -> Self {
        JobSnapshot {
            status: map_status(body.status),
            total_files: body.total_files,
            processed_files: body.processed_files,
            failed_files: body.failed_files,
            progress_percent: clamp_percent(body.progress_percent),
            error_message: body.error_message,
        }
    }
}

impl From<ImageBody> for CatalogRecord {
    fn from(body: ImageBody) -> Self {
        CatalogRecord {
            id: body.id,
            name: body.name,
            source: map_source(body.source),
            size_bytes: body.size,
            mime_type: body.mime_type,
            storage_url: body.storage_url,
            created_at: body.created_at,
            google_drive_id: body.google_drive_id,
            dropbox_id: body.dropbox_id,
        }
    }
}

impl From<ImageListBody> for CatalogPage {
    fn from(body: ImageListBody) -> Self {
        CatalogPage {
            records: body.images.into_iter().map(CatalogRecord::from).collect(),
            pagination: Pagination {
                page: body.page,
                pages: body.pages,
                total: body.total,
                page_size: body.page_size,
            },
        }
    }
}

/// Accepts RFC 3339 and naive ISO timestamps; naive ones are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("unrecognised timestamp {raw:?}"))
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}
