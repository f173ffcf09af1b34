use std::fmt;

use chrono::{DateTime, Utc};

pub type JobId = String;

/// Provider a folder import is submitted against.
///
/// Spelled with a hyphen on the wire (`google-drive`). Catalog records use
/// [`CatalogSource`], which the backend spells with an underscore; the two are
/// kept apart on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportSource {
    GoogleDrive,
    Dropbox,
}

impl ImportSource {
    pub const ALL: [ImportSource; 2] = [ImportSource::GoogleDrive, ImportSource::Dropbox];

    pub fn path_segment(self) -> &'static str {
        match self {
            ImportSource::GoogleDrive => "google-drive",
            ImportSource::Dropbox => "dropbox",
        }
    }

    pub fn from_path_segment(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.path_segment() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            ImportSource::GoogleDrive => "Google Drive",
            ImportSource::Dropbox => "Dropbox",
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Provider recorded on a catalog record, also used as the listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogSource {
    GoogleDrive,
    Dropbox,
}

impl CatalogSource {
    pub const ALL: [CatalogSource; 2] = [CatalogSource::GoogleDrive, CatalogSource::Dropbox];

    pub fn as_query(self) -> &'static str {
        match self {
            CatalogSource::GoogleDrive => "google_drive",
            CatalogSource::Dropbox => "dropbox",
        }
    }

    pub fn from_query(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_query() == raw)
    }

    pub fn label(self) -> &'static str {
        match self {
            CatalogSource::GoogleDrive => "Google Drive",
            CatalogSource::Dropbox => "Dropbox",
        }
    }

    /// Short label shown on a record row.
    pub fn badge(self) -> &'static str {
        match self {
            CatalogSource::GoogleDrive => "Drive",
            CatalogSource::Dropbox => "Dropbox",
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    CompletedWithErrors,
    Failed,
}

impl JobStatus {
    /// No further progress is expected once a job reports one of these.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::CompletedWithErrors | JobStatus::Failed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::CompletedWithErrors => "completed_with_errors",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one job as returned by a single fetch.
///
/// Always replaced as a whole; counters from different fetches never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub total_files: u32,
    pub processed_files: u32,
    pub failed_files: u32,
    pub progress_percent: u8,
    pub error_message: Option<String>,
}

/// Registry entry for a job being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveJob {
    pub id: JobId,
    pub source: ImportSource,
}

impl ActiveJob {
    pub fn new(id: impl Into<JobId>, source: ImportSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: RecordId,
    pub name: String,
    pub source: CatalogSource,
    pub size_bytes: u64,
    pub mime_type: String,
    pub storage_url: String,
    pub created_at: DateTime<Utc>,
    pub google_drive_id: Option<String>,
    pub dropbox_id: Option<String>,
}

/// Pagination metadata exactly as reported by the last successful listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    pub page_size: u32,
}

impl Pagination {
    /// Placeholder shown before the first listing succeeds.
    pub fn initial(page_size: u32) -> Self {
        Self {
            page: 1,
            pages: 1,
            total: 0,
            page_size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn is_multi_page(&self) -> bool {
        self.pages > 1
    }

    pub fn contains(&self, page: u32) -> bool {
        (1..=self.pages).contains(&page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub records: Vec<CatalogRecord>,
    pub pagination: Pagination,
}

/// Parameters of one `GET /images` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRequest {
    pub page: u32,
    pub limit: u32,
    pub source: Option<CatalogSource>,
}
