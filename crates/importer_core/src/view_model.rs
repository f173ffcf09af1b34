use crate::{
    ActiveJob, CatalogRecord, CatalogSource, CatalogState, ImportForm, ImportSource, JobId,
    JobStatus, TrackedStatus,
};

/// Characters of the job id shown before the ellipsis.
pub const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub forms: Vec<ImportFormView>,
    pub job_count: usize,
    pub jobs: Vec<JobRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFormView {
    pub source: ImportSource,
    pub input: String,
    pub submit_enabled: bool,
    pub button_label: &'static str,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ImportFormView {
    pub fn from_form(form: &ImportForm) -> Self {
        let pending = form.is_pending();
        Self {
            source: form.source(),
            input: form.input().to_string(),
            submit_enabled: !pending,
            button_label: if pending { "Importing..." } else { "Import" },
            error: form.error().map(|err| err.user_message().to_string()),
            success: form
                .last_started()
                .map(|job_id| format!("Import started! Job ID: {job_id}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub processed_files: u32,
    pub total_files: u32,
    pub failed_files: u32,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub short_id: String,
    pub title: String,
    /// No status has arrived yet and no error either.
    pub loading: bool,
    pub status: Option<JobStatus>,
    /// Only present once the backend knows how many files there are.
    pub progress: Option<ProgressView>,
    pub error_message: Option<String>,
    pub transient_error: Option<String>,
}

impl JobRowView {
    pub fn new(entry: &ActiveJob, status: &TrackedStatus) -> Self {
        let snapshot = status.snapshot.as_ref();
        let progress = snapshot
            .filter(|s| s.total_files > 0)
            .map(|s| ProgressView {
                processed_files: s.processed_files,
                total_files: s.total_files,
                failed_files: s.failed_files,
                percent: s.progress_percent,
            });
        Self {
            job_id: entry.id.clone(),
            short_id: short_id(&entry.id),
            title: format!("{} Import", entry.source.label()),
            loading: snapshot.is_none() && status.transient_error.is_none(),
            status: snapshot.map(|s| s.status),
            progress,
            error_message: snapshot.and_then(|s| s.error_message.clone()),
            transient_error: status.transient_error.clone(),
        }
    }
}

pub fn short_id(job_id: &str) -> String {
    let prefix: String = job_id.chars().take(SHORT_ID_LEN).collect();
    format!("{prefix}...")
}

/// What the body of the catalog view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBody {
    Loading,
    /// Nothing has ever loaded and the last attempt failed.
    Unavailable,
    Empty,
    Records,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRowView {
    pub id: i64,
    pub name: String,
    pub badge: &'static str,
    pub size_label: String,
    pub kind_label: String,
    pub created_label: String,
    pub storage_url: String,
}

impl CatalogRowView {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            badge: record.source.badge(),
            size_label: format_file_size(record.size_bytes),
            kind_label: mime_kind(&record.mime_type),
            created_label: record.created_at.format("%b %-d, %Y, %I:%M %p").to_string(),
            storage_url: record.storage_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    pub body: CatalogBody,
    pub rows: Vec<CatalogRowView>,
    pub filter: Option<CatalogSource>,
    pub filter_label: Option<&'static str>,
    pub error_banner: Option<String>,
    pub showing_label: String,
    pub page_label: String,
    pub show_pagination: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl CatalogView {
    pub fn from_state(state: &CatalogState) -> Self {
        let pagination = state.pagination();
        let records = state.records();
        let body = if state.is_loading() && !state.has_loaded() {
            CatalogBody::Loading
        } else if !state.has_loaded() && state.error().is_some() {
            CatalogBody::Unavailable
        } else if records.is_empty() {
            CatalogBody::Empty
        } else {
            CatalogBody::Records
        };
        Self {
            body,
            rows: records.iter().map(CatalogRowView::from_record).collect(),
            filter: state.filter(),
            filter_label: state.filter().map(CatalogSource::label),
            error_banner: state.error().map(|err| err.message.clone()),
            showing_label: format!(
                "Showing {} of {} images",
                records.len(),
                pagination.total
            ),
            page_label: format!("Page {} of {}", pagination.page, pagination.pages),
            show_pagination: body == CatalogBody::Records && pagination.is_multi_page(),
            previous_enabled: pagination.has_previous(),
            next_enabled: pagination.has_next(),
        }
    }
}

/// Human readable size, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// `image/jpeg` becomes `JPEG`; a type without subtype is shown whole.
pub fn mime_kind(mime_type: &str) -> String {
    mime_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(mime_type)
        .to_uppercase()
}
