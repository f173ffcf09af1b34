//! Plain-text rendering of the view models.

use importer_core::{
    format_file_size, AppViewModel, CatalogBody, CatalogRecord, CatalogView, ImportFormView,
    JobRowView,
};

pub fn render_app(view: &AppViewModel) -> Vec<String> {
    let mut lines: Vec<String> = view.forms.iter().filter_map(render_form).collect();
    if view.job_count > 0 {
        lines.push(format!("Active Import Jobs ({})", view.job_count));
        for job in &view.jobs {
            lines.extend(render_job(job));
        }
    }
    lines
}

fn render_form(form: &ImportFormView) -> Option<String> {
    let label = form.source.label();
    if !form.submit_enabled {
        return Some(format!("{label}: {}", form.button_label));
    }
    if let Some(error) = &form.error {
        return Some(format!("{label}: {error}"));
    }
    form.success
        .as_ref()
        .map(|success| format!("{label}: {success}"))
}

fn render_job(job: &JobRowView) -> Vec<String> {
    let status = match (job.loading, job.status) {
        (true, _) => "loading...".to_string(),
        (false, Some(status)) => status.to_string(),
        (false, None) => "unknown".to_string(),
    };
    let mut line = format!("  {} [{}] {}", job.title, job.short_id, status);
    if let Some(progress) = &job.progress {
        line.push_str(&format!(
            "  {} / {} files  {}%",
            progress.processed_files, progress.total_files, progress.percent
        ));
        if progress.failed_files > 0 {
            line.push_str(&format!("  ({} failed)", progress.failed_files));
        }
    }

    let mut lines = vec![line];
    if let Some(message) = &job.error_message {
        lines.push(format!("    {message}"));
    }
    if let Some(error) = &job.transient_error {
        lines.push(format!("    ! {error}"));
    }
    lines
}

pub fn render_catalog(view: &CatalogView) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(label) = view.filter_label {
        lines.push(format!("Source: {label}"));
    }
    if let Some(banner) = &view.error_banner {
        lines.push(format!("! {banner}"));
    }
    match view.body {
        CatalogBody::Loading => lines.push("Loading images...".to_string()),
        CatalogBody::Unavailable => {}
        CatalogBody::Empty => {
            lines.push("No images".to_string());
            lines.push("Import images from Google Drive or Dropbox to get started.".to_string());
        }
        CatalogBody::Records => {
            lines.push(view.showing_label.clone());
            for row in &view.rows {
                lines.push(format!(
                    "{:>6}  {:<7}  {:<32}  {:>9}  {:<5}  {}",
                    row.id, row.badge, row.name, row.size_label, row.kind_label, row.created_label
                ));
            }
            if view.show_pagination {
                let previous = if view.previous_enabled { "[p]rev" } else { "" };
                let next = if view.next_enabled { "[n]ext" } else { "" };
                lines.push(format!("{previous:<6}  {}  {next}", view.page_label));
            }
        }
    }
    lines
}

pub fn render_record(record: &CatalogRecord) -> Vec<String> {
    let mut lines = vec![
        format!("Id:       {}", record.id),
        format!("Name:     {}", record.name),
        format!("Source:   {}", record.source.label()),
        format!("Size:     {}", format_file_size(record.size_bytes)),
        format!("Type:     {}", record.mime_type),
        format!("Created:  {}", record.created_at.to_rfc3339()),
        format!("Storage:  {}", record.storage_url),
    ];
    if let Some(id) = &record.google_drive_id {
        lines.push(format!("Drive id: {id}"));
    }
    if let Some(id) = &record.dropbox_id {
        lines.push(format!("Dropbox:  {id}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use importer_core::{
        update, ActiveJob, AppState, CatalogPage, CatalogSource, CatalogState, ImportSource,
        JobSnapshot, JobStatus, Msg, Pagination, TrackedStatus,
    };
    use pretty_assertions::assert_eq;

    fn tracked(snapshot: Option<JobSnapshot>) -> TrackedStatus {
        TrackedStatus {
            snapshot,
            transient_error: None,
        }
    }

    #[test]
    fn job_line_shows_progress_and_failures() {
        let entry = ActiveJob::new("0123456789abcdef", ImportSource::GoogleDrive);
        let status = tracked(Some(JobSnapshot {
            status: JobStatus::Processing,
            total_files: 10,
            processed_files: 4,
            failed_files: 1,
            progress_percent: 40,
            error_message: None,
        }));
        let lines = render_job(&JobRowView::new(&entry, &status));
        assert_eq!(
            lines,
            vec![format!(
                "  Google Drive Import [01234567...] {}  4 / 10 files  40%  (1 failed)",
                JobStatus::Processing
            )]
        );
    }

    #[test]
    fn job_without_status_is_loading() {
        let entry = ActiveJob::new("job-1", ImportSource::Dropbox);
        let lines = render_job(&JobRowView::new(&entry, &tracked(None)));
        assert_eq!(lines, vec!["  Dropbox Import [job-1...] loading...".to_string()]);
    }

    #[test]
    fn app_view_lists_started_import_and_jobs() {
        let (state, _) = update(
            AppState::new(),
            Msg::ImportStarted {
                source: ImportSource::Dropbox,
                job_id: "job-123".into(),
            },
        );
        let lines = render_app(&state.view());
        assert_eq!(lines[0], "Dropbox: Import started! Job ID: job-123");
        assert_eq!(lines[1], "Active Import Jobs (1)");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        let mut state = CatalogState::new(20);
        let query = state.load(1, Some(CatalogSource::Dropbox));
        state.apply_loaded(
            query.ticket,
            CatalogPage {
                records: Vec::new(),
                pagination: Pagination {
                    page: 1,
                    pages: 0,
                    total: 0,
                    page_size: 20,
                },
            },
        );
        let lines = render_catalog(&CatalogView::from_state(&state));
        assert_eq!(
            lines,
            vec![
                "Source: Dropbox".to_string(),
                "No images".to_string(),
                "Import images from Google Drive or Dropbox to get started.".to_string(),
            ]
        );
    }
}
