use std::collections::HashMap;

use crate::view_model::{AppViewModel, ImportFormView, JobRowView};
use crate::{ActiveJob, ImportForm, ImportSource, JobId, JobRegistry, JobSnapshot};

/// Latest poll outcome for one tracked job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackedStatus {
    pub snapshot: Option<JobSnapshot>,
    pub transient_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    google_drive: ImportForm,
    dropbox: ImportForm,
    registry: JobRegistry,
    statuses: HashMap<JobId, TrackedStatus>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            google_drive: ImportForm::new(ImportSource::GoogleDrive),
            dropbox: ImportForm::new(ImportSource::Dropbox),
            registry: JobRegistry::new(),
            statuses: HashMap::new(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self, source: ImportSource) -> &ImportForm {
        match source {
            ImportSource::GoogleDrive => &self.google_drive,
            ImportSource::Dropbox => &self.dropbox,
        }
    }

    pub(crate) fn form_mut(&mut self, source: ImportSource) -> &mut ImportForm {
        match source {
            ImportSource::GoogleDrive => &mut self.google_drive,
            ImportSource::Dropbox => &mut self.dropbox,
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn status(&self, job_id: &str) -> Option<&TrackedStatus> {
        self.statuses.get(job_id)
    }

    /// True while a submission is pending or any job is still tracked.
    pub fn is_busy(&self) -> bool {
        !self.registry.is_empty()
            || ImportSource::ALL
                .iter()
                .any(|source| self.form(*source).is_pending())
    }

    pub(crate) fn track(&mut self, entry: ActiveJob) -> bool {
        let id = entry.id.clone();
        if !self.registry.add(entry) {
            return false;
        }
        self.statuses.insert(id, TrackedStatus::default());
        true
    }

    pub(crate) fn untrack(&mut self, job_id: &str) -> bool {
        self.statuses.remove(job_id);
        self.registry.remove(job_id).is_some()
    }

    pub(crate) fn status_mut(&mut self, job_id: &str) -> Option<&mut TrackedStatus> {
        self.statuses.get_mut(job_id)
    }

    pub fn view(&self) -> AppViewModel {
        let forms = ImportSource::ALL
            .iter()
            .map(|source| ImportFormView::from_form(self.form(*source)))
            .collect();
        let jobs = self
            .registry
            .list()
            .iter()
            .map(|entry| {
                let status = self.statuses.get(&entry.id).cloned().unwrap_or_default();
                JobRowView::new(entry, &status)
            })
            .collect();
        AppViewModel {
            forms,
            job_count: self.registry.len(),
            jobs,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
