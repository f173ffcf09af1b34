#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use importer_core::{
    CatalogPage, CatalogRecord, ImportSource, JobId, JobSnapshot, JobStatus, ListingRequest,
    RecordId,
};
use importer_engine::{EngineEvent, EventSink, Gateway, GatewayError, GatewayFailure};
use tokio::sync::Notify;
use tokio::time::Instant;

pub fn snapshot(status: JobStatus, processed: u32, total: u32, percent: u8) -> JobSnapshot {
    JobSnapshot {
        status,
        total_files: total,
        processed_files: processed,
        failed_files: 0,
        progress_percent: percent,
        error_message: None,
    }
}

pub fn network_error() -> GatewayError {
    GatewayError::new(GatewayFailure::Network, "connection refused")
}

/// In-memory gateway answering from per-job scripts.
#[derive(Default)]
pub struct ScriptedGateway {
    statuses: Mutex<HashMap<JobId, VecDeque<Result<JobSnapshot, GatewayError>>>>,
    status_calls: Mutex<Vec<(JobId, Instant)>>,
    import_result: Mutex<Option<Result<JobId, GatewayError>>>,
    import_calls: Mutex<Vec<(ImportSource, String)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(
        self,
        job_id: &str,
        script: Vec<Result<JobSnapshot, GatewayError>>,
    ) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert(job_id.to_string(), script.into());
        self
    }

    pub fn with_import(self, result: Result<&str, GatewayError>) -> Self {
        *self.import_result.lock().unwrap() = Some(result.map(str::to_string));
        self
    }

    /// Status calls block until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn status_calls(&self, job_id: &str) -> Vec<Instant> {
        self.status_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == job_id)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn import_calls(&self) -> Vec<(ImportSource, String)> {
        self.import_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Gateway for ScriptedGateway {
    async fn start_import(
        &self,
        source: ImportSource,
        folder_url: &str,
    ) -> Result<JobId, GatewayError> {
        self.import_calls
            .lock()
            .unwrap()
            .push((source, folder_url.to_string()));
        self.import_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(GatewayError::new(GatewayFailure::Network, "no import scripted")))
    }

    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, GatewayError> {
        self.status_calls
            .lock()
            .unwrap()
            .push((job_id.to_string(), Instant::now()));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.statuses
            .lock()
            .unwrap()
            .get_mut(job_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(GatewayError::new(GatewayFailure::Network, "script exhausted")))
    }

    async fn list_images(&self, _request: &ListingRequest) -> Result<CatalogPage, GatewayError> {
        Err(GatewayError::new(GatewayFailure::Network, "not scripted"))
    }

    async fn get_image(&self, _id: RecordId) -> Result<CatalogRecord, GatewayError> {
        Err(GatewayError::new(GatewayFailure::Network, "not scripted"))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Instant, EngineEvent)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<(Instant, EngineEvent)> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }
}
