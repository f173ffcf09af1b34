use std::collections::{HashMap, VecDeque};
use std::io::Write;
use std::time::Duration;

use chrono::Local;
use importer_core::{update, AppState, ImportSource, JobId, JobStatus, Msg};
use importer_logging::importer_debug;

use crate::effects::EffectRunner;
use crate::render::render_app;

const EVENT_WAIT: Duration = Duration::from_millis(250);

/// How an import session ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub started: Vec<JobId>,
    pub rejected: usize,
    pub finished: HashMap<JobId, JobStatus>,
}

impl ImportSummary {
    pub fn failed_jobs(&self) -> usize {
        self.finished
            .values()
            .filter(|status| **status == JobStatus::Failed)
            .count()
    }
}

/// Submits folder urls one at a time and follows every started job.
pub struct ImportSession<W: Write> {
    state: AppState,
    runner: EffectRunner,
    source: ImportSource,
    queue: VecDeque<String>,
    summary: ImportSummary,
    last_render: Vec<String>,
    out: W,
}

impl<W: Write> ImportSession<W> {
    pub fn new(runner: EffectRunner, source: ImportSource, urls: Vec<String>, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            source,
            queue: urls.into(),
            summary: ImportSummary::default(),
            last_render: Vec::new(),
            out,
        }
    }

    /// Runs until nothing is queued, pending or tracked.
    pub fn run(mut self) -> std::io::Result<ImportSummary> {
        loop {
            self.render()?;
            if !self.state.form(self.source).is_pending() {
                if let Some(url) = self.queue.pop_front() {
                    self.submit(url);
                    self.render()?;
                }
            }
            if self.queue.is_empty() && !self.state.is_busy() {
                break;
            }
            let msg = self.runner.next_msg(EVENT_WAIT).unwrap_or(Msg::Tick);
            self.observe(&msg);
            self.dispatch(msg);
        }
        self.dispatch(Msg::ShutdownRequested);
        Ok(self.summary)
    }

    fn submit(&mut self, url: String) {
        let source = self.source;
        self.dispatch(Msg::InputChanged { source, text: url });
        self.dispatch(Msg::ImportSubmitted { source });
        if !self.state.form(source).is_pending() {
            // Rejected before anything was sent.
            self.summary.rejected += 1;
        }
    }

    fn observe(&mut self, msg: &Msg) {
        match msg {
            Msg::ImportStarted { job_id, .. } => self.summary.started.push(job_id.clone()),
            Msg::ImportFailed { .. } => self.summary.rejected += 1,
            Msg::JobStatusFetched { job_id, snapshot } if snapshot.status.is_terminal() => {
                self.summary
                    .finished
                    .insert(job_id.clone(), snapshot.status);
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render(&mut self) -> std::io::Result<()> {
        if !self.state.consume_dirty() {
            return Ok(());
        }
        let lines = render_app(&self.state.view());
        if lines == self.last_render {
            return Ok(());
        }
        importer_debug!("Rendering {} lines", lines.len());
        let stamp = Local::now().format("%H:%M:%S");
        for line in &lines {
            writeln!(self.out, "[{stamp}] {line}")?;
        }
        self.out.flush()?;
        self.last_render = lines;
        Ok(())
    }
}
