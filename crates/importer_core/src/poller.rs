//! Per-job polling state machine.
//!
//! [`JobPoller`] performs no IO and owns no timers. Every transition returns
//! the [`PollEffect`]s the driver has to carry out: issue a fetch, arm a
//! timer, publish a snapshot, or report completion. Results come back through
//! [`JobPoller::on_fetch_result`] tagged with the ticket they were issued
//! under, so anything arriving after a transition away from polling is
//! dropped.

use std::time::Duration;

use crate::{JobId, JobSnapshot, PollTransientError};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    /// Delay between a fetch resolving and the next fetch.
    pub interval: Duration,
    /// Grace period between observing a terminal status and completion.
    pub completion_delay: Duration,
}

impl Default for PollTiming {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            completion_delay: DEFAULT_COMPLETION_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Starting,
    Polling,
    TerminalObserved,
    Done,
    Disposed,
}

pub type FetchTicket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEffect {
    /// Fetch the job status and hand the result back with this ticket.
    Fetch { ticket: FetchTicket },
    /// Call [`JobPoller::on_tick`] after the delay.
    ScheduleTick { after: Duration },
    /// Call [`JobPoller::on_completion_due`] after the delay.
    ScheduleCompletion { after: Duration },
    /// Drop any armed timer.
    CancelTimers,
    Publish(JobSnapshot),
    ReportError(PollTransientError),
    Complete,
}

#[derive(Debug, Clone)]
pub struct JobPoller {
    job_id: JobId,
    timing: PollTiming,
    state: PollerState,
    next_ticket: FetchTicket,
    in_flight: Option<FetchTicket>,
    snapshot: Option<JobSnapshot>,
    last_error: Option<PollTransientError>,
    fetches_issued: u32,
}

impl JobPoller {
    pub fn new(job_id: impl Into<JobId>, timing: PollTiming) -> Self {
        Self {
            job_id: job_id.into(),
            timing,
            state: PollerState::Starting,
            next_ticket: 1,
            in_flight: None,
            snapshot: None,
            last_error: None,
            fetches_issued: 0,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn snapshot(&self) -> Option<&JobSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_error(&self) -> Option<&PollTransientError> {
        self.last_error.as_ref()
    }

    pub fn fetches_issued(&self) -> u32 {
        self.fetches_issued
    }

    pub fn is_live(&self) -> bool {
        !matches!(self.state, PollerState::Done | PollerState::Disposed)
    }

    /// First fetch goes out immediately, without waiting for an interval.
    pub fn start(&mut self) -> Vec<PollEffect> {
        if self.state != PollerState::Starting || self.in_flight.is_some() {
            return Vec::new();
        }
        vec![self.issue_fetch()]
    }

    pub fn on_tick(&mut self) -> Vec<PollEffect> {
        if self.state != PollerState::Polling || self.in_flight.is_some() {
            return Vec::new();
        }
        vec![self.issue_fetch()]
    }

    pub fn on_fetch_result(
        &mut self,
        ticket: FetchTicket,
        result: Result<JobSnapshot, PollTransientError>,
    ) -> Vec<PollEffect> {
        let accepting = matches!(self.state, PollerState::Starting | PollerState::Polling);
        if !accepting || self.in_flight != Some(ticket) {
            return Vec::new();
        }
        self.in_flight = None;

        match result {
            Ok(snapshot) => {
                let terminal = snapshot.status.is_terminal();
                self.snapshot = Some(snapshot.clone());
                self.last_error = None;
                if terminal {
                    self.state = PollerState::TerminalObserved;
                    vec![
                        PollEffect::Publish(snapshot),
                        PollEffect::CancelTimers,
                        PollEffect::ScheduleCompletion {
                            after: self.timing.completion_delay,
                        },
                    ]
                } else {
                    self.state = PollerState::Polling;
                    vec![
                        PollEffect::Publish(snapshot),
                        PollEffect::ScheduleTick {
                            after: self.timing.interval,
                        },
                    ]
                }
            }
            Err(err) => {
                self.state = PollerState::Polling;
                self.last_error = Some(err.clone());
                vec![
                    PollEffect::ReportError(err),
                    PollEffect::ScheduleTick {
                        after: self.timing.interval,
                    },
                ]
            }
        }
    }

    pub fn on_completion_due(&mut self) -> Vec<PollEffect> {
        if self.state != PollerState::TerminalObserved {
            return Vec::new();
        }
        self.state = PollerState::Done;
        vec![PollEffect::Complete]
    }

    /// Stops the machine; every later result or timer is ignored.
    pub fn dispose(&mut self) -> Vec<PollEffect> {
        if matches!(self.state, PollerState::Disposed) {
            return Vec::new();
        }
        let was_done = self.state == PollerState::Done;
        self.state = PollerState::Disposed;
        self.in_flight = None;
        if was_done {
            Vec::new()
        } else {
            vec![PollEffect::CancelTimers]
        }
    }

    fn issue_fetch(&mut self) -> PollEffect {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.fetches_issued += 1;
        PollEffect::Fetch { ticket }
    }
}
