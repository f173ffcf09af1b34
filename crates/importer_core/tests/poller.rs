use std::time::Duration;

use importer_core::{
    JobPoller, JobSnapshot, JobStatus, PollEffect, PollTiming, PollTransientError, PollerState,
};
use pretty_assertions::assert_eq;

fn snapshot(status: JobStatus, processed: u32, total: u32, percent: u8) -> JobSnapshot {
    JobSnapshot {
        status,
        total_files: total,
        processed_files: processed,
        failed_files: 0,
        progress_percent: percent,
        error_message: None,
    }
}

fn fetch_ticket(effects: &[PollEffect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            PollEffect::Fetch { ticket } => Some(*ticket),
            _ => None,
        })
        .expect("fetch effect")
}

#[test]
fn start_fetches_immediately() {
    let mut poller = JobPoller::new("job-123", PollTiming::default());

    let effects = poller.start();

    assert_eq!(effects, vec![PollEffect::Fetch { ticket: 1 }]);
    assert_eq!(poller.state(), PollerState::Starting);
    assert!(poller.start().is_empty());
}

#[test]
fn progress_then_terminal_schedules_completion_once() {
    let mut poller = JobPoller::new("job-123", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());

    let processing = snapshot(JobStatus::Processing, 4, 10, 40);
    let effects = poller.on_fetch_result(ticket, Ok(processing.clone()));
    assert_eq!(
        effects,
        vec![
            PollEffect::Publish(processing),
            PollEffect::ScheduleTick {
                after: Duration::from_millis(2000)
            },
        ]
    );
    assert_eq!(poller.state(), PollerState::Polling);

    let ticket = fetch_ticket(&poller.on_tick());
    let completed = snapshot(JobStatus::Completed, 10, 10, 100);
    let effects = poller.on_fetch_result(ticket, Ok(completed.clone()));
    assert_eq!(
        effects,
        vec![
            PollEffect::Publish(completed),
            PollEffect::CancelTimers,
            PollEffect::ScheduleCompletion {
                after: Duration::from_millis(3000)
            },
        ]
    );
    assert_eq!(poller.state(), PollerState::TerminalObserved);

    // A stray tick after the terminal status must not fetch again.
    assert!(poller.on_tick().is_empty());
    assert_eq!(poller.fetches_issued(), 2);

    assert_eq!(poller.on_completion_due(), vec![PollEffect::Complete]);
    assert_eq!(poller.state(), PollerState::Done);
    assert!(poller.on_completion_due().is_empty());
    assert!(!poller.is_live());
}

#[test]
fn every_terminal_status_stops_polling() {
    for status in [
        JobStatus::Completed,
        JobStatus::CompletedWithErrors,
        JobStatus::Failed,
    ] {
        let mut poller = JobPoller::new("job", PollTiming::default());
        let ticket = fetch_ticket(&poller.start());
        poller.on_fetch_result(ticket, Ok(snapshot(status, 0, 0, 0)));

        assert_eq!(poller.state(), PollerState::TerminalObserved, "{status}");
        assert!(poller.on_tick().is_empty());
    }
}

#[test]
fn failed_fetch_keeps_polling() {
    let mut poller = JobPoller::new("job", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());

    let error = PollTransientError::new("connection refused");
    let effects = poller.on_fetch_result(ticket, Err(error.clone()));

    assert_eq!(
        effects,
        vec![
            PollEffect::ReportError(error),
            PollEffect::ScheduleTick {
                after: Duration::from_millis(2000)
            },
        ]
    );
    assert_eq!(poller.state(), PollerState::Polling);
    assert_eq!(
        poller.last_error().map(|err| err.message.as_str()),
        Some("Failed to fetch job status")
    );

    let ticket = fetch_ticket(&poller.on_tick());
    poller.on_fetch_result(ticket, Ok(snapshot(JobStatus::Processing, 1, 2, 50)));
    assert!(poller.last_error().is_none());
}

#[test]
fn no_overlapping_fetches() {
    let mut poller = JobPoller::new("job", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());
    poller.on_fetch_result(ticket, Ok(snapshot(JobStatus::Pending, 0, 0, 0)));

    assert_eq!(poller.on_tick().len(), 1);
    assert!(poller.on_tick().is_empty());
}

#[test]
fn stale_ticket_is_ignored() {
    let mut poller = JobPoller::new("job", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());

    let effects = poller.on_fetch_result(ticket + 7, Ok(snapshot(JobStatus::Completed, 1, 1, 100)));

    assert!(effects.is_empty());
    assert!(poller.snapshot().is_none());
}

#[test]
fn result_after_dispose_is_discarded() {
    let mut poller = JobPoller::new("job", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());

    assert_eq!(poller.dispose(), vec![PollEffect::CancelTimers]);
    let effects = poller.on_fetch_result(ticket, Ok(snapshot(JobStatus::Completed, 1, 1, 100)));

    assert!(effects.is_empty());
    assert!(poller.snapshot().is_none());
    assert_eq!(poller.state(), PollerState::Disposed);
    assert!(poller.on_completion_due().is_empty());
    assert!(poller.dispose().is_empty());
}

#[test]
fn dispose_during_grace_period_suppresses_completion() {
    let mut poller = JobPoller::new("job", PollTiming::default());
    let ticket = fetch_ticket(&poller.start());
    poller.on_fetch_result(ticket, Ok(snapshot(JobStatus::Failed, 0, 3, 0)));

    poller.dispose();

    assert!(poller.on_completion_due().is_empty());
}
