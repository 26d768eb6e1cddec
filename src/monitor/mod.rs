//! Live contest monitor
//!
//! One monitor watches one handle in one contest. Each tick it:
//!
//! 1. fetches the standings (and, during system testing, the progress
//!    percentage and the handle's submissions),
//! 2. diffs the rebuilt [`ContestSnapshot`] against the previous tick in the
//!    [`ChangeDetector`],
//! 3. commits the resulting events to the registered listeners,
//! 4. sleeps for the phase's delay, or once the contest is finished, waits
//!    for the rating change with the [`RatingWaitEscalator`].
//!
//! Fetches and sleeps are the only suspension points and each of them races
//! the cancellation flag. Steps 2 and 3 never suspend, so a cancelled monitor
//! never leaves a tick half committed.

pub mod cell;
pub mod detector;
pub mod event;
pub mod rating_wait;
pub mod schedule;
pub mod sink;
pub mod snapshot;
pub mod systest;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::api::Fetchers;
use crate::config::ScheduleConfig;
use crate::error::FetchError;

pub use cell::ChangeCell;
pub use detector::ChangeDetector;
pub use event::{ChangeEvent, SysTestVerdict};
pub use rating_wait::{RatingWaitEscalator, RatingWaitStep};
pub use schedule::{PhasePlan, PhaseWait, PollScheduler};
pub use sink::{EventListener, EventSink};
pub use snapshot::{ContestSnapshot, ParticipantStanding};
pub use systest::SystemTestSubmissionTracker;

/// How a monitor loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The rating change was published and reported
    RatingReported,
    /// The contest turned out to be unrated
    RatingUnavailable,
    /// No rating change within the wait deadline
    GaveUp,
    /// Contest finished without an official participation
    NotRated,
    /// Stopped by the owner
    Cancelled,
}

impl std::fmt::Display for MonitorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RatingReported => write!(f, "rating change reported"),
            Self::RatingUnavailable => write!(f, "rating changes unavailable"),
            Self::GaveUp => write!(f, "gave up waiting for rating changes"),
            Self::NotRated => write!(f, "finished without official participation"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Monitor for one (handle, contest) pair, not yet started
pub struct ContestMonitor {
    handle: String,
    contest_id: u32,
    fetchers: Fetchers,
    scheduler: PollScheduler,
    sink: EventSink,
}

impl ContestMonitor {
    pub fn new(
        handle: impl Into<String>,
        contest_id: u32,
        fetchers: Fetchers,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            handle: handle.into(),
            contest_id,
            fetchers,
            scheduler: PollScheduler::new(schedule),
            sink: EventSink::new(),
        }
    }

    /// Add a listener; listeners are called in registration order
    pub fn register<L: EventListener + 'static>(&mut self, listener: L) {
        self.sink.register(Box::new(listener));
    }

    pub fn register_boxed(&mut self, listener: Box<dyn EventListener>) {
        self.sink.register(listener);
    }

    /// Spawn the loop on the current tokio runtime
    pub fn start(self) -> MonitorHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (done_tx, done) = watch::channel(None);
        let handle = self.handle.clone();
        let contest_id = self.contest_id;
        let join = tokio::spawn(async move {
            let outcome = self.run(cancel_rx).await;
            done_tx.send_replace(Some(outcome));
            outcome
        });

        MonitorHandle {
            handle,
            contest_id,
            cancel_tx,
            done,
            join,
        }
    }

    /// Run the loop to completion on the calling task.
    ///
    /// The loop stops when `cancel` turns true or its sender is dropped.
    pub async fn run(self, cancel: watch::Receiver<bool>) -> MonitorOutcome {
        let span = tracing::info_span!(
            "monitor",
            handle = %self.handle,
            contest_id = self.contest_id
        );
        self.run_loop(cancel).instrument(span).await
    }

    async fn run_loop(mut self, mut cancel: watch::Receiver<bool>) -> MonitorOutcome {
        tracing::info!("Contest monitor started with {} listener(s)", self.sink.len());

        let mut detector = ChangeDetector::new();
        let mut tracker = SystemTestSubmissionTracker::new();
        let mut rating_wait =
            RatingWaitEscalator::new(self.contest_id, self.handle.clone(), self.scheduler.config());

        let outcome = loop {
            let Some(committed) = self.tick(&mut detector, &mut tracker, &mut cancel).await else {
                break MonitorOutcome::Cancelled;
            };
            if committed {
                tracing::debug!(phase = %detector.phase(), "Tick committed changes");
            }

            let delay = match self.scheduler.plan(detector.phase()).wait {
                PhaseWait::Fixed(delay) => delay,
                PhaseWait::RatingWait => {
                    if !detector.participation().is_contestant() {
                        break MonitorOutcome::NotRated;
                    }

                    let step = rating_wait.step(self.fetchers.rating_changes.as_ref());
                    let Some(step) = until_cancelled(&mut cancel, step).await else {
                        break MonitorOutcome::Cancelled;
                    };
                    match step {
                        RatingWaitStep::Reported(change) => {
                            tracing::info!(
                                old = change.old_rating,
                                new = change.new_rating,
                                "Rating change published"
                            );
                            self.sink.commit(&[ChangeEvent::RatingChanged(change)]);
                            break MonitorOutcome::RatingReported;
                        }
                        RatingWaitStep::Unavailable => break MonitorOutcome::RatingUnavailable,
                        RatingWaitStep::GaveUp => break MonitorOutcome::GaveUp,
                        RatingWaitStep::Retry(delay) => delay,
                    }
                }
            };

            if until_cancelled(&mut cancel, tokio::time::sleep(delay)).await.is_none() {
                break MonitorOutcome::Cancelled;
            }
        };

        tracing::info!("Contest monitor stopped: {}", outcome);
        outcome
    }

    /// One poll. Returns `None` when cancelled, otherwise whether events were committed.
    async fn tick(
        &mut self,
        detector: &mut ChangeDetector,
        tracker: &mut SystemTestSubmissionTracker,
        cancel: &mut watch::Receiver<bool>,
    ) -> Option<bool> {
        let include_unofficial = !detector.participation().is_contestant();
        let standings = until_cancelled(
            cancel,
            self.fetchers
                .standings
                .fetch_standings(self.contest_id, &self.handle, include_unofficial),
        )
        .await?;

        let mut snapshot = match standings {
            Ok(data) => ContestSnapshot::from_standings(&data),
            Err(FetchError::ContestNotStarted) => {
                let events = detector.apply_not_started();
                return Some(self.sink.commit(&events));
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), "Standings fetch failed: {}", e);
                return Some(false);
            }
        };

        let plan = self.scheduler.plan(snapshot.phase);

        if plan.sys_test_progress {
            let progress = until_cancelled(
                cancel,
                self.fetchers.sys_test_progress.fetch_sys_test_progress(self.contest_id),
            )
            .await?;
            match progress {
                Ok(percentage) => snapshot.system_test_percentage = percentage,
                Err(e) => tracing::warn!(code = e.error_code(), "Progress fetch failed: {}", e),
            }
        }

        let mut submissions = None;
        if plan.submission_tracking
            && SystemTestSubmissionTracker::is_active(&snapshot, detector.participation())
        {
            let fetched = until_cancelled(
                cancel,
                self.fetchers.submissions.fetch_submissions(self.contest_id, &self.handle),
            )
            .await?;
            match fetched {
                Ok(list) => submissions = Some(list),
                Err(e) => tracing::warn!(code = e.error_code(), "Submissions fetch failed: {}", e),
            }
        }

        // Everything below runs without suspending
        let mut events = detector.apply(&snapshot);
        if let Some(list) = submissions {
            events.extend(tracker.collect(list));
        }

        Some(self.sink.commit(&events))
    }
}

impl std::fmt::Debug for ContestMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContestMonitor")
            .field("handle", &self.handle)
            .field("contest_id", &self.contest_id)
            .field("sink", &self.sink)
            .finish()
    }
}

/// Owner side of a running monitor. Dropping it stops the monitor.
#[derive(Debug)]
pub struct MonitorHandle {
    handle: String,
    contest_id: u32,
    cancel_tx: watch::Sender<bool>,
    done: watch::Receiver<Option<MonitorOutcome>>,
    join: JoinHandle<MonitorOutcome>,
}

impl MonitorHandle {
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn contest_id(&self) -> u32 {
        self.contest_id
    }

    /// Ask the loop to stop at its next suspension point
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// Wait for the loop to end without giving up the handle.
    ///
    /// The listeners are released by the time this returns.
    pub async fn finished(&self) -> MonitorOutcome {
        let mut done = self.done.clone();
        let outcome = match done.wait_for(Option::is_some).await {
            Ok(outcome) => *outcome,
            // Task aborted or panicked before reporting
            Err(_) => None,
        };
        outcome.unwrap_or(MonitorOutcome::Cancelled)
    }

    /// Wait for the loop to end
    pub async fn join(self) -> MonitorOutcome {
        let MonitorHandle { cancel_tx, join, .. } = self;
        let outcome = join.await;
        drop(cancel_tx);

        match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Monitor task failed: {}", e);
                MonitorOutcome::Cancelled
            }
        }
    }

    /// Cancel and wait for the loop to release its listeners
    pub async fn stop(self) -> MonitorOutcome {
        self.cancel();
        self.join().await
    }
}

/// Run `fut` unless cancellation arrives first
async fn until_cancelled<F: Future>(cancel: &mut watch::Receiver<bool>, fut: F) -> Option<F::Output> {
    if *cancel.borrow() {
        return None;
    }

    tokio::select! {
        biased;
        _ = cancel.wait_for(|cancelled| *cancelled) => None,
        output = fut => Some(output),
    }
}
