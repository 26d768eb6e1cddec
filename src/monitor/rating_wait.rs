//! Escalating wait for the post-contest rating change

use std::time::Duration;

use tokio::time::Instant;

use crate::api::RatingChangesFetcher;
use crate::config::ScheduleConfig;
use crate::error::FetchError;
use crate::models::RatingChange;

/// Result of one rating-wait attempt
#[derive(Debug, Clone, PartialEq)]
pub enum RatingWaitStep {
    /// The rating change for the handle was published
    Reported(RatingChange),
    /// The contest is unrated; nothing will ever be published
    Unavailable,
    /// Not yet; try again after the delay
    Retry(Duration),
    /// Waited past the deadline
    GaveUp,
}

/// Polls for the handle's rating change with growing delays and a deadline
#[derive(Debug)]
pub struct RatingWaitEscalator {
    contest_id: u32,
    handle: String,
    tiers: Vec<(Duration, Duration)>,
    give_up_after: Duration,
    started: Option<Instant>,
}

impl RatingWaitEscalator {
    pub fn new(contest_id: u32, handle: impl Into<String>, schedule: &ScheduleConfig) -> Self {
        Self {
            contest_id,
            handle: handle.into(),
            tiers: schedule.rating_wait_tiers.clone(),
            give_up_after: schedule.rating_wait_give_up,
            started: None,
        }
    }

    /// When the wait began, if it has
    pub fn started(&self) -> Option<Instant> {
        self.started
    }

    /// One attempt: fetch the rating changes and decide what comes next
    pub async fn step(&mut self, fetcher: &dyn RatingChangesFetcher) -> RatingWaitStep {
        let now = Instant::now();
        let started = *self.started.get_or_insert(now);

        match fetcher.fetch_rating_changes(self.contest_id).await {
            Ok(changes) => {
                if let Some(change) = self.find_own(changes) {
                    return RatingWaitStep::Reported(change);
                }
                tracing::debug!("Rating changes published without {}", self.handle);
            }
            Err(FetchError::RatingChangesUnavailable) => {
                tracing::info!("Contest {} is unrated", self.contest_id);
                return RatingWaitStep::Unavailable;
            }
            Err(e) => {
                tracing::warn!(code = e.error_code(), "Rating changes fetch failed: {}", e);
            }
        }

        match self.delay_after(now - started) {
            Some(delay) => RatingWaitStep::Retry(delay),
            None => RatingWaitStep::GaveUp,
        }
    }

    /// Delay before the next attempt after having waited `waited`, or `None`
    /// once the deadline is passed
    pub fn delay_after(&self, waited: Duration) -> Option<Duration> {
        if waited > self.give_up_after {
            return None;
        }

        self.tiers
            .iter()
            .find(|(limit, _)| waited <= *limit)
            .or_else(|| self.tiers.last())
            .map(|&(_, delay)| delay)
    }

    fn find_own(&self, changes: Vec<RatingChange>) -> Option<RatingChange> {
        changes
            .into_iter()
            .rev()
            .find(|change| change.handle.eq_ignore_ascii_case(&self.handle))
    }
}
