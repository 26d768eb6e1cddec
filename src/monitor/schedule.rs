//! Phase-driven poll plan

use std::time::Duration;

use crate::config::ScheduleConfig;
use crate::models::ContestPhase;

/// How the loop waits after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseWait {
    Fixed(Duration),
    /// Hand over to the rating-change wait
    RatingWait,
}

/// What the loop does while the contest is in a given phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePlan {
    pub wait: PhaseWait,
    /// Scrape the system-test percentage into the snapshot
    pub sys_test_progress: bool,
    /// Run the system-test submission tracker
    pub submission_tracking: bool,
}

impl PhasePlan {
    fn fixed(delay: Duration) -> Self {
        Self {
            wait: PhaseWait::Fixed(delay),
            sys_test_progress: false,
            submission_tracking: false,
        }
    }
}

/// Maps the contest phase to its poll plan
#[derive(Debug, Clone)]
pub struct PollScheduler {
    config: ScheduleConfig,
}

impl PollScheduler {
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn plan(&self, phase: ContestPhase) -> PhasePlan {
        match phase {
            ContestPhase::Coding => PhasePlan::fixed(self.config.coding),
            ContestPhase::SystemTest => PhasePlan {
                wait: PhaseWait::Fixed(self.config.system_test),
                sys_test_progress: true,
                submission_tracking: true,
            },
            ContestPhase::PendingSystemTest => PhasePlan::fixed(self.config.pending_system_test),
            ContestPhase::Finished => PhasePlan {
                wait: PhaseWait::RatingWait,
                sys_test_progress: false,
                submission_tracking: false,
            },
            ContestPhase::Before | ContestPhase::Undefined => PhasePlan::fixed(self.config.idle),
        }
    }
}
