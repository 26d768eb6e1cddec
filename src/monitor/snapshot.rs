//! Per-tick reconstruction of the watched participation

use crate::models::{ContestPhase, ParticipationType, ProblemResult, ScoringKind, StandingsData};

/// Row data of the watched handle
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantStanding {
    pub participation: ParticipationType,
    pub rank: u32,
    pub points: f64,
    /// Aligned positionally with [`ContestSnapshot::problem_names`]
    pub problem_results: Vec<ProblemResult>,
}

/// Complete contest state for one tick. Built fresh every tick, never mutated
/// after the tick's fetches complete.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestSnapshot {
    pub contest_name: String,
    pub scoring: ScoringKind,
    pub phase: ContestPhase,
    pub problem_names: Vec<String>,
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
    pub relative_time_seconds: Option<i64>,
    /// `None` while the handle has no row in the contest standings
    pub participant: Option<ParticipantStanding>,
    /// Only fetched during system testing
    pub system_test_percentage: Option<u8>,
}

impl ContestSnapshot {
    pub fn from_standings(data: &StandingsData) -> Self {
        let participant = data.contest_row().map(|row| ParticipantStanding {
            participation: row.party.participant_type,
            rank: row.rank,
            points: row.points,
            problem_results: row.problem_results.clone(),
        });

        Self {
            contest_name: data.contest.name.clone(),
            scoring: data.contest.scoring,
            phase: data.contest.phase,
            problem_names: data.problems.iter().map(|p| p.index.clone()).collect(),
            duration_seconds: data.contest.duration_seconds,
            start_time_seconds: data.contest.start_time_seconds,
            relative_time_seconds: data.contest.relative_time_seconds,
            participant,
            system_test_percentage: None,
        }
    }

    /// Seconds left in the coding phase, if the API told us where we are
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.relative_time_seconds
            .map(|elapsed| self.duration_seconds.saturating_sub(elapsed).max(0))
    }

    pub fn participation(&self) -> ParticipationType {
        self.participant
            .as_ref()
            .map(|p| p.participation)
            .unwrap_or_default()
    }

    pub fn has_preliminary_results(&self) -> bool {
        self.participant
            .as_ref()
            .is_some_and(|p| p.problem_results.iter().any(ProblemResult::is_preliminary))
    }
}
