//! Change events delivered to listeners

use crate::models::{
    ContestPhase, ParticipationType, ProblemResult, RatingChange, ScoringKind, Verdict,
};

/// Outcome of a submission on the full test set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysTestVerdict {
    Ok,
    /// `test` is the 1-based index of the first failing test
    Failed { verdict: Verdict, test: u32 },
}

impl std::fmt::Display for SysTestVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Failed { verdict, test } => write!(f, "{} #{}", verdict, test),
        }
    }
}

/// One discrete change detected by the monitor.
///
/// Within a commit, events appear in declaration order of the variants:
/// contest identity first, then phase, timing, participation, rank and
/// points, individual problems, system-test verdicts and the rating change.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    ProblemNamesChanged(Vec<String>),
    ContestNameChanged { name: String, scoring: ScoringKind },
    PhaseChanged(ContestPhase),
    /// Seconds until the end of the coding phase
    RemainingTimeChanged(i64),
    SysTestProgressChanged(u8),
    ParticipationChanged(ParticipationType),
    RankChanged(u32),
    PointsChanged(f64),
    ProblemResultChanged {
        index: usize,
        problem: String,
        result: ProblemResult,
    },
    SystemTestResultForSubmission {
        submission_id: u64,
        problem: String,
        verdict: SysTestVerdict,
    },
    RatingChanged(RatingChange),
}

impl ChangeEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProblemNamesChanged(_) => "problem_names",
            Self::ContestNameChanged { .. } => "contest_name",
            Self::PhaseChanged(_) => "phase",
            Self::RemainingTimeChanged(_) => "remaining_time",
            Self::SysTestProgressChanged(_) => "sys_test_progress",
            Self::ParticipationChanged(_) => "participation",
            Self::RankChanged(_) => "rank",
            Self::PointsChanged(_) => "points",
            Self::ProblemResultChanged { .. } => "problem_result",
            Self::SystemTestResultForSubmission { .. } => "sys_test_result",
            Self::RatingChanged(_) => "rating",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sys_test_verdict_display() {
        assert_eq!(SysTestVerdict::Ok.to_string(), "OK");
        let failed = SysTestVerdict::Failed {
            verdict: Verdict::TimeLimitExceeded,
            test: 14,
        };
        assert_eq!(failed.to_string(), "TIME_LIMIT_EXCEEDED #14");
    }
}
