//! Submission model

use serde::{Deserialize, Serialize};

use super::contest::ParticipationType;

/// Judge verdict of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Failed,
    Ok,
    Partial,
    CompilationError,
    RuntimeError,
    WrongAnswer,
    PresentationError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    IdlenessLimitExceeded,
    SecurityViolated,
    Crashed,
    InputPreparationCrashed,
    Challenged,
    Skipped,
    Testing,
    Rejected,
    Waiting,
    #[serde(other)]
    Unknown,
}

impl Verdict {
    /// Verdict will not change anymore
    pub fn is_final(&self) -> bool {
        !matches!(self, Verdict::Waiting | Verdict::Testing)
    }

    /// Wire name as used by the API
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Failed => "FAILED",
            Verdict::Ok => "OK",
            Verdict::Partial => "PARTIAL",
            Verdict::CompilationError => "COMPILATION_ERROR",
            Verdict::RuntimeError => "RUNTIME_ERROR",
            Verdict::WrongAnswer => "WRONG_ANSWER",
            Verdict::PresentationError => "PRESENTATION_ERROR",
            Verdict::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            Verdict::MemoryLimitExceeded => "MEMORY_LIMIT_EXCEEDED",
            Verdict::IdlenessLimitExceeded => "IDLENESS_LIMIT_EXCEEDED",
            Verdict::SecurityViolated => "SECURITY_VIOLATED",
            Verdict::Crashed => "CRASHED",
            Verdict::InputPreparationCrashed => "INPUT_PREPARATION_CRASHED",
            Verdict::Challenged => "CHALLENGED",
            Verdict::Skipped => "SKIPPED",
            Verdict::Testing => "TESTING",
            Verdict::Rejected => "REJECTED",
            Verdict::Waiting => "WAITING",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Problem reference inside a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionProblem {
    pub contest_id: Option<u32>,
    pub index: String,
}

/// Author of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAuthor {
    #[serde(default)]
    pub participant_type: ParticipationType,
}

/// Submission as returned by `contest.status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub contest_id: Option<u32>,
    pub problem: SubmissionProblem,
    pub author: SubmissionAuthor,
    /// Absent while the submission is still in the queue
    pub verdict: Option<Verdict>,
    #[serde(default)]
    pub testset: String,
    #[serde(default)]
    pub passed_test_count: u32,
}

impl Submission {
    /// Problem label such as `1234A`
    pub fn problem_label(&self) -> String {
        let contest_id = self.contest_id.or(self.problem.contest_id);
        match contest_id {
            Some(id) => format!("{}{}", id, self.problem.index),
            None => self.problem.index.clone(),
        }
    }
}
