//! Contest model

use serde::{Deserialize, Serialize};

/// Contest phase as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    #[default]
    #[serde(other)]
    Undefined,
}

impl ContestPhase {
    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Before => "Before",
            Self::Coding => "Coding",
            Self::PendingSystemTest => "Pending system testing",
            Self::SystemTest => "System testing",
            Self::Finished => "Finished",
        }
    }
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Scoring rules of a contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScoringKind {
    /// Classic Codeforces rules with hacks and system tests
    #[serde(rename = "CF")]
    Classic,
    #[serde(rename = "ICPC")]
    Icpc,
    #[serde(rename = "IOI")]
    Ioi,
    #[default]
    #[serde(other)]
    Undefined,
}

impl std::fmt::Display for ScoringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Classic => write!(f, "CF"),
            Self::Icpc => write!(f, "ICPC"),
            Self::Ioi => write!(f, "IOI"),
        }
    }
}

/// How a handle takes part in a contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationType {
    Contestant,
    Practice,
    Virtual,
    Manager,
    OutOfCompetition,
    #[default]
    #[serde(other)]
    NotParticipated,
}

impl ParticipationType {
    /// Official participation, eligible for a rating change
    pub fn is_contestant(&self) -> bool {
        matches!(self, Self::Contestant)
    }

    /// Took part in the contest itself, officially or out of competition
    pub fn participated_in_contest(&self) -> bool {
        matches!(self, Self::Contestant | Self::OutOfCompetition)
    }
}

impl std::fmt::Display for ParticipationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotParticipated => write!(f, "not participated"),
            Self::Contestant => write!(f, "contestant"),
            Self::Practice => write!(f, "practice"),
            Self::Virtual => write!(f, "virtual"),
            Self::Manager => write!(f, "manager"),
            Self::OutOfCompetition => write!(f, "out of competition"),
        }
    }
}

/// Contest metadata from the standings response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub scoring: ScoringKind,
    #[serde(default)]
    pub phase: ContestPhase,
    #[serde(default)]
    pub duration_seconds: i64,
    pub start_time_seconds: Option<i64>,
    pub relative_time_seconds: Option<i64>,
}

/// Problem header from the standings response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub index: String,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_contest() {
        let contest: Contest = serde_json::from_value(serde_json::json!({
            "id": 1234,
            "name": "Codeforces Round #1",
            "type": "CF",
            "phase": "PENDING_SYSTEM_TEST",
            "frozen": false,
            "durationSeconds": 7200,
            "startTimeSeconds": 1700000000,
            "relativeTimeSeconds": 7300
        }))
        .unwrap();

        assert_eq!(contest.scoring, ScoringKind::Classic);
        assert_eq!(contest.phase, ContestPhase::PendingSystemTest);
        assert_eq!(contest.relative_time_seconds, Some(7300));
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let phase: ContestPhase = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(phase, ContestPhase::Undefined);

        let kind: ParticipationType = serde_json::from_str("\"TEAM_ONLY\"").unwrap();
        assert_eq!(kind, ParticipationType::NotParticipated);

        let scoring: ScoringKind = serde_json::from_str("\"TEAM_RELAY\"").unwrap();
        assert_eq!(scoring, ScoringKind::Undefined);
    }

    #[test]
    fn test_unknown_phase_inside_contest() {
        let contest: Contest = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Round",
            "type": "CF",
            "phase": "SOMETHING_NEW",
            "durationSeconds": 7200
        }))
        .unwrap();
        assert_eq!(contest.phase, ContestPhase::Undefined);
        assert_eq!(contest.start_time_seconds, None);
    }

    #[test]
    fn test_participation_gates() {
        assert!(ParticipationType::Contestant.is_contestant());
        assert!(ParticipationType::OutOfCompetition.participated_in_contest());
        assert!(!ParticipationType::OutOfCompetition.is_contestant());
        assert!(!ParticipationType::Virtual.participated_in_contest());
    }
}
