//! Standings model

use serde::{Deserialize, Serialize};

use super::contest::{Contest, ParticipationType, Problem};

/// Whether a problem result can still change during system testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemStatus {
    #[default]
    Preliminary,
    Final,
}

/// Result of one participant on one problem
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResult {
    pub points: f64,
    #[serde(rename = "type", default)]
    pub status: ProblemStatus,
    #[serde(rename = "rejectedAttemptCount", default)]
    pub rejected_attempts: u32,
}

impl ProblemResult {
    pub fn is_preliminary(&self) -> bool {
        self.status == ProblemStatus::Preliminary
    }
}

/// Party (participant group) of a standings row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub participant_type: ParticipationType,
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    pub party: Party,
    pub rank: u32,
    pub points: f64,
    #[serde(default)]
    pub problem_results: Vec<ProblemResult>,
}

/// `contest.standings` result filtered to a single handle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsData {
    pub contest: Contest,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub rows: Vec<StandingsRow>,
}

impl StandingsData {
    /// Row of the watched handle that belongs to the contest itself
    pub fn contest_row(&self) -> Option<&StandingsRow> {
        self.rows
            .iter()
            .find(|row| row.party.participant_type.participated_in_contest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContestPhase;

    #[test]
    fn test_decode_standings() {
        let data: StandingsData = serde_json::from_value(serde_json::json!({
            "contest": {
                "id": 1234,
                "name": "Round",
                "type": "ICPC",
                "phase": "CODING",
                "durationSeconds": 7200,
                "relativeTimeSeconds": 600
            },
            "problems": [{"index": "A", "name": "Sum"}, {"index": "B"}],
            "rows": [
                {
                    "party": {"participantType": "PRACTICE"},
                    "rank": 0,
                    "points": 1.0,
                    "problemResults": [
                        {"points": 1.0, "rejectedAttemptCount": 0, "type": "FINAL"},
                        {"points": 0.0, "rejectedAttemptCount": 0, "type": "FINAL"}
                    ]
                },
                {
                    "party": {"participantType": "CONTESTANT"},
                    "rank": 17,
                    "points": 1.0,
                    "penalty": 12,
                    "problemResults": [
                        {"points": 1.0, "rejectedAttemptCount": 2, "type": "PRELIMINARY"},
                        {"points": 0.0, "rejectedAttemptCount": 0, "type": "PRELIMINARY"}
                    ]
                }
            ]
        }))
        .unwrap();

        assert_eq!(data.contest.phase, ContestPhase::Coding);
        assert_eq!(data.problems.len(), 2);

        let row = data.contest_row().unwrap();
        assert_eq!(row.rank, 17);
        assert_eq!(row.problem_results[0].rejected_attempts, 2);
        assert!(row.problem_results[1].is_preliminary());
    }

    #[test]
    fn test_no_contest_row() {
        let data: StandingsData = serde_json::from_value(serde_json::json!({
            "contest": {"id": 1, "name": "Round", "phase": "BEFORE"},
            "problems": [],
            "rows": []
        }))
        .unwrap();

        assert!(data.contest_row().is_none());
    }
}
