//! Display helpers for scores and ratings

use crate::models::{ContestPhase, ProblemResult, ProblemStatus, ScoringKind};

/// Points without a trailing `.0`
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{}", points)
    }
}

/// Signed rating delta, `+0` for no change
pub fn format_delta(delta: i32) -> String {
    format!("{:+}", delta)
}

/// Short symbol for a problem cell in the standings
///
/// Classic: points, `-N` for N rejected attempts, `?` for a pretested
/// solution waiting on system tests. ICPC: `+` when solved. IOI: points.
pub fn problem_result_symbol(result: &ProblemResult, scoring: ScoringKind, phase: ContestPhase) -> String {
    match scoring {
        ScoringKind::Classic => match result.status {
            ProblemStatus::Final if result.points == 0.0 => {
                if result.rejected_attempts > 0 {
                    format!("-{}", result.rejected_attempts)
                } else {
                    String::new()
                }
            }
            ProblemStatus::Preliminary if result.points == 0.0 => {
                if phase == ContestPhase::SystemTest {
                    "?".to_string()
                } else {
                    String::new()
                }
            }
            _ => format_points(result.points),
        },
        ScoringKind::Icpc => {
            if result.points == 1.0 {
                "+".to_string()
            } else {
                String::new()
            }
        }
        ScoringKind::Ioi => {
            if result.points != 0.0 {
                format_points(result.points)
            } else {
                String::new()
            }
        }
        ScoringKind::Undefined => String::new(),
    }
}
