//! Per-submission system-test verdicts

use std::collections::HashSet;

use crate::constants::FULL_TESTSET;
use crate::models::{ContestPhase, ParticipationType, ScoringKind, Submission, Verdict};

use super::event::{ChangeEvent, SysTestVerdict};
use super::snapshot::ContestSnapshot;

/// Reports each submission's final system-test verdict exactly once
#[derive(Debug, Default)]
pub struct SystemTestSubmissionTracker {
    reported: HashSet<u64>,
}

impl SystemTestSubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether submissions should be fetched this tick.
    ///
    /// `committed` is the participation held before this tick; a handle that
    /// only now became a contestant starts being tracked on the next tick.
    pub fn is_active(snapshot: &ContestSnapshot, committed: ParticipationType) -> bool {
        snapshot.phase == ContestPhase::SystemTest
            && snapshot.scoring == ScoringKind::Classic
            && committed.is_contestant()
            && snapshot.participation().is_contestant()
            && snapshot.has_preliminary_results()
    }

    /// Turn the newly judged submissions into events, oldest first
    pub fn collect(&mut self, mut submissions: Vec<Submission>) -> Vec<ChangeEvent> {
        submissions.sort_by_key(|s| s.id);

        submissions
            .into_iter()
            .filter(|s| s.author.participant_type.participated_in_contest())
            .filter(|s| s.testset == FULL_TESTSET)
            .filter_map(|s| {
                let verdict = s.verdict?;
                if !verdict.is_final() || verdict == Verdict::Skipped {
                    return None;
                }
                // insert is false for ids reported before
                self.reported.insert(s.id).then(|| ChangeEvent::SystemTestResultForSubmission {
                    submission_id: s.id,
                    problem: s.problem_label(),
                    verdict: if verdict == Verdict::Ok {
                        SysTestVerdict::Ok
                    } else {
                        SysTestVerdict::Failed {
                            verdict,
                            test: s.passed_test_count + 1,
                        }
                    },
                })
            })
            .collect()
    }
}
