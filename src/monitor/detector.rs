//! Diffing of consecutive snapshots into change events

use crate::models::{ContestPhase, ParticipationType, ProblemResult, ScoringKind};

use super::cell::ChangeCell;
use super::event::ChangeEvent;
use super::snapshot::{ContestSnapshot, ParticipantStanding};

/// Cells holding the last committed value of every tracked field.
///
/// All cells are written in [`ChangeDetector::apply`] and nowhere else, so
/// after each call every cell reflects the same tick.
#[derive(Debug)]
pub struct ChangeDetector {
    problem_names: ChangeCell<Vec<String>>,
    contest_name: ChangeCell<String>,
    scoring: ChangeCell<ScoringKind>,
    phase: ChangeCell<ContestPhase>,
    duration_seconds: ChangeCell<i64>,
    start_time_seconds: ChangeCell<Option<i64>>,
    sys_test_percentage: ChangeCell<Option<u8>>,
    participation: ChangeCell<ParticipationType>,
    rank: ChangeCell<Option<u32>>,
    points: ChangeCell<f64>,
    problem_results: Vec<ChangeCell<ProblemResult>>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self {
            problem_names: ChangeCell::default(),
            contest_name: ChangeCell::default(),
            scoring: ChangeCell::default(),
            phase: ChangeCell::default(),
            duration_seconds: ChangeCell::new(-1),
            start_time_seconds: ChangeCell::default(),
            sys_test_percentage: ChangeCell::default(),
            participation: ChangeCell::default(),
            rank: ChangeCell::default(),
            points: ChangeCell::default(),
            problem_results: Vec::new(),
        }
    }

    pub fn phase(&self) -> ContestPhase {
        *self.phase.get()
    }

    pub fn participation(&self) -> ParticipationType {
        *self.participation.get()
    }

    pub fn scoring(&self) -> ScoringKind {
        *self.scoring.get()
    }

    /// Write a freshly fetched snapshot into the cells and report what changed
    pub fn apply(&mut self, snapshot: &ContestSnapshot) -> Vec<ChangeEvent> {
        let mut events = Vec::new();

        if self.problem_names.set(snapshot.problem_names.clone()) {
            events.push(ChangeEvent::ProblemNamesChanged(snapshot.problem_names.clone()));
        }

        let name_changed = self.contest_name.set(snapshot.contest_name.clone());
        let scoring_changed = self.scoring.set(snapshot.scoring);
        if name_changed || scoring_changed {
            events.push(ChangeEvent::ContestNameChanged {
                name: snapshot.contest_name.clone(),
                scoring: snapshot.scoring,
            });
        }

        let phase_changed = self.phase.set(snapshot.phase);
        if phase_changed {
            events.push(ChangeEvent::PhaseChanged(snapshot.phase));
        }

        let duration_changed = self.duration_seconds.set(snapshot.duration_seconds);
        let start_changed = self.start_time_seconds.set(snapshot.start_time_seconds);
        if snapshot.phase == ContestPhase::Coding
            && (phase_changed || duration_changed || start_changed)
        {
            if let Some(remaining) = snapshot.remaining_seconds() {
                events.push(ChangeEvent::RemainingTimeChanged(remaining));
            }
        }

        if let Some(percentage) = snapshot.system_test_percentage {
            if self.sys_test_percentage.set(Some(percentage)) {
                events.push(ChangeEvent::SysTestProgressChanged(percentage));
            }
        }

        if let Some(standing) = &snapshot.participant {
            self.apply_standing(standing, &snapshot.problem_names, &mut events);
        }

        events
    }

    /// The API refused the standings because the contest has not started
    pub fn apply_not_started(&mut self) -> Vec<ChangeEvent> {
        if self.phase.set(ContestPhase::Before) {
            vec![ChangeEvent::PhaseChanged(ContestPhase::Before)]
        } else {
            Vec::new()
        }
    }

    fn apply_standing(
        &mut self,
        standing: &ParticipantStanding,
        problem_names: &[String],
        events: &mut Vec<ChangeEvent>,
    ) {
        if self.participation.set(standing.participation) {
            events.push(ChangeEvent::ParticipationChanged(standing.participation));
            if standing.participation.is_contestant() {
                // Official results start from scratch; compare from next tick on
                self.reset_standing();
                return;
            }
        }

        if self.rank.set(Some(standing.rank)) {
            events.push(ChangeEvent::RankChanged(standing.rank));
        }
        if self.points.set(standing.points) {
            events.push(ChangeEvent::PointsChanged(standing.points));
        }

        if self.problem_results.len() != standing.problem_results.len() {
            self.problem_results = standing
                .problem_results
                .iter()
                .copied()
                .map(ChangeCell::changed)
                .collect();
        } else {
            for (cell, result) in self.problem_results.iter_mut().zip(&standing.problem_results) {
                cell.set(*result);
            }
        }

        for (index, cell) in self.problem_results.iter().enumerate() {
            if cell.is_changed() {
                events.push(ChangeEvent::ProblemResultChanged {
                    index,
                    problem: problem_names
                        .get(index)
                        .cloned()
                        .unwrap_or_else(|| index.to_string()),
                    result: *cell.get(),
                });
            }
        }
    }

    fn reset_standing(&mut self) {
        self.rank = ChangeCell::default();
        self.points = ChangeCell::default();
        self.problem_results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProblemStatus;

    fn result(points: f64, status: ProblemStatus) -> ProblemResult {
        ProblemResult {
            points,
            status,
            rejected_attempts: 0,
        }
    }

    fn snapshot(
        phase: ContestPhase,
        participation: Option<ParticipationType>,
        rank: u32,
        points: f64,
    ) -> ContestSnapshot {
        ContestSnapshot {
            contest_name: "Codeforces Round".to_string(),
            scoring: ScoringKind::Classic,
            phase,
            problem_names: vec!["A".to_string(), "B".to_string()],
            duration_seconds: 7200,
            start_time_seconds: Some(1_700_000_000),
            relative_time_seconds: Some(600),
            participant: participation.map(|participation| ParticipantStanding {
                participation,
                rank,
                points,
                problem_results: vec![
                    result(points, ProblemStatus::Preliminary),
                    result(0.0, ProblemStatus::Preliminary),
                ],
            }),
            system_test_percentage: None,
        }
    }

    fn kinds(events: &[ChangeEvent]) -> Vec<&'static str> {
        events.iter().map(ChangeEvent::kind).collect()
    }

    #[test]
    fn test_first_tick_reports_everything_in_order() {
        let mut detector = ChangeDetector::new();
        let events = detector.apply(&snapshot(
            ContestPhase::Coding,
            Some(ParticipationType::OutOfCompetition),
            40,
            500.0,
        ));

        assert_eq!(
            kinds(&events),
            vec![
                "problem_names",
                "contest_name",
                "phase",
                "remaining_time",
                "participation",
                "rank",
                "points",
                "problem_result",
                "problem_result",
            ]
        );
        assert_eq!(events[3], ChangeEvent::RemainingTimeChanged(6600));
    }

    #[test]
    fn test_identical_ticks_are_silent() {
        let mut detector = ChangeDetector::new();
        let tick = snapshot(ContestPhase::Coding, Some(ParticipationType::Contestant), 5, 200.0);

        assert!(!detector.apply(&tick).is_empty());
        // Second tick still carries the rank/points that were reset on becoming contestant
        assert!(!detector.apply(&tick).is_empty());
        for _ in 0..5 {
            assert!(detector.apply(&tick).is_empty());
        }
    }

    #[test]
    fn test_becoming_contestant_mid_loop() {
        let mut detector = ChangeDetector::new();
        detector.apply(&snapshot(ContestPhase::Coding, None, 0, 0.0));

        let events = detector.apply(&snapshot(
            ContestPhase::Coding,
            Some(ParticipationType::Contestant),
            5,
            200.0,
        ));
        assert_eq!(
            events,
            vec![ChangeEvent::ParticipationChanged(ParticipationType::Contestant)]
        );

        let events = detector.apply(&snapshot(
            ContestPhase::Coding,
            Some(ParticipationType::Contestant),
            5,
            250.0,
        ));
        assert!(events.contains(&ChangeEvent::PointsChanged(250.0)));
        assert!(events.contains(&ChangeEvent::RankChanged(5)));
        assert!(!events.iter().any(|e| matches!(e, ChangeEvent::ParticipationChanged(_))));
    }

    #[test]
    fn test_not_started_sets_phase_once() {
        let mut detector = ChangeDetector::new();
        assert_eq!(
            detector.apply_not_started(),
            vec![ChangeEvent::PhaseChanged(ContestPhase::Before)]
        );
        assert!(detector.apply_not_started().is_empty());
        assert_eq!(detector.phase(), ContestPhase::Before);
    }

    #[test]
    fn test_remaining_time_on_entering_coding() {
        let mut detector = ChangeDetector::new();
        let mut before = snapshot(ContestPhase::Before, None, 0, 0.0);
        before.relative_time_seconds = Some(-60);
        let events = detector.apply(&before);
        assert!(!kinds(&events).contains(&"remaining_time"));

        let mut coding = snapshot(ContestPhase::Coding, None, 0, 0.0);
        coding.relative_time_seconds = Some(5);
        let events = detector.apply(&coding);
        assert_eq!(
            kinds(&events),
            vec!["phase", "remaining_time"]
        );
        assert!(events.contains(&ChangeEvent::RemainingTimeChanged(7195)));
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let mut detector = ChangeDetector::new();
        let mut tick = snapshot(ContestPhase::Coding, None, 0, 0.0);
        tick.duration_seconds = i64::MAX;
        tick.relative_time_seconds = Some(-10);

        let events = detector.apply(&tick);
        assert!(events.contains(&ChangeEvent::RemainingTimeChanged(i64::MAX)));
    }

    #[test]
    fn test_single_problem_change() {
        let mut detector = ChangeDetector::new();
        let mut tick = snapshot(ContestPhase::SystemTest, Some(ParticipationType::OutOfCompetition), 3, 500.0);
        detector.apply(&tick);

        if let Some(participant) = tick.participant.as_mut() {
            participant.problem_results[0].status = ProblemStatus::Final;
        }
        let events = detector.apply(&tick);
        assert_eq!(
            events,
            vec![ChangeEvent::ProblemResultChanged {
                index: 0,
                problem: "A".to_string(),
                result: result(500.0, ProblemStatus::Final),
            }]
        );
    }

    #[test]
    fn test_sys_test_progress_only_when_fetched() {
        let mut detector = ChangeDetector::new();
        let mut tick = snapshot(ContestPhase::SystemTest, None, 0, 0.0);
        detector.apply(&tick);

        tick.system_test_percentage = Some(42);
        assert_eq!(
            detector.apply(&tick),
            vec![ChangeEvent::SysTestProgressChanged(42)]
        );

        tick.system_test_percentage = None;
        assert!(detector.apply(&tick).is_empty());

        tick.system_test_percentage = Some(42);
        assert!(detector.apply(&tick).is_empty());
    }
}
