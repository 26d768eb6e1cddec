//! Displayable state of a monitored participation
//!
//! [`MonitorView`] folds change events back into a full picture of the
//! contest; [`LiveView`] publishes it to any number of readers after each
//! commit.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::models::{ContestPhase, ParticipationType, ProblemResult, RatingChange, ScoringKind};
use crate::monitor::{ChangeEvent, EventListener};
use crate::utils::{deadline_after, problem_result_symbol};

/// Phase-specific details
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PhaseState {
    /// `ends_at` is known once the remaining time was reported
    Coding { ends_at: Option<DateTime<Utc>> },
    SystemTesting { percentage: Option<u8> },
    #[default]
    Other,
}

/// One column of the handle's standings row
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemView {
    pub name: String,
    pub result: Option<ProblemResult>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonitorView {
    pub contest_name: String,
    pub scoring: ScoringKind,
    pub phase: ContestPhase,
    pub phase_state: PhaseState,
    pub participation: ParticipationType,
    pub rank: Option<u32>,
    pub points: f64,
    pub problems: Vec<ProblemView>,
    pub rating_change: Option<RatingChange>,
}

impl MonitorView {
    /// Fold one event into the view
    pub fn apply(&mut self, event: &ChangeEvent) {
        match event {
            ChangeEvent::ProblemNamesChanged(names) => {
                self.problems = names
                    .iter()
                    .map(|name| ProblemView {
                        name: name.clone(),
                        result: None,
                    })
                    .collect();
            }
            ChangeEvent::ContestNameChanged { name, scoring } => {
                self.contest_name = name.clone();
                self.scoring = *scoring;
            }
            ChangeEvent::PhaseChanged(phase) => {
                self.phase = *phase;
                self.phase_state = match phase {
                    ContestPhase::Coding => PhaseState::Coding { ends_at: None },
                    ContestPhase::SystemTest => PhaseState::SystemTesting { percentage: None },
                    _ => PhaseState::Other,
                };
            }
            ChangeEvent::RemainingTimeChanged(seconds) => {
                if self.phase == ContestPhase::Coding {
                    self.phase_state = PhaseState::Coding {
                        ends_at: deadline_after(*seconds),
                    };
                }
            }
            ChangeEvent::SysTestProgressChanged(percentage) => {
                if self.phase == ContestPhase::SystemTest {
                    self.phase_state = PhaseState::SystemTesting {
                        percentage: Some(*percentage),
                    };
                }
            }
            ChangeEvent::ParticipationChanged(participation) => {
                self.participation = *participation;
                if participation.is_contestant() {
                    self.rank = None;
                    self.points = 0.0;
                    self.problems.iter_mut().for_each(|p| p.result = None);
                }
            }
            ChangeEvent::RankChanged(rank) => self.rank = Some(*rank),
            ChangeEvent::PointsChanged(points) => self.points = *points,
            ChangeEvent::ProblemResultChanged { index, problem, result } => {
                if *index >= self.problems.len() {
                    self.problems.resize_with(index + 1, || ProblemView {
                        name: String::new(),
                        result: None,
                    });
                }
                let slot = &mut self.problems[*index];
                slot.name = problem.clone();
                slot.result = Some(*result);
            }
            ChangeEvent::SystemTestResultForSubmission { .. } => {}
            ChangeEvent::RatingChanged(change) => self.rating_change = Some(change.clone()),
        }
    }

    pub fn has_row(&self) -> bool {
        self.participation != ParticipationType::NotParticipated
    }

    /// `(problem, symbol)` for every problem with a non-empty symbol
    pub fn problem_symbols(&self) -> Vec<(&str, String)> {
        self.problems
            .iter()
            .filter_map(|p| {
                let symbol = problem_result_symbol(p.result.as_ref()?, self.scoring, self.phase);
                (!symbol.is_empty()).then_some((p.name.as_str(), symbol))
            })
            .collect()
    }
}

/// Listener keeping a [`MonitorView`] and publishing it on every commit
pub struct LiveView {
    view: MonitorView,
    tx: watch::Sender<MonitorView>,
}

impl LiveView {
    /// Listener plus the receiver readers subscribe from
    pub fn new() -> (Self, watch::Receiver<MonitorView>) {
        let (tx, rx) = watch::channel(MonitorView::default());
        (
            Self {
                view: MonitorView::default(),
                tx,
            },
            rx,
        )
    }
}

impl EventListener for LiveView {
    fn on_event(&mut self, event: &ChangeEvent) {
        self.view.apply(event);
    }

    fn on_commit(&mut self) {
        // No receivers left is fine, the view keeps tracking
        self.tx.send_replace(self.view.clone());
    }
}
