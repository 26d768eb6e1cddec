//! Fakes and builders shared by the monitor tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{
    ContestStandingsFetcher, Fetchers, RatingChangesFetcher, SubmissionsFetcher,
    SysTestProgressFetcher,
};
use crate::error::{FetchError, FetchResult};
use crate::models::{
    Contest, ContestPhase, Party, ParticipationType, Problem, ProblemResult, ProblemStatus,
    RatingChange, ScoringKind, StandingsData, StandingsRow, Submission, SubmissionAuthor,
    SubmissionProblem, Verdict,
};

use super::event::ChangeEvent;
use super::sink::EventListener;

type StandingsFn = dyn Fn(bool) -> FetchResult<StandingsData> + Send + Sync;
type SubmissionsFn = dyn Fn() -> FetchResult<Vec<Submission>> + Send + Sync;
type RatingsFn = dyn Fn() -> FetchResult<Vec<RatingChange>> + Send + Sync;
type ProgressFn = dyn Fn() -> FetchResult<Option<u8>> + Send + Sync;

struct FakeStandings(Box<StandingsFn>);
struct FakeSubmissions(Box<SubmissionsFn>);
struct FakeRatings(Box<RatingsFn>);
struct FakeProgress(Box<ProgressFn>);

#[async_trait]
impl ContestStandingsFetcher for FakeStandings {
    async fn fetch_standings(
        &self,
        _contest_id: u32,
        _handle: &str,
        include_unofficial: bool,
    ) -> FetchResult<StandingsData> {
        (self.0)(include_unofficial)
    }
}

#[async_trait]
impl SubmissionsFetcher for FakeSubmissions {
    async fn fetch_submissions(&self, _contest_id: u32, _handle: &str) -> FetchResult<Vec<Submission>> {
        (self.0)()
    }
}

#[async_trait]
impl RatingChangesFetcher for FakeRatings {
    async fn fetch_rating_changes(&self, _contest_id: u32) -> FetchResult<Vec<RatingChange>> {
        (self.0)()
    }
}

#[async_trait]
impl SysTestProgressFetcher for FakeProgress {
    async fn fetch_sys_test_progress(&self, _contest_id: u32) -> FetchResult<Option<u8>> {
        (self.0)()
    }
}

/// Builds [`Fetchers`] from closures; unset sources fail or return nothing
pub struct FakeFetchers {
    standings: Box<StandingsFn>,
    submissions: Box<SubmissionsFn>,
    ratings: Box<RatingsFn>,
    progress: Box<ProgressFn>,
}

impl FakeFetchers {
    pub fn new() -> Self {
        Self {
            standings: Box::new(|_| Err(FetchError::Api("no standings".to_string()))),
            submissions: Box::new(|| Ok(Vec::new())),
            ratings: Box::new(|| Err(FetchError::Api("no rating changes".to_string()))),
            progress: Box::new(|| Ok(None)),
        }
    }

    pub fn standings(
        mut self,
        f: impl Fn(bool) -> FetchResult<StandingsData> + Send + Sync + 'static,
    ) -> Self {
        self.standings = Box::new(f);
        self
    }

    pub fn submissions(
        mut self,
        f: impl Fn() -> FetchResult<Vec<Submission>> + Send + Sync + 'static,
    ) -> Self {
        self.submissions = Box::new(f);
        self
    }

    pub fn rating_changes(
        mut self,
        f: impl Fn() -> FetchResult<Vec<RatingChange>> + Send + Sync + 'static,
    ) -> Self {
        self.ratings = Box::new(f);
        self
    }

    pub fn sys_test_progress(
        mut self,
        f: impl Fn() -> FetchResult<Option<u8>> + Send + Sync + 'static,
    ) -> Self {
        self.progress = Box::new(f);
        self
    }

    pub fn build(self) -> Fetchers {
        Fetchers {
            standings: Arc::new(FakeStandings(self.standings)),
            submissions: Arc::new(FakeSubmissions(self.submissions)),
            rating_changes: Arc::new(FakeRatings(self.ratings)),
            sys_test_progress: Arc::new(FakeProgress(self.progress)),
        }
    }
}

/// Two-problem classic contest, with the handle's row if given
pub fn standings(phase: ContestPhase, row: Option<StandingsRow>) -> StandingsData {
    StandingsData {
        contest: Contest {
            id: 1234,
            name: "Codeforces Round 900 (Div. 2)".to_string(),
            scoring: ScoringKind::Classic,
            phase,
            duration_seconds: 7200,
            start_time_seconds: Some(1_700_000_000),
            relative_time_seconds: Some(1800),
        },
        problems: vec![
            Problem {
                index: "A".to_string(),
                name: "Two Arrays".to_string(),
            },
            Problem {
                index: "B".to_string(),
                name: "Tree Queries".to_string(),
            },
        ],
        rows: row.into_iter().collect(),
    }
}

/// Row where problem A holds all points and B is unsolved
pub fn row(participation: ParticipationType, rank: u32, points: f64) -> StandingsRow {
    StandingsRow {
        party: Party {
            participant_type: participation,
        },
        rank,
        points,
        problem_results: vec![
            ProblemResult {
                points,
                status: ProblemStatus::Final,
                rejected_attempts: 0,
            },
            ProblemResult {
                points: 0.0,
                status: ProblemStatus::Final,
                rejected_attempts: 1,
            },
        ],
    }
}

pub fn rating_change(handle: &str) -> RatingChange {
    RatingChange {
        contest_id: 1234,
        contest_name: "Codeforces Round 900 (Div. 2)".to_string(),
        handle: handle.to_string(),
        rank: 12,
        update_time_seconds: 1_700_010_000,
        old_rating: 1890,
        new_rating: 1942,
    }
}

/// Contest submission judged on the full testset
pub fn judged_submission(id: u64, index: &str, verdict: Verdict, passed_tests: u32) -> Submission {
    Submission {
        id,
        contest_id: Some(1234),
        problem: SubmissionProblem {
            contest_id: Some(1234),
            index: index.to_string(),
        },
        author: SubmissionAuthor {
            participant_type: ParticipationType::Contestant,
        },
        verdict: Some(verdict),
        testset: "TESTS".to_string(),
        passed_test_count: passed_tests,
    }
}

/// Listener recording each commit as one batch. Clones share the record.
#[derive(Clone, Default)]
pub struct Recorder {
    pending: Vec<ChangeEvent>,
    commits: Arc<Mutex<Vec<Vec<ChangeEvent>>>>,
}

impl Recorder {
    pub fn commits(&self) -> Vec<Vec<ChangeEvent>> {
        self.commits.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<ChangeEvent> {
        self.commits().into_iter().flatten().collect()
    }

    /// Live copies of this recorder, this one included
    pub fn listener_count(&self) -> usize {
        Arc::strong_count(&self.commits)
    }
}

impl EventListener for Recorder {
    fn on_event(&mut self, event: &ChangeEvent) {
        self.pending.push(event.clone());
    }

    fn on_commit(&mut self) {
        let batch = std::mem::take(&mut self.pending);
        self.commits.lock().unwrap().push(batch);
    }
}
