//! Contest data sources
//!
//! The monitor only talks to these traits. [`CodeforcesClient`] implements
//! all of them over HTTP; tests substitute fakes.

pub mod codeforces;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::models::{RatingChange, StandingsData, Submission};

pub use codeforces::CodeforcesClient;

/// Standings of one handle in one contest
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestStandingsFetcher: Send + Sync {
    async fn fetch_standings(
        &self,
        contest_id: u32,
        handle: &str,
        include_unofficial: bool,
    ) -> FetchResult<StandingsData>;
}

/// Submissions of one handle in one contest
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionsFetcher: Send + Sync {
    async fn fetch_submissions(&self, contest_id: u32, handle: &str) -> FetchResult<Vec<Submission>>;
}

/// Published rating changes of a contest
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingChangesFetcher: Send + Sync {
    async fn fetch_rating_changes(&self, contest_id: u32) -> FetchResult<Vec<RatingChange>>;
}

/// System testing progress in percent, when the contest page shows one
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SysTestProgressFetcher: Send + Sync {
    async fn fetch_sys_test_progress(&self, contest_id: u32) -> FetchResult<Option<u8>>;
}

/// The set of collaborators one monitor needs
#[derive(Clone)]
pub struct Fetchers {
    pub standings: Arc<dyn ContestStandingsFetcher>,
    pub submissions: Arc<dyn SubmissionsFetcher>,
    pub rating_changes: Arc<dyn RatingChangesFetcher>,
    pub sys_test_progress: Arc<dyn SysTestProgressFetcher>,
}

impl Fetchers {
    /// Use one client for every data source
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: ContestStandingsFetcher
            + SubmissionsFetcher
            + RatingChangesFetcher
            + SysTestProgressFetcher
            + 'static,
    {
        Self {
            standings: client.clone(),
            submissions: client.clone(),
            rating_changes: client.clone(),
            sys_test_progress: client,
        }
    }
}

impl std::fmt::Debug for Fetchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetchers").finish_non_exhaustive()
    }
}
