//! Codeforces HTTP client
//!
//! Wraps the public JSON API (`/api/{method}`) and the contest page, from
//! which the system-testing percentage is scraped.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{FetchError, FetchResult};
use crate::models::{RatingChange, StandingsData, Submission};

use super::{ContestStandingsFetcher, RatingChangesFetcher, SubmissionsFetcher, SysTestProgressFetcher};

static SYS_TEST_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="contest-state-regular">\s*(\d{1,3})\s*%\s*</"#)
        .expect("valid progress regex")
});

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
enum ApiStatus {
    Ok,
    Failed,
}

/// Response envelope shared by every API method
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: ApiStatus,
    comment: Option<String>,
    result: Option<T>,
}

/// Client for the Codeforces API
#[derive(Debug, Clone)]
pub struct CodeforcesClient {
    client: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new(config: &ApiConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("cfwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the contest page, for "open in browser" actions
    pub fn contest_url(&self, contest_id: u32) -> String {
        format!("{}/contest/{}", self.base_url, contest_id)
    }

    fn api_request(&self, method: &str, query: &[(&str, String)]) -> FetchResult<reqwest::Request> {
        Ok(self
            .client
            .get(format!("{}/api/{}", self.base_url, method))
            .query(query)
            .build()?)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
        contest_id: u32,
    ) -> FetchResult<T> {
        let request = self.api_request(method, query)?;
        tracing::debug!("GET {}", request.url());

        // FAILED responses come with a 400 status but still carry the JSON envelope
        let body = self.client.execute(request).await?.text().await?;
        decode_envelope(&body, contest_id)
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str, contest_id: u32) -> FetchResult<T> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    match envelope.status {
        ApiStatus::Ok => envelope
            .result
            .ok_or_else(|| FetchError::Parse("OK response without result".to_string())),
        ApiStatus::Failed => Err(FetchError::from_api_comment(
            envelope.comment.as_deref().unwrap_or_default(),
            contest_id,
        )),
    }
}

/// Extract the `NN%` shown on the contest page while system tests run
fn parse_sys_test_progress(page: &str) -> Option<u8> {
    SYS_TEST_PROGRESS
        .captures(page)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .map(|percent| percent.min(100))
}

#[async_trait]
impl ContestStandingsFetcher for CodeforcesClient {
    async fn fetch_standings(
        &self,
        contest_id: u32,
        handle: &str,
        include_unofficial: bool,
    ) -> FetchResult<StandingsData> {
        self.call(
            "contest.standings",
            &[
                ("contestId", contest_id.to_string()),
                ("handles", handle.to_string()),
                ("showUnofficial", include_unofficial.to_string()),
            ],
            contest_id,
        )
        .await
    }
}

#[async_trait]
impl SubmissionsFetcher for CodeforcesClient {
    async fn fetch_submissions(&self, contest_id: u32, handle: &str) -> FetchResult<Vec<Submission>> {
        self.call(
            "contest.status",
            &[("contestId", contest_id.to_string()), ("handle", handle.to_string())],
            contest_id,
        )
        .await
    }
}

#[async_trait]
impl RatingChangesFetcher for CodeforcesClient {
    async fn fetch_rating_changes(&self, contest_id: u32) -> FetchResult<Vec<RatingChange>> {
        self.call(
            "contest.ratingChanges",
            &[("contestId", contest_id.to_string())],
            contest_id,
        )
        .await
    }
}

#[async_trait]
impl SysTestProgressFetcher for CodeforcesClient {
    async fn fetch_sys_test_progress(&self, contest_id: u32) -> FetchResult<Option<u8>> {
        let url = format!("{}?locale=en", self.contest_url(contest_id));
        let page = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_sys_test_progress(&page))
    }
}
