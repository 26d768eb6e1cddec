//! Error types
//!
//! Fetch failures never escape the monitor loop; they are classified here so
//! the loop can tell real failures from signals the API disguises as errors.

use crate::constants::api_comments;

/// Failure of a single request to the contest API
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The contest exists but has not started yet
    #[error("Contest has not started")]
    ContestNotStarted,

    /// The contest will never get rating changes (unrated contest)
    #[error("Rating changes are unavailable for this contest")]
    RatingChangesUnavailable,

    /// The API answered with `FAILED` and an unrecognized comment
    #[error("API error: {0}")]
    Api(String),

    /// Transport-level failure (connect, timeout, bad status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be understood
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ContestNotStarted => "CONTEST_NOT_STARTED",
            Self::RatingChangesUnavailable => "RATING_CHANGES_UNAVAILABLE",
            Self::Api(_) => "API_ERROR",
            Self::Http(_) => "HTTP_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
        }
    }

    /// Classify the comment of a `FAILED` API response
    pub fn from_api_comment(comment: &str, contest_id: u32) -> Self {
        let not_started = format!(
            "{}{}{}",
            api_comments::CONTEST_NOT_STARTED_PREFIX,
            contest_id,
            api_comments::CONTEST_NOT_STARTED_SUFFIX
        );

        if comment == not_started {
            Self::ContestNotStarted
        } else if comment == api_comments::RATING_CHANGES_UNAVAILABLE {
            Self::RatingChangesUnavailable
        } else {
            Self::Api(comment.to_string())
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
