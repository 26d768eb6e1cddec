//! Application-wide constants
//!
//! Default values for configuration and the fixed strings the Codeforces API
//! uses to signal conditions that are not real failures.

// =============================================================================
// API DEFAULTS
// =============================================================================

/// Default Codeforces base URL (API lives under `/api`)
pub const DEFAULT_API_BASE_URL: &str = "https://codeforces.com";

/// Default timeout for a single HTTP request in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 15;

// =============================================================================
// POLLING DEFAULTS
// =============================================================================

/// Delay between polls while the contest is in the coding phase
pub const DEFAULT_CODING_POLL_SECONDS: u64 = 3;

/// Delay between polls during system testing
pub const DEFAULT_SYSTEM_TEST_POLL_SECONDS: u64 = 5;

/// Delay between polls while waiting for system testing to start
pub const DEFAULT_PENDING_SYSTEM_TEST_POLL_SECONDS: u64 = 15;

/// Delay between polls before the contest or when the phase is unknown
pub const DEFAULT_IDLE_POLL_SECONDS: u64 = 30;

// =============================================================================
// RATING WAIT DEFAULTS
// =============================================================================

/// Escalation tiers: (waited at most this many minutes, poll delay in seconds)
pub const DEFAULT_RATING_WAIT_TIERS: [(u64, u64); 3] = [(60, 10), (120, 30), (240, 60)];

/// Hours after which the rating wait is abandoned
pub const DEFAULT_RATING_WAIT_GIVE_UP_HOURS: u64 = 4;

// =============================================================================
// API SIGNALS
// =============================================================================

/// Codeforces API comments that carry information rather than an error
pub mod api_comments {
    /// Prefix of the "contest has not started" comment; followed by the contest id
    pub const CONTEST_NOT_STARTED_PREFIX: &str = "contestId: Contest with id ";

    /// Suffix of the "contest has not started" comment
    pub const CONTEST_NOT_STARTED_SUFFIX: &str = " has not started";

    /// Rating changes will never be published for the contest
    pub const RATING_CHANGES_UNAVAILABLE: &str =
        "contestId: Rating changes are unavailable for this contest";
}

/// Submission testset that marks a full (system) test run
pub const FULL_TESTSET: &str = "TESTS";
