//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the monitor runs.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CODING_POLL_SECONDS, DEFAULT_IDLE_POLL_SECONDS,
    DEFAULT_PENDING_SYSTEM_TEST_POLL_SECONDS, DEFAULT_RATING_WAIT_GIVE_UP_HOURS,
    DEFAULT_RATING_WAIT_TIERS, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SYSTEM_TEST_POLL_SECONDS,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub watch: WatchConfig,
    pub api: ApiConfig,
    pub schedule: ScheduleConfig,
    pub rust_log: String,
}

/// Which participation to watch
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub handle: String,
    pub contest_id: u32,
}

/// Codeforces API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Poll cadence of the monitor loop
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    pub coding: Duration,
    pub system_test: Duration,
    pub pending_system_test: Duration,
    /// Used before the contest and whenever the phase is unknown
    pub idle: Duration,
    /// Ascending `(waited at most, poll delay)` pairs for the rating wait
    pub rating_wait_tiers: Vec<(Duration, Duration)>,
    /// Waiting longer than this abandons the rating wait
    pub rating_wait_give_up: Duration,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            coding: Duration::from_secs(DEFAULT_CODING_POLL_SECONDS),
            system_test: Duration::from_secs(DEFAULT_SYSTEM_TEST_POLL_SECONDS),
            pending_system_test: Duration::from_secs(DEFAULT_PENDING_SYSTEM_TEST_POLL_SECONDS),
            idle: Duration::from_secs(DEFAULT_IDLE_POLL_SECONDS),
            rating_wait_tiers: DEFAULT_RATING_WAIT_TIERS
                .iter()
                .map(|&(minutes, delay)| {
                    (Duration::from_secs(minutes * 60), Duration::from_secs(delay))
                })
                .collect(),
            rating_wait_give_up: Duration::from_secs(DEFAULT_RATING_WAIT_GIVE_UP_HOURS * 3600),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            watch: WatchConfig::from_env()?,
            api: ApiConfig::from_env()?,
            schedule: ScheduleConfig::from_env()?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "cfwatch=info".to_string()),
        })
    }
}

impl WatchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let handle =
            env::var("CF_HANDLE").map_err(|_| ConfigError::Missing("CF_HANDLE".to_string()))?;
        if handle.trim().is_empty() {
            return Err(ConfigError::InvalidValue("CF_HANDLE".to_string()));
        }

        Ok(Self {
            handle,
            contest_id: env::var("CF_CONTEST_ID")
                .map_err(|_| ConfigError::Missing("CF_CONTEST_ID".to_string()))?
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CF_CONTEST_ID".to_string()))?,
        })
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env::var("CF_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            request_timeout: Duration::from_secs(parse_or(
                "CF_REQUEST_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            )?),
        })
    }
}

impl ScheduleConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            coding: Duration::from_secs(parse_or("CODING_POLL_SECONDS", DEFAULT_CODING_POLL_SECONDS)?),
            system_test: Duration::from_secs(parse_or(
                "SYSTEM_TEST_POLL_SECONDS",
                DEFAULT_SYSTEM_TEST_POLL_SECONDS,
            )?),
            pending_system_test: Duration::from_secs(parse_or(
                "PENDING_SYSTEM_TEST_POLL_SECONDS",
                DEFAULT_PENDING_SYSTEM_TEST_POLL_SECONDS,
            )?),
            idle: Duration::from_secs(parse_or("IDLE_POLL_SECONDS", DEFAULT_IDLE_POLL_SECONDS)?),
            rating_wait_tiers: defaults.rating_wait_tiers,
            rating_wait_give_up: Duration::from_secs(
                parse_or("RATING_WAIT_GIVE_UP_HOURS", DEFAULT_RATING_WAIT_GIVE_UP_HOURS)? * 3600,
            ),
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
