//! cfwatch - Live Codeforces contest monitor
//!
//! Watches one handle in one contest and reports what changes while the
//! contest runs: phase, remaining time, rank, points, per-problem results,
//! system-test verdicts and finally the rating change.
//!
//! # Architecture
//!
//! - **Api**: data sources behind traits, implemented over HTTP
//! - **Monitor**: the poll loop, change detection and scheduling
//! - **Listeners**: consumers of committed change events
//! - **Services**: lifecycle of running monitors

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod listeners;
pub mod models;
pub mod monitor;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use monitor::{ChangeEvent, ContestMonitor, EventListener, MonitorHandle, MonitorOutcome};
pub use services::MonitorRegistry;
