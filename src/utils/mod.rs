//! Utility functions

pub mod format;
pub mod time;

pub use format::{format_delta, format_points, problem_result_symbol};
pub use time::{deadline_after, format_countdown, now_utc};
