//! Time utilities

use chrono::{DateTime, TimeDelta, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Moment `seconds` from now, `None` when it is out of the representable range
pub fn deadline_after(seconds: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(seconds.max(0)).and_then(|delta| now_utc().checked_add_signed(delta))
}

/// Countdown clock: `H:MM:SS` from one hour up, `MM:SS` below
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}
