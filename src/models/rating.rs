//! Rating change model

use serde::{Deserialize, Serialize};

/// Entry of `contest.ratingChanges`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: u32,
    #[serde(default)]
    pub contest_name: String,
    pub handle: String,
    pub rank: u32,
    #[serde(rename = "ratingUpdateTimeSeconds")]
    pub update_time_seconds: i64,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChange {
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}
