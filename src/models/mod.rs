//! Domain models
//!
//! Contest data as the Codeforces API reports it. All types deserialize
//! straight from the API payloads.

pub mod contest;
pub mod rating;
pub mod standings;
pub mod submission;

pub use contest::*;
pub use rating::*;
pub use standings::*;
pub use submission::*;
