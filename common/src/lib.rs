pub mod catalog;
pub mod langs;
pub mod sql_enums;
pub mod urls;

pub use catalog::{Challenge, get_challenge};
pub use sql_enums::{ChallengeDifficulty, ChallengeProgress, RecordedProgress};
