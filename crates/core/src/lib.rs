//! Domain model for the Catemino trivia game.
//!
//! Pure types and rules only: the question bank, the shuffle engine, the prize
//! ladder, rank tiers, leaderboard ordering and game settings. No I/O and no
//! scheduling live here.
#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod ladder;
pub mod model;
pub mod shuffle;
pub mod time;

pub use bank::QuestionBank;
pub use error::Error;
pub use ladder::{LadderError, PrizeLadder};
pub use time::Clock;
