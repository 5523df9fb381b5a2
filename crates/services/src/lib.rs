#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod leaderboard_service;
pub mod sessions;

pub use catemino_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, LeaderboardError, SessionError};
pub use leaderboard_service::{LEADERBOARD_KEY, LeaderboardService, RecordedScore};

pub use sessions::{
    DriverHandle, GameDriver, GameEvent, GameObserver, GameService, PendingResolution,
    QuestionView, QuizMachine, SessionSnapshot, SoundCue,
};
