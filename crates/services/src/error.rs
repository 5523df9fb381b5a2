//! Shared error types for the services crate.

use thiserror::Error;

use catemino_core::model::{CategoryKey, QuestionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the session state machine and its drivers.
///
/// Rejected intents are not errors; they come back as an empty event list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("category {category} has no questions")]
    EmptyCategory { category: CategoryKey },
    #[error("category {category} is not in the question bank")]
    UnknownCategory { category: CategoryKey },
    #[error("question bank has no categories")]
    EmptyBank,
    #[error("question {index} is past the end of a {total}-question session")]
    QuestionsExhausted { index: usize, total: usize },
    #[error("game driver has stopped")]
    DriverStopped,
}

/// Errors emitted by `LeaderboardService` writes. Reads never fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}
