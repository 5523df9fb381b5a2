use thiserror::Error;

use crate::ladder::LadderError;
use crate::model::{GameSettingsError, QuestionError, UnknownCategory};

/// Umbrella error for callers that do not care which domain check failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Ladder(#[from] LadderError),
    #[error(transparent)]
    Settings(#[from] GameSettingsError),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}
