use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameSettingsError {
    #[error("seconds per question must be between 5 and 120")]
    InvalidSecondsPerQuestion,

    #[error("reveal delay must be between 100 and 10000 ms")]
    InvalidRevealDelay,

    #[error("warning window must be shorter than the question budget")]
    InvalidWarningWindow,
}

/// Timing knobs for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    seconds_per_question: u32,
    reveal_delay_ms: u32,
    warning_secs: u32,
}

impl Default for GameSettings {
    /// 15 seconds per question, a 1.2 s reveal and a 5 s countdown warning.
    fn default() -> Self {
        Self {
            seconds_per_question: 15,
            reveal_delay_ms: 1_200,
            warning_secs: 5,
        }
    }
}

impl GameSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `GameSettingsError` if any value is outside its allowed range.
    pub fn new(
        seconds_per_question: u32,
        reveal_delay_ms: u32,
        warning_secs: u32,
    ) -> Result<Self, GameSettingsError> {
        if !(5..=120).contains(&seconds_per_question) {
            return Err(GameSettingsError::InvalidSecondsPerQuestion);
        }
        if !(100..=10_000).contains(&reveal_delay_ms) {
            return Err(GameSettingsError::InvalidRevealDelay);
        }
        if warning_secs >= seconds_per_question {
            return Err(GameSettingsError::InvalidWarningWindow);
        }

        Ok(Self {
            seconds_per_question,
            reveal_delay_ms,
            warning_secs,
        })
    }

    /// Same settings with a different per-question budget; the warning window
    /// shrinks if it would no longer fit.
    ///
    /// # Errors
    ///
    /// Returns `GameSettingsError::InvalidSecondsPerQuestion` when out of range.
    pub fn with_seconds_per_question(self, seconds: u32) -> Result<Self, GameSettingsError> {
        let warning = self.warning_secs.min(seconds.saturating_sub(1));
        Self::new(seconds, self.reveal_delay_ms, warning)
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.reveal_delay_ms))
    }

    /// Seconds at or below which each tick is flagged as a countdown warning.
    #[must_use]
    pub fn warning_secs(&self) -> u32 {
        self.warning_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_game() {
        let settings = GameSettings::default();
        assert_eq!(settings.seconds_per_question(), 15);
        assert_eq!(settings.reveal_delay(), Duration::from_millis(1_200));
        assert_eq!(settings.warning_secs(), 5);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(
            GameSettings::new(4, 1_200, 2).unwrap_err(),
            GameSettingsError::InvalidSecondsPerQuestion
        );
        assert_eq!(
            GameSettings::new(15, 50, 5).unwrap_err(),
            GameSettingsError::InvalidRevealDelay
        );
        assert_eq!(
            GameSettings::new(15, 1_200, 15).unwrap_err(),
            GameSettingsError::InvalidWarningWindow
        );
    }

    #[test]
    fn changing_budget_keeps_warning_valid() {
        let settings = GameSettings::default().with_seconds_per_question(5).unwrap();
        assert_eq!(settings.seconds_per_question(), 5);
        assert_eq!(settings.warning_secs(), 4);
    }
}
