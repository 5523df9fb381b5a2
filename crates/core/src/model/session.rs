use serde::{Deserialize, Serialize};

use crate::model::rank::Rank;

/// Lifecycle position of a game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session yet, or the previous one was abandoned.
    #[default]
    Idle,
    /// Timer running, waiting for the player.
    Asking,
    /// An option was chosen; the reveal delay is running and the timer is frozen.
    Resolving,
    /// Terminal. Carries an `Outcome`.
    Finished,
}

impl Phase {
    /// Phases from which a new session may start.
    #[must_use]
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Finished)
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Asking | Self::Resolving)
    }
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    LostWrongAnswer,
    LostTimeout,
}

impl Outcome {
    #[must_use]
    pub fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }

    /// Closing line shown on the game-over card.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Won => "Has demostrado ser un conocedor absoluto.",
            Self::LostTimeout => "El tiempo fue más rápido que tú.",
            Self::LostWrongAnswer => "Una decisión equivocada ha terminado el juego.",
        }
    }
}

/// Final result of a session, as shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub outcome: Outcome,
    pub score: u64,
}

impl GameResult {
    #[must_use]
    pub fn new(outcome: Outcome, score: u64) -> Self {
        Self { outcome, score }
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        Rank::for_score(self.score)
    }

    #[must_use]
    pub fn headline(&self) -> &'static str {
        if self.outcome.is_win() {
            "¡Leyenda de Catemu!"
        } else {
            "Fin del Camino"
        }
    }

    /// Message used when the player shares the result.
    #[must_use]
    pub fn share_text(&self) -> String {
        let score = group_thousands(self.score);
        if self.outcome.is_win() {
            format!("¡Soy una leyenda de Catemu! Logré el máximo puntaje: {score} PTS. ¿Puedes superarme?")
        } else {
            format!("¡Acabo de obtener {score} PTS en la Trivia Catemina!")
        }
    }
}

/// Formats a score with `.` thousands separators (es-CL style).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_and_finished_can_start() {
        assert!(Phase::Idle.can_start());
        assert!(Phase::Finished.can_start());
        assert!(!Phase::Asking.can_start());
        assert!(!Phase::Resolving.can_start());
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(1_000_000), "1.000.000");
    }

    #[test]
    fn share_text_depends_on_outcome() {
        let won = GameResult::new(Outcome::Won, 1_000_000);
        assert!(won.share_text().contains("1.000.000 PTS"));
        assert!(won.share_text().starts_with("¡Soy una leyenda"));

        let lost = GameResult::new(Outcome::LostTimeout, 3_000);
        assert_eq!(lost.share_text(), "¡Acabo de obtener 3.000 PTS en la Trivia Catemina!");
        assert_eq!(lost.headline(), "Fin del Camino");
    }
}
