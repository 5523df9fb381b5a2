use serde::Serialize;

use catemino_core::model::{
    CategoryKey, GameResult, Outcome, Phase, QuestionId, Rank, SessionId,
};

/// Player-facing view of the current question. Never includes the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
}

/// Read-only copy of session state, rebuilt after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub session: Option<SessionId>,
    pub phase: Phase,
    pub category: Option<CategoryKey>,
    pub current_question_index: usize,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
    pub score: u64,
    /// Prize at stake on the current question.
    pub current_prize: u64,
    pub time_remaining: u32,
    pub hidden_options: Vec<usize>,
    pub lifeline_available: bool,
    pub selected_option: Option<usize>,
    /// Correct option, only once an answer is being revealed or the game ended.
    pub revealed_answer: Option<usize>,
    pub outcome: Option<Outcome>,
    pub rank: Rank,
}

impl SessionSnapshot {
    /// Snapshot for the menu, before any session exists.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            session: None,
            phase: Phase::Idle,
            category: None,
            current_question_index: 0,
            total_questions: 0,
            question: None,
            score: 0,
            current_prize: 0,
            time_remaining: 0,
            hidden_options: Vec::new(),
            lifeline_available: false,
            selected_option: None,
            revealed_answer: None,
            outcome: None,
            rank: Rank::Novato,
        }
    }

    /// 1-based question number for "Pregunta n / total".
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.current_question_index + 1
    }

    #[must_use]
    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden_options.contains(&index)
    }

    /// Whether the board currently accepts a click on `index`.
    #[must_use]
    pub fn can_select(&self, index: usize) -> bool {
        self.phase == Phase::Asking
            && !self.is_hidden(index)
            && self
                .question
                .as_ref()
                .is_some_and(|q| index < q.options.len())
    }

    #[must_use]
    pub fn can_use_lifeline(&self) -> bool {
        self.phase == Phase::Asking && self.lifeline_available
    }

    /// Final result, once the session has finished.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.outcome.map(|outcome| GameResult::new(outcome, self.score))
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
