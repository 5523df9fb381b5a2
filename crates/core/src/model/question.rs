use serde::Serialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Upper bound on answer options; the board shows them as A-D.
pub const MAX_OPTIONS: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("question must have at least one option")]
    NoOptions,

    #[error("question has {len} options, at most {MAX_OPTIONS} are allowed")]
    TooManyOptions { len: usize },

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("answer index {answer} is out of range for {len} options")]
    AnswerOutOfRange { answer: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice trivia question.
///
/// `answer` always indexes into `options`; every constructor enforces it and
/// nothing mutates a question after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    question: String,
    options: Vec<String>,
    answer: usize,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is empty, the option list is
    /// empty, too long or contains a blank entry, or `answer` is out of range.
    pub fn new(
        id: impl Into<QuestionId>,
        question: impl Into<String>,
        options: Vec<String>,
        answer: usize,
    ) -> Result<Self, QuestionError> {
        let id = id.into();
        let question = question.into();

        if id.is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if options.len() > MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions { len: options.len() });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::BlankOption { index });
        }
        if answer >= options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                answer,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            question,
            options,
            answer,
        })
    }

    /// Rebuilds this question with its options in a new order.
    ///
    /// Only the shuffle engine calls this; the caller guarantees `options` is a
    /// permutation of the current list and `answer` points at the same text.
    pub(crate) fn reordered(&self, options: Vec<String>, answer: usize) -> Self {
        debug_assert_eq!(options.len(), self.options.len());
        debug_assert_eq!(options.get(answer).map(String::as_str), self.correct_option());
        Self {
            id: self.id.clone(),
            question: self.question.clone(),
            options,
            answer,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> usize {
        self.answer
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer).map(String::as_str)
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.answer
    }

    /// Indices of every option except the correct one, in board order.
    #[must_use]
    pub fn incorrect_indices(&self) -> Vec<usize> {
        (0..self.options.len()).filter(|&i| i != self.answer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn accepts_well_formed_question() {
        let q = Question::new("q1", "Capital?", opts(&["A", "B", "C", "D"]), 2).unwrap();
        assert_eq!(q.correct_option(), Some("C"));
        assert_eq!(q.incorrect_indices(), vec![0, 1, 3]);
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn rejects_answer_out_of_range() {
        let err = Question::new("q1", "Capital?", opts(&["A", "B"]), 2).unwrap_err();
        assert_eq!(err, QuestionError::AnswerOutOfRange { answer: 2, len: 2 });
    }

    #[test]
    fn rejects_structural_problems() {
        assert_eq!(
            Question::new("", "Q", opts(&["A"]), 0).unwrap_err(),
            QuestionError::EmptyId
        );
        assert_eq!(
            Question::new("q", "  ", opts(&["A"]), 0).unwrap_err(),
            QuestionError::EmptyPrompt
        );
        assert_eq!(
            Question::new("q", "Q", Vec::new(), 0).unwrap_err(),
            QuestionError::NoOptions
        );
        assert_eq!(
            Question::new("q", "Q", opts(&["A", "B", "C", "D", "E"]), 0).unwrap_err(),
            QuestionError::TooManyOptions { len: 5 }
        );
        assert_eq!(
            Question::new("q", "Q", opts(&["A", " "]), 0).unwrap_err(),
            QuestionError::BlankOption { index: 1 }
        );
    }
}
