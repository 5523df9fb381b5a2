//! Static catalogue of trivia questions, grouped by category.

mod catalogue;

use crate::model::{Category, CategoryKey, Question, QuestionError};

/// Compile-time question record; validated into a `Question` when the bank loads.
struct QuestionSeed {
    id: &'static str,
    question: &'static str,
    options: [&'static str; 4],
    answer: usize,
}

impl QuestionSeed {
    fn to_question(&self) -> Result<Question, QuestionError> {
        Question::new(
            self.id,
            self.question,
            self.options.iter().map(|o| (*o).to_owned()).collect(),
            self.answer,
        )
    }
}

/// Immutable set of categories. Sessions copy questions out of it; the bank
/// itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    categories: Vec<Category>,
}

impl QuestionBank {
    /// The three built-in categories of the Catemu trivia.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if a built-in record fails validation.
    pub fn builtin() -> Result<Self, QuestionError> {
        let build = |key, seeds: &[QuestionSeed]| -> Result<Category, QuestionError> {
            let questions = seeds
                .iter()
                .map(QuestionSeed::to_question)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Category::new(key, questions))
        };

        Ok(Self {
            categories: vec![
                build(CategoryKey::Cultura, catalogue::CULTURA)?,
                build(CategoryKey::Futbol, catalogue::FUTBOL)?,
                build(CategoryKey::Rodeo, catalogue::RODEO)?,
            ],
        })
    }

    /// Builds a bank from caller-provided categories. A later category with
    /// the same key replaces an earlier one.
    #[must_use]
    pub fn from_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut out: Vec<Category> = Vec::new();
        for category in categories {
            match out.iter_mut().find(|c| c.key() == category.key()) {
                Some(existing) => *existing = category,
                None => out.push(category),
            }
        }
        Self { categories: out }
    }

    /// Looks up a category by key.
    #[must_use]
    pub fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key() == key)
    }

    /// The category used when the player does not pick one.
    #[must_use]
    pub fn default_category(&self) -> Option<&Category> {
        self.category(CategoryKey::default())
            .or_else(|| self.categories.first())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}
