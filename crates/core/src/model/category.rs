use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {raw}")]
pub struct UnknownCategory {
    pub raw: String,
}

/// The three challenges offered on the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    #[default]
    Cultura,
    Futbol,
    Rodeo,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 3] = [Self::Cultura, Self::Futbol, Self::Rodeo];

    /// Stable key, also used as the theme key by presentation layers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cultura => "cultura",
            Self::Futbol => "futbol",
            Self::Rodeo => "rodeo",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cultura => "Cultura General",
            Self::Futbol => "Fútbol Catemu",
            Self::Rodeo => "Tradición Rodeo",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cultura" => Ok(Self::Cultura),
            "futbol" | "fútbol" => Ok(Self::Futbol),
            "rodeo" => Ok(Self::Rodeo),
            _ => Err(UnknownCategory { raw: s.to_owned() }),
        }
    }
}

/// A named, ordered collection of questions.
///
/// A category may be empty; starting a game on it is what fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    key: CategoryKey,
    questions: Vec<Question>,
}

impl Category {
    #[must_use]
    pub fn new(key: CategoryKey, questions: Vec<Question>) -> Self {
        Self { key, questions }
    }

    #[must_use]
    pub fn key(&self) -> CategoryKey {
        self.key
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
