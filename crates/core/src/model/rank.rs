use serde::{Deserialize, Serialize};

/// Mastery tier reached by a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Novato,
    Conocedor,
    Maestro,
    Leyenda,
}

impl Rank {
    pub const ALL: [Rank; 4] = [Self::Novato, Self::Conocedor, Self::Maestro, Self::Leyenda];

    /// Minimum score for this tier.
    #[must_use]
    pub fn threshold(self) -> u64 {
        match self {
            Self::Novato => 0,
            Self::Conocedor => 10_000,
            Self::Maestro => 50_000,
            Self::Leyenda => 150_000,
        }
    }

    #[must_use]
    pub fn for_score(score: u64) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|rank| score >= rank.threshold())
            .unwrap_or(Self::Novato)
    }

    /// Short label used on the menu.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Novato => "Novato",
            Self::Conocedor => "Conocedor",
            Self::Maestro => "Maestro",
            Self::Leyenda => "Leyenda",
        }
    }

    /// Title shown on the game-over card.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Novato => "Visitante Novato",
            Self::Conocedor => "Conocedor Local",
            Self::Maestro => "Maestro del Valle",
            Self::Leyenda => "Leyenda Catemina",
        }
    }

    /// The tier above this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Novato => Some(Self::Conocedor),
            Self::Conocedor => Some(Self::Maestro),
            Self::Maestro => Some(Self::Leyenda),
            Self::Leyenda => None,
        }
    }
}
