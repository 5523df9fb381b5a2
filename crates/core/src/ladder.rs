use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LadderError {
    #[error("prize ladder must have at least one rung")]
    Empty,

    #[error("prize ladder must be strictly increasing (rung {index})")]
    NotIncreasing { index: usize },
}

const STANDARD_RUNGS: [u64; 15] = [
    1_000, 2_000, 3_000, 5_000, 10_000, 15_000, 25_000, 40_000, 60_000, 100_000, 150_000,
    250_000, 400_000, 600_000, 1_000_000,
];

/// Prize value for each question position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeLadder {
    rungs: Vec<u64>,
}

impl Default for PrizeLadder {
    fn default() -> Self {
        Self::standard()
    }
}

impl PrizeLadder {
    /// The fifteen-rung ladder from 1,000 to 1,000,000.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rungs: STANDARD_RUNGS.to_vec(),
        }
    }

    /// # Errors
    ///
    /// Returns `LadderError` if `rungs` is empty or not strictly increasing.
    pub fn new(rungs: Vec<u64>) -> Result<Self, LadderError> {
        if rungs.is_empty() {
            return Err(LadderError::Empty);
        }
        if let Some(index) = rungs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(LadderError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { rungs })
    }

    /// Prize for answering the question at `index` correctly.
    ///
    /// Positions past the top of the ladder pay the first rung, so question
    /// sets longer than the ladder still score.
    #[must_use]
    pub fn prize_for(&self, index: usize) -> u64 {
        self.rungs
            .get(index)
            .or_else(|| self.rungs.first())
            .copied()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn rungs(&self) -> &[u64] {
        &self.rungs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rungs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rungs.is_empty()
    }
}
