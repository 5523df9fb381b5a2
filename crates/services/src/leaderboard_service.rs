use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use catemino_core::Clock;
use catemino_core::model::{Leaderboard, LeaderboardEntry};
use storage::repository::{KeyValueStore, StorageError};

use crate::error::LeaderboardError;

/// Storage key of the serialized top-10 list.
pub const LEADERBOARD_KEY: &str = "catemu_leaderboard";

/// Outcome of a successful leaderboard write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedScore {
    /// 0-based position of the new entry, `None` if it did not make the cut.
    pub position: Option<usize>,
    pub board: Leaderboard,
}

/// Local top-10 board persisted as one JSON blob.
#[derive(Clone)]
pub struct LeaderboardService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, store }
    }

    /// Current board, best first.
    ///
    /// Never fails: an unreadable store or a malformed blob yields an empty
    /// board.
    pub async fn load(&self) -> Leaderboard {
        match self.read().await {
            Ok(board) => board,
            Err(err) => {
                warn!(error = %err, "leaderboard unavailable, showing empty board");
                Leaderboard::new()
            }
        }
    }

    /// Inserts `entry`, keeps the best ten and persists the result. A score
    /// that cannot make the board leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` if the store cannot be read or written, or
    /// the board cannot be encoded. A malformed stored blob is not an error;
    /// it is replaced.
    pub async fn record(&self, entry: LeaderboardEntry) -> Result<RecordedScore, LeaderboardError> {
        let mut board = self.read().await?;
        let score = entry.score;
        if !board.qualifies(score) {
            debug!(score, "score does not make the board");
            return Ok(RecordedScore { position: None, board });
        }
        let position = board.insert(entry);

        let blob = serde_json::to_vec(board.entries())?;
        self.store.set(LEADERBOARD_KEY, &blob).await?;

        info!(score, ?position, entries = board.len(), "leaderboard updated");
        Ok(RecordedScore { position, board })
    }

    /// Records a finished game for `player`, or an anonymous traveler name.
    ///
    /// Zero scores are not recorded and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `LeaderboardError` when persistence fails.
    pub async fn record_score(
        &self,
        score: u64,
        player: Option<&str>,
    ) -> Result<Option<RecordedScore>, LeaderboardError> {
        if score == 0 {
            debug!("zero score not recorded");
            return Ok(None);
        }
        let entry = LeaderboardEntry::new(display_name(player), score, self.clock.now());
        self.record(entry).await.map(Some)
    }

    async fn read(&self) -> Result<Leaderboard, StorageError> {
        let Some(blob) = self.store.get(LEADERBOARD_KEY).await? else {
            return Ok(Leaderboard::new());
        };
        match serde_json::from_slice::<Vec<LeaderboardEntry>>(&blob) {
            Ok(entries) => Ok(Leaderboard::from_entries(entries)),
            Err(err) => {
                warn!(error = %err, "discarding malformed leaderboard blob");
                Ok(Leaderboard::new())
            }
        }
    }
}

/// Trimmed player name, or `Viajero_<n>` when none was given.
fn display_name(player: Option<&str>) -> String {
    match player.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_owned(),
        None => LeaderboardEntry::traveler_name(rand::rng().random_range(0..1000)),
    }
}
