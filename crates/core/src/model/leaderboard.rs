use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of results kept on the local board.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// One finished game on the local board.
///
/// Field names on the wire match the blob the web build stored, so existing
/// boards keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "userName")]
    pub display_name: String,
    pub score: u64,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(display_name: impl Into<String>, score: u64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            display_name: display_name.into(),
            score,
            recorded_at,
        }
    }

    /// Anonymous player name, `Viajero_<n>`.
    #[must_use]
    pub fn traveler_name(n: u16) -> String {
        format!("Viajero_{}", n % 1000)
    }
}

/// Top results, best first, never longer than `LEADERBOARD_CAPACITY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalises a loaded collection: sorted by score descending and truncated.
    #[must_use]
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        sort_and_truncate(&mut entries);
        Self { entries }
    }

    /// Appends `entry`, re-sorts and truncates.
    ///
    /// Returns the 0-based position of the new entry, or `None` if it fell off
    /// the board. Ties keep the earlier result ahead.
    pub fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let marker = self.entries.len();
        let mut indexed: Vec<(usize, LeaderboardEntry)> =
            self.entries.drain(..).enumerate().collect();
        indexed.push((marker, entry));
        indexed.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
        indexed.truncate(LEADERBOARD_CAPACITY);

        let position = indexed.iter().position(|(i, _)| *i == marker);
        self.entries = indexed.into_iter().map(|(_, e)| e).collect();
        position
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would make it onto the board right now.
    #[must_use]
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < LEADERBOARD_CAPACITY
                || self.entries.last().is_some_and(|last| score > last.score))
    }
}

fn sort_and_truncate(entries: &mut Vec<LeaderboardEntry>) {
    // stable: equal scores keep insertion order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAPACITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry::new(name, score, fixed_now())
    }

    #[test]
    fn eleven_inserts_keep_top_ten_sorted() {
        let mut board = Leaderboard::new();
        let scores = [5_000, 1_000, 25_000, 3_000, 2_000, 15_000, 40_000, 10_000, 60_000, 100_000, 500];
        for (i, score) in scores.iter().enumerate() {
            board.insert(entry(&format!("p{i}"), *score));
        }

        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        let kept: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        let mut expected = kept.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(kept, expected);
        assert!(!kept.contains(&500));
        assert_eq!(kept.first(), Some(&100_000));
    }

    #[test]
    fn insert_reports_position() {
        let mut board = Leaderboard::new();
        assert_eq!(board.insert(entry("a", 2_000)), Some(0));
        assert_eq!(board.insert(entry("b", 5_000)), Some(0));
        assert_eq!(board.insert(entry("c", 1_000)), Some(2));
    }

    #[test]
    fn ties_rank_older_entry_first() {
        let mut board = Leaderboard::new();
        board.insert(entry("first", 3_000));
        let pos = board.insert(entry("second", 3_000));
        assert_eq!(pos, Some(1));
        assert_eq!(board.entries()[0].display_name, "first");
    }

    #[test]
    fn low_score_falls_off_full_board() {
        let mut board = Leaderboard::new();
        for i in 0..LEADERBOARD_CAPACITY {
            board.insert(entry("p", 10_000 + i as u64));
        }
        assert!(!board.qualifies(1_000));
        assert_eq!(board.insert(entry("late", 1_000)), None);
        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        assert!(board.entries().iter().all(|e| e.display_name != "late"));
    }

    #[test]
    fn from_entries_normalises_unsorted_input() {
        let entries: Vec<_> = (0..15).map(|i| entry("p", i * 1_000)).collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.entries()[0].score, 14_000);
        assert_eq!(board.entries()[9].score, 5_000);
    }

    #[test]
    fn entry_uses_legacy_field_names() {
        let json = serde_json::to_value(entry("Viajero_7", 3_000)).unwrap();
        assert_eq!(json["userName"], "Viajero_7");
        assert_eq!(json["score"], 3_000);
        assert!(json["date"].is_string());
    }

    #[test]
    fn traveler_names_stay_below_one_thousand() {
        assert_eq!(LeaderboardEntry::traveler_name(42), "Viajero_42");
        assert_eq!(LeaderboardEntry::traveler_name(1_042), "Viajero_42");
    }
}
