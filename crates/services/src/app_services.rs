use std::sync::Arc;

use catemino_core::model::GameSettings;
use catemino_core::{PrizeLadder, QuestionBank};
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::leaderboard_service::LeaderboardService;
use crate::sessions::{GameService, QuizMachine};

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    ladder: PrizeLadder,
    leaderboard: LeaderboardService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// built-in question bank is invalid.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock)
    }

    /// Build services over an in-memory store. Nothing survives the process.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in question bank is invalid.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), clock)
    }

    /// # Errors
    ///
    /// Returns `AppServicesError` if the built-in question bank is invalid.
    pub fn from_storage(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBank::builtin()?);
        let leaderboard = LeaderboardService::new(clock, Arc::clone(&storage.kv));
        Ok(Self {
            bank,
            ladder: PrizeLadder::standard(),
            leaderboard,
        })
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn leaderboard(&self) -> LeaderboardService {
        self.leaderboard.clone()
    }

    /// A fresh game service. `seed` makes shuffles reproducible.
    #[must_use]
    pub fn game_service(&self, settings: GameSettings, seed: Option<u64>) -> GameService {
        let ladder = self.ladder.clone();
        let machine = match seed {
            Some(seed) => QuizMachine::with_seed(settings, ladder, seed),
            None => QuizMachine::new(settings, ladder),
        };
        GameService::new(machine, self.bank(), self.leaderboard())
    }
}
