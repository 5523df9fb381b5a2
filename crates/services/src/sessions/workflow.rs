use std::fmt;
use std::sync::Arc;

use tracing::warn;

use catemino_core::QuestionBank;
use catemino_core::model::{Category, CategoryKey, Phase};

use super::events::{GameEvent, GameObserver, PendingResolution};
use super::machine::QuizMachine;
use super::view::SessionSnapshot;
use crate::error::SessionError;
use crate::leaderboard_service::LeaderboardService;

/// Orchestrates a `QuizMachine` with the question bank, the leaderboard and
/// side-effect observers.
///
/// Every finished session is recorded exactly once: the machine emits a single
/// `Finished` event per session and this service writes the board when it
/// sees it.
pub struct GameService {
    machine: QuizMachine,
    bank: Arc<QuestionBank>,
    leaderboard: LeaderboardService,
    observers: Vec<Arc<dyn GameObserver>>,
    player_name: Option<String>,
}

impl GameService {
    #[must_use]
    pub fn new(machine: QuizMachine, bank: Arc<QuestionBank>, leaderboard: LeaderboardService) -> Self {
        Self {
            machine,
            bank,
            leaderboard,
            observers: Vec::new(),
            player_name: None,
        }
    }

    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.machine.snapshot()
    }

    /// Starts a session on `category`, or the bank's default category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCategory` if the bank lacks `category`,
    /// `SessionError::EmptyBank` if no category was given and the bank is empty,
    /// and `SessionError::EmptyCategory` if the chosen category has no questions.
    pub fn start(&mut self, category: Option<CategoryKey>) -> Result<Vec<GameEvent>, SessionError> {
        let chosen: Category = match category {
            Some(key) => self
                .bank
                .category(key)
                .ok_or(SessionError::UnknownCategory { category: key })?
                .clone(),
            None => self
                .bank
                .default_category()
                .ok_or(SessionError::EmptyBank)?
                .clone(),
        };
        let events = self.machine.start_session(&chosen)?;
        self.publish(&events);
        Ok(events)
    }

    /// Advances the question timer by one second.
    pub async fn tick(&mut self) -> Vec<GameEvent> {
        let events = self.machine.tick();
        self.settle(events).await
    }

    /// # Errors
    ///
    /// Propagates machine errors.
    pub fn select_option(&mut self, index: usize) -> Result<Vec<GameEvent>, SessionError> {
        let events = self.machine.select_option(index)?;
        self.publish(&events);
        Ok(events)
    }

    /// Applies a deferred answer resolution.
    ///
    /// # Errors
    ///
    /// Propagates machine errors.
    pub async fn resolve(&mut self, pending: PendingResolution) -> Result<Vec<GameEvent>, SessionError> {
        let events = self.machine.resolve(pending)?;
        Ok(self.settle(events).await)
    }

    /// # Errors
    ///
    /// Propagates machine errors.
    pub fn use_lifeline(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        let events = self.machine.use_lifeline()?;
        self.publish(&events);
        Ok(events)
    }

    pub fn abandon(&mut self) -> Vec<GameEvent> {
        let events = self.machine.abandon();
        self.publish(&events);
        events
    }

    // Records the score when `events` finish the session, then notifies observers.
    async fn settle(&mut self, mut events: Vec<GameEvent>) -> Vec<GameEvent> {
        let finished_score = events.iter().find_map(|event| match event {
            GameEvent::Finished { score, .. } => Some(*score),
            _ => None,
        });

        if let Some(score) = finished_score {
            match self
                .leaderboard
                .record_score(score, self.player_name.as_deref())
                .await
            {
                Ok(Some(recorded)) => events.push(GameEvent::Recorded {
                    score,
                    position: recorded.position,
                }),
                Ok(None) => {}
                Err(err) => warn!(error = %err, score, "failed to record score"),
            }
        }

        self.publish(&events);
        events
    }

    fn publish(&self, events: &[GameEvent]) {
        for event in events {
            for observer in &self.observers {
                observer.on_event(event);
            }
        }
    }
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("machine", &self.machine)
            .field("observers", &self.observers.len())
            .field("player_name", &self.player_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use catemino_core::PrizeLadder;
    use catemino_core::model::{GameSettings, Outcome, Question};
    use catemino_core::time::fixed_clock;
    use storage::repository::InMemoryStore;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<GameEvent>>,
    }

    impl GameObserver for Recorder {
        fn on_event(&self, event: &GameEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn single_option(id: &str) -> Question {
        Question::new(id, "¿Listo?", vec!["Sí".into()], 0).unwrap()
    }

    fn service(bank: QuestionBank) -> (GameService, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let machine = QuizMachine::with_seed(GameSettings::default(), PrizeLadder::standard(), 1);
        let leaderboard = LeaderboardService::new(fixed_clock(), Arc::new(InMemoryStore::new()));
        let svc = GameService::new(machine, Arc::new(bank), leaderboard)
            .with_player_name("Rosa")
            .with_observer(recorder.clone());
        (svc, recorder)
    }

    async fn answer(svc: &mut GameService, index: usize) -> Vec<GameEvent> {
        let events = svc.select_option(index).unwrap();
        let pending = events[0].pending_resolution().unwrap();
        svc.resolve(pending).await.unwrap()
    }

    #[test]
    fn unknown_category_is_an_error() {
        let bank = QuestionBank::from_categories([Category::new(
            CategoryKey::Cultura,
            vec![single_option("a")],
        )]);
        let (mut svc, _) = service(bank);
        let err = svc.start(Some(CategoryKey::Rodeo)).unwrap_err();
        assert!(matches!(err, SessionError::UnknownCategory { category: CategoryKey::Rodeo }));
        assert_eq!(svc.phase(), Phase::Idle);
    }

    #[test]
    fn empty_bank_has_no_default_category() {
        let (mut svc, _) = service(QuestionBank::from_categories(Vec::new()));
        assert!(matches!(svc.start(None).unwrap_err(), SessionError::EmptyBank));
    }

    #[tokio::test]
    async fn win_is_recorded_once_and_observed() {
        let bank = QuestionBank::from_categories([Category::new(
            CategoryKey::Futbol,
            vec![single_option("a"), single_option("b")],
        )]);
        let (mut svc, recorder) = service(bank);
        svc.start(Some(CategoryKey::Futbol)).unwrap();
        answer(&mut svc, 0).await;
        let events = answer(&mut svc, 0).await;

        assert!(events.contains(&GameEvent::Recorded { score: 3_000, position: Some(0) }));
        let observed = recorder.events.lock().unwrap();
        assert!(matches!(observed.first(), Some(GameEvent::SessionStarted { .. })));
        assert_eq!(
            observed
                .iter()
                .filter(|e| matches!(e, GameEvent::Recorded { .. }))
                .count(),
            1
        );
        drop(observed);

        let board = svc.leaderboard().load().await;
        assert_eq!(board.len(), 1);
        assert_eq!(board.entries()[0].display_name, "Rosa");
        assert_eq!(svc.snapshot().outcome, Some(Outcome::Won));
    }

    #[tokio::test]
    async fn zero_score_loss_is_not_recorded() {
        let two = Question::new("b", "¿Cuál?", vec!["Uno".into(), "Dos".into()], 1).unwrap();
        let bank = QuestionBank::from_categories([Category::new(CategoryKey::Rodeo, vec![two])]);
        let (mut svc, _) = service(bank);
        svc.start(None).unwrap();
        let wrong = svc.machine.current_question().unwrap().incorrect_indices()[0];
        let events = answer(&mut svc, wrong).await;

        assert!(matches!(
            events.last(),
            Some(GameEvent::Finished { outcome: Outcome::LostWrongAnswer, score: 0, .. })
        ));
        assert!(svc.leaderboard().load().await.is_empty());
    }
}
