use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error};

use catemino_core::model::{CategoryKey, Phase};

use super::events::{GameEvent, PendingResolution};
use super::view::SessionSnapshot;
use super::workflow::GameService;
use crate::error::SessionError;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 32;

type StartReply = oneshot::Sender<Result<Vec<GameEvent>, SessionError>>;

enum Command {
    Start {
        category: Option<CategoryKey>,
        reply: StartReply,
    },
    Select(usize),
    Lifeline,
    Abandon,
    Shutdown,
}

enum Wake {
    Command(Option<Command>),
    Reveal,
    Tick,
}

/// Cloneable front end for a running `GameDriver`.
///
/// Intents are queued and applied in order; the resulting state is published
/// on the snapshot channel.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl DriverHandle {
    /// Starts a session and waits for the driver to apply it.
    ///
    /// # Errors
    ///
    /// Returns the `SessionError` from `GameService::start`, or
    /// `SessionError::DriverStopped` if the driver is gone.
    pub async fn start(&self, category: Option<CategoryKey>) -> Result<Vec<GameEvent>, SessionError> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Start { category, reply }).await?;
        response.await.map_err(|_| SessionError::DriverStopped)?
    }

    /// # Errors
    ///
    /// Returns `SessionError::DriverStopped` if the driver is gone.
    pub async fn select(&self, index: usize) -> Result<(), SessionError> {
        self.send(Command::Select(index)).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::DriverStopped` if the driver is gone.
    pub async fn use_lifeline(&self) -> Result<(), SessionError> {
        self.send(Command::Lifeline).await
    }

    /// # Errors
    ///
    /// Returns `SessionError::DriverStopped` if the driver is gone.
    pub async fn abandon(&self) -> Result<(), SessionError> {
        self.send(Command::Abandon).await
    }

    /// Asks the driver loop to exit. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    async fn send(&self, command: Command) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SessionError::DriverStopped)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start { category, .. } => f.debug_struct("Start").field("category", category).finish(),
            Self::Select(index) => f.debug_tuple("Select").field(index).finish(),
            Self::Lifeline => f.write_str("Lifeline"),
            Self::Abandon => f.write_str("Abandon"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Owns a `GameService` and drives it in real time.
///
/// A one-second ticker runs while a question is being asked, and a pending
/// answer is resolved once its reveal delay elapses. Everything happens on
/// one task, so intents, ticks and resolutions never interleave.
pub struct GameDriver {
    service: GameService,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl GameDriver {
    #[must_use]
    pub fn new(service: GameService) -> (Self, DriverHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(service.snapshot());
        let driver = Self {
            service,
            commands: command_rx,
            snapshots: snapshot_tx,
        };
        let handle = DriverHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (driver, handle)
    }

    /// Spawns the loop on the current runtime.
    #[must_use]
    pub fn spawn(service: GameService) -> (DriverHandle, tokio::task::JoinHandle<GameService>) {
        let (driver, handle) = Self::new(service);
        (handle, tokio::spawn(driver.run()))
    }

    /// Runs until shut down or every handle is dropped, then hands the
    /// service back.
    pub async fn run(mut self) -> GameService {
        let mut ticker = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut reveal: Option<(Instant, PendingResolution)> = None;

        loop {
            let asking = self.service.phase() == Phase::Asking;
            let deadline = reveal.map_or_else(Instant::now, |(at, _)| at);

            let wake = tokio::select! {
                biased;
                command = self.commands.recv() => Wake::Command(command),
                () = time::sleep_until(deadline), if reveal.is_some() => Wake::Reveal,
                _ = ticker.tick(), if asking => Wake::Tick,
            };

            let step = match wake {
                Wake::Command(None | Some(Command::Shutdown)) => break,
                Wake::Command(Some(command)) => self.apply(command),
                Wake::Reveal => match reveal.take() {
                    Some((_, pending)) => self.service.resolve(pending).await,
                    None => Ok(Vec::new()),
                },
                Wake::Tick => Ok(self.service.tick().await),
            };

            match step {
                Ok(events) => {
                    for event in &events {
                        if let Some(pending) = event.pending_resolution() {
                            reveal = Some((Instant::now() + pending.delay, pending));
                        }
                        if event.enters_asking() {
                            ticker.reset();
                        }
                        if matches!(event, GameEvent::Abandoned { .. }) {
                            reveal = None;
                        }
                    }
                }
                Err(err) => error!(error = %err, "game step failed"),
            }
            self.snapshots.send_replace(self.service.snapshot());
        }

        debug!("game driver stopped");
        self.service
    }

    fn apply(&mut self, command: Command) -> Result<Vec<GameEvent>, SessionError> {
        debug!(?command, "intent");
        match command {
            Command::Start { category, reply } => {
                let result = self.service.start(category);
                let events = result.as_ref().cloned().unwrap_or_default();
                // Callers read the snapshot as soon as the reply lands.
                self.snapshots.send_replace(self.service.snapshot());
                let _ = reply.send(result);
                Ok(events)
            }
            Command::Select(index) => self.service.select_option(index),
            Command::Lifeline => self.service.use_lifeline(),
            Command::Abandon => Ok(self.service.abandon()),
            Command::Shutdown => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use catemino_core::model::{Category, GameSettings, Outcome, Question};
    use catemino_core::time::fixed_clock;
    use catemino_core::{PrizeLadder, QuestionBank};
    use storage::repository::InMemoryStore;

    use super::*;
    use crate::leaderboard_service::LeaderboardService;
    use crate::sessions::machine::QuizMachine;

    fn sure_thing(id: &str) -> Question {
        Question::new(id, "¿Listo?", vec!["Sí".into()], 0).unwrap()
    }

    fn spawn_with(questions: Vec<Question>) -> (DriverHandle, LeaderboardService) {
        let bank = QuestionBank::from_categories([Category::new(CategoryKey::Cultura, questions)]);
        let leaderboard = LeaderboardService::new(fixed_clock(), Arc::new(InMemoryStore::new()));
        let machine = QuizMachine::with_seed(GameSettings::default(), PrizeLadder::standard(), 5);
        let service = GameService::new(machine, Arc::new(bank), leaderboard.clone()).with_player_name("Ana");
        let (handle, _task) = GameDriver::spawn(service);
        (handle, leaderboard)
    }

    #[tokio::test(start_paused = true)]
    async fn unanswered_question_times_out_after_budget() {
        let (handle, _) = spawn_with(vec![sure_thing("a")]);
        let started = Instant::now();
        handle.start(None).await.unwrap();

        let mut rx = handle.snapshots();
        let snap = rx
            .wait_for(|s| s.phase == Phase::Finished)
            .await
            .unwrap()
            .clone();

        assert_eq!(snap.outcome, Some(Outcome::LostTimeout));
        assert_eq!(snap.time_remaining, 0);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(15), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(16), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn answer_is_revealed_after_delay_then_advances() {
        let (handle, _) = spawn_with(vec![sure_thing("a"), sure_thing("b")]);
        handle.start(None).await.unwrap();
        let mut rx = handle.snapshots();

        let selected_at = Instant::now();
        handle.select(0).await.unwrap();
        let snap = rx
            .wait_for(|s| s.phase == Phase::Resolving)
            .await
            .unwrap()
            .clone();
        assert_eq!(snap.revealed_answer, Some(0));
        assert_eq!(snap.score, 0);

        let snap = rx
            .wait_for(|s| s.phase == Phase::Asking)
            .await
            .unwrap()
            .clone();
        assert!(selected_at.elapsed() >= Duration::from_millis(1_200));
        assert_eq!(snap.current_question_index, 1);
        assert_eq!(snap.score, 1_000);
        assert_eq!(snap.time_remaining, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn win_is_recorded_on_the_board() {
        let (handle, leaderboard) = spawn_with(vec![sure_thing("a"), sure_thing("b")]);
        handle.start(None).await.unwrap();
        let mut rx = handle.snapshots();

        handle.select(0).await.unwrap();
        rx.wait_for(|s| s.phase == Phase::Asking && s.current_question_index == 1)
            .await
            .unwrap();
        handle.select(0).await.unwrap();
        let snap = rx
            .wait_for(|s| s.phase == Phase::Finished)
            .await
            .unwrap()
            .clone();

        assert_eq!(snap.outcome, Some(Outcome::Won));
        let board = leaderboard.load().await;
        assert_eq!(board.entries()[0].score, 3_000);
        assert_eq!(board.entries()[0].display_name, "Ana");
    }

    #[tokio::test(start_paused = true)]
    async fn abandoning_mid_reveal_drops_the_resolution() {
        let (handle, leaderboard) = spawn_with(vec![sure_thing("a"), sure_thing("b")]);
        handle.start(None).await.unwrap();
        let mut rx = handle.snapshots();

        handle.select(0).await.unwrap();
        rx.wait_for(|s| s.phase == Phase::Resolving).await.unwrap();
        handle.abandon().await.unwrap();
        rx.wait_for(|s| s.phase == Phase::Idle).await.unwrap();

        time::sleep(Duration::from_secs(3)).await;
        let snap = handle.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.score, 0);
        assert!(leaderboard.load().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn snapshot_is_current_once_start_returns() {
        let (handle, _) = spawn_with(vec![sure_thing("a")]);
        for _ in 0..500 {
            handle.start(None).await.unwrap();
            let snap = handle.snapshot();
            assert_eq!(snap.phase, Phase::Asking);
            assert_eq!(snap.current_question_index, 0);
            handle.abandon().await.unwrap();
        }
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_reports_errors_and_shutdown_stops_driver() {
        let (handle, _) = spawn_with(vec![sure_thing("a")]);
        let err = handle.start(Some(CategoryKey::Rodeo)).await.unwrap_err();
        assert!(matches!(err, SessionError::UnknownCategory { .. }));

        handle.shutdown().await;
        while handle.select(0).await.is_ok() {
            time::sleep(Duration::from_millis(10)).await;
        }
        assert!(matches!(handle.start(None).await, Err(SessionError::DriverStopped)));
    }
}
