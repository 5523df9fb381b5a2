use std::collections::BTreeSet;
use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use catemino_core::PrizeLadder;
use catemino_core::model::{
    Category, CategoryKey, GameSettings, Outcome, Phase, Question, Rank, SessionId,
};
use catemino_core::shuffle;

use super::events::{GameEvent, PendingResolution};
use super::view::{QuestionView, SessionSnapshot};
use crate::error::SessionError;

/// Number of incorrect options the fifty-fifty lifeline removes.
pub const FIFTY_FIFTY_HIDES: usize = 2;

//
// ─── ACTIVE SESSION ────────────────────────────────────────────────────────────
//

/// State of one game run. Owned exclusively by `QuizMachine`.
struct ActiveSession {
    id: SessionId,
    category: CategoryKey,
    questions: Vec<Question>,
    current: usize,
    score: u64,
    lifeline_available: bool,
    hidden: BTreeSet<usize>,
    time_remaining: u32,
    selected: Option<usize>,
    phase: Phase,
    outcome: Option<Outcome>,
}

impl ActiveSession {
    fn question(&self) -> Result<&Question, SessionError> {
        self.questions
            .get(self.current)
            .ok_or(SessionError::QuestionsExhausted {
                index: self.current,
                total: self.questions.len(),
            })
    }

    fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    fn finish(&mut self, outcome: Outcome) -> GameEvent {
        self.phase = Phase::Finished;
        self.outcome = Some(outcome);
        info!(
            session = %self.id,
            category = %self.category,
            ?outcome,
            score = self.score,
            "session finished"
        );
        GameEvent::Finished {
            session: self.id,
            outcome,
            score: self.score,
        }
    }
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

/// The game session state machine.
///
/// Pure and synchronous: it never sleeps or spawns. A driver feeds it ticks,
/// player intents and deferred resolutions one at a time, and renders
/// `snapshot()` after each call.
///
/// Every intent returns the events it produced. An empty list means the
/// intent was not valid in the current phase and nothing changed.
pub struct QuizMachine {
    settings: GameSettings,
    ladder: PrizeLadder,
    rng: StdRng,
    last_session: SessionId,
    session: Option<ActiveSession>,
}

impl QuizMachine {
    /// Creates a machine with an OS-seeded random source.
    #[must_use]
    pub fn new(settings: GameSettings, ladder: PrizeLadder) -> Self {
        Self::with_rng(settings, ladder, StdRng::from_os_rng())
    }

    /// Creates a machine whose shuffles and lifeline picks are reproducible.
    #[must_use]
    pub fn with_seed(settings: GameSettings, ladder: PrizeLadder, seed: u64) -> Self {
        Self::with_rng(settings, ladder, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(settings: GameSettings, ladder: PrizeLadder, rng: StdRng) -> Self {
        Self {
            settings,
            ladder,
            rng,
            last_session: SessionId::new(0),
            session: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.session.as_ref().map_or(0, |s| s.score)
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.session.as_ref().and_then(|s| s.outcome)
    }

    /// The question on the board, including its answer.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session
            .as_ref()
            .and_then(|s| s.questions.get(s.current))
    }

    /// Starts a new session on `category`.
    ///
    /// Only valid from `Idle` or `Finished`; otherwise this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyCategory` if the category has no questions.
    /// The machine is left untouched in that case.
    pub fn start_session(&mut self, category: &Category) -> Result<Vec<GameEvent>, SessionError> {
        if !self.phase().can_start() {
            debug!(phase = ?self.phase(), "start ignored while a session is running");
            return Ok(Vec::new());
        }
        if category.is_empty() {
            return Err(SessionError::EmptyCategory {
                category: category.key(),
            });
        }

        let questions = shuffle::shuffle_questions(category.questions(), &mut self.rng);
        let id = self.last_session.next();
        self.last_session = id;

        let seconds = self.settings.seconds_per_question();
        let total_questions = questions.len();
        self.session = Some(ActiveSession {
            id,
            category: category.key(),
            questions,
            current: 0,
            score: 0,
            lifeline_available: true,
            hidden: BTreeSet::new(),
            time_remaining: seconds,
            selected: None,
            phase: Phase::Asking,
            outcome: None,
        });

        info!(session = %id, category = %category.key(), total_questions, "session started");
        Ok(vec![GameEvent::SessionStarted {
            session: id,
            category: category.key(),
            total_questions,
            seconds,
        }])
    }

    /// One second elapsed on the question timer.
    ///
    /// Only counts down while `Asking`. Reaching zero finishes the session
    /// with `Outcome::LostTimeout`.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let warning_secs = self.settings.warning_secs();
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::Asking) else {
            return Vec::new();
        };

        session.time_remaining = session.time_remaining.saturating_sub(1);
        let remaining = session.time_remaining;
        let mut events = vec![GameEvent::Ticked {
            remaining,
            warning: remaining > 0 && remaining <= warning_secs,
        }];
        if remaining == 0 {
            events.push(session.finish(Outcome::LostTimeout));
        }
        events
    }

    /// Locks in `index` as the player's answer and freezes the timer.
    ///
    /// Rejected unless `Asking`, the option exists, it is not hidden by the
    /// lifeline and nothing was selected yet this round. The returned
    /// `OptionSelected` event carries the token to pass to `resolve` once the
    /// reveal delay has elapsed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionsExhausted` if the session has no
    /// current question, which indicates a bug in the machine.
    pub fn select_option(&mut self, index: usize) -> Result<Vec<GameEvent>, SessionError> {
        let delay = self.settings.reveal_delay();
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::Asking) else {
            debug!(index, "selection ignored outside of Asking");
            return Ok(Vec::new());
        };
        if session.selected.is_some() || session.hidden.contains(&index) {
            debug!(index, "selection ignored");
            return Ok(Vec::new());
        }
        if index >= session.question()?.options().len() {
            debug!(index, "selection out of range");
            return Ok(Vec::new());
        }

        session.selected = Some(index);
        session.phase = Phase::Resolving;
        let pending = PendingResolution {
            session: session.id,
            question_index: session.current,
            delay,
        };
        Ok(vec![GameEvent::OptionSelected { index, pending }])
    }

    /// Completes a selection after the reveal delay.
    ///
    /// A correct answer banks the prize for the current position and either
    /// advances or wins; a wrong one ends the session with the score unchanged.
    /// Stale tokens (another session, another question, or not `Resolving`)
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionsExhausted` if the session has no
    /// current question, which indicates a bug in the machine.
    pub fn resolve(&mut self, pending: PendingResolution) -> Result<Vec<GameEvent>, SessionError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Vec::new());
        };
        if session.id != pending.session
            || session.phase != Phase::Resolving
            || session.current != pending.question_index
        {
            debug!(?pending, current = %session.id, "ignoring stale resolution");
            return Ok(Vec::new());
        }
        let Some(selected) = session.selected else {
            return Ok(Vec::new());
        };

        let (answer, correct) = {
            let question = session.question()?;
            (question.answer(), question.is_correct(selected))
        };
        let mut events = vec![GameEvent::Answered {
            selected,
            answer,
            correct,
        }];

        if !correct {
            events.push(session.finish(Outcome::LostWrongAnswer));
            return Ok(events);
        }

        let prize = self.ladder.prize_for(session.current);
        session.score = session.score.saturating_add(prize);
        events.push(GameEvent::PrizeAwarded {
            prize,
            score: session.score,
        });

        if session.is_last_question() {
            events.push(session.finish(Outcome::Won));
        } else {
            session.current += 1;
            session.time_remaining = self.settings.seconds_per_question();
            session.hidden.clear();
            session.selected = None;
            session.phase = Phase::Asking;
            events.push(GameEvent::Advanced {
                index: session.current,
                prize: self.ladder.prize_for(session.current),
            });
        }
        Ok(events)
    }

    /// Fifty-fifty: hides up to two incorrect options on the current question.
    ///
    /// Usable once per session, only while `Asking` and before a selection.
    /// With fewer than two incorrect options it hides what there is.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionsExhausted` if the session has no
    /// current question, which indicates a bug in the machine.
    pub fn use_lifeline(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        let Some(session) = self.session.as_mut().filter(|s| s.phase == Phase::Asking) else {
            return Ok(Vec::new());
        };
        if !session.lifeline_available || session.selected.is_some() {
            debug!("lifeline ignored");
            return Ok(Vec::new());
        }

        let incorrect = session.question()?.incorrect_indices();
        let hidden: BTreeSet<usize> = shuffle::shuffled(&incorrect, &mut self.rng)
            .into_iter()
            .take(FIFTY_FIFTY_HIDES)
            .collect();

        session.hidden = hidden;
        session.lifeline_available = false;
        Ok(vec![GameEvent::LifelineUsed {
            hidden: session.hidden.iter().copied().collect(),
        }])
    }

    /// Leaves a running session without recording it (back to the menu).
    ///
    /// Any pending resolution for it becomes stale. No-op unless `Asking` or
    /// `Resolving`.
    pub fn abandon(&mut self) -> Vec<GameEvent> {
        match self.session.as_ref() {
            Some(session) if session.phase.is_active() => {
                let id = session.id;
                self.session = None;
                info!(session = %id, "session abandoned");
                vec![GameEvent::Abandoned { session: id }]
            }
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let Some(session) = self.session.as_ref() else {
            return SessionSnapshot::idle();
        };

        let question = session.questions.get(session.current);
        let revealed_answer = match session.phase {
            Phase::Resolving | Phase::Finished => question.map(Question::answer),
            Phase::Idle | Phase::Asking => None,
        };

        SessionSnapshot {
            session: Some(session.id),
            phase: session.phase,
            category: Some(session.category),
            current_question_index: session.current,
            total_questions: session.questions.len(),
            question: question.map(|q| QuestionView {
                id: q.id().clone(),
                text: q.question().to_owned(),
                options: q.options().to_vec(),
            }),
            score: session.score,
            current_prize: self.ladder.prize_for(session.current),
            time_remaining: session.time_remaining,
            hidden_options: session.hidden.iter().copied().collect(),
            lifeline_available: session.lifeline_available,
            selected_option: session.selected,
            revealed_answer,
            outcome: session.outcome,
            rank: Rank::for_score(session.score),
        }
    }
}

impl fmt::Debug for QuizMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizMachine")
            .field("settings", &self.settings)
            .field("phase", &self.phase())
            .field("session", &self.session_id())
            .field("score", &self.score())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
