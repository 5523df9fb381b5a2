use std::time::Duration;

use serde::Serialize;

use catemino_core::model::{CategoryKey, Outcome, SessionId};

/// Deferred answer resolution handed out when an option is chosen.
///
/// The driver waits `delay`, then passes the token back to `resolve`. Tokens
/// from an older session or question are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingResolution {
    pub session: SessionId,
    pub question_index: usize,
    pub delay: Duration,
}

/// Something that happened inside the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        session: SessionId,
        category: CategoryKey,
        total_questions: usize,
        seconds: u32,
    },
    Ticked {
        remaining: u32,
        warning: bool,
    },
    OptionSelected {
        index: usize,
        pending: PendingResolution,
    },
    LifelineUsed {
        hidden: Vec<usize>,
    },
    Answered {
        selected: usize,
        answer: usize,
        correct: bool,
    },
    PrizeAwarded {
        prize: u64,
        score: u64,
    },
    Advanced {
        index: usize,
        prize: u64,
    },
    Finished {
        session: SessionId,
        outcome: Outcome,
        score: u64,
    },
    Abandoned {
        session: SessionId,
    },
    Recorded {
        score: u64,
        position: Option<usize>,
    },
}

impl GameEvent {
    /// Audio cue for this event, if any.
    #[must_use]
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::SessionStarted { .. } => Some(SoundCue::Start),
            Self::Ticked { warning: true, .. } => Some(SoundCue::Tick),
            Self::Answered { correct: true, .. } => Some(SoundCue::Correct),
            Self::Answered { correct: false, .. } => Some(SoundCue::Wrong),
            Self::Finished {
                outcome: Outcome::LostTimeout,
                ..
            } => Some(SoundCue::Timeout),
            _ => None,
        }
    }

    /// True when the machine just (re-)entered `Asking` and the timer must be re-armed.
    #[must_use]
    pub fn enters_asking(&self) -> bool {
        matches!(self, Self::SessionStarted { .. } | Self::Advanced { .. })
    }

    #[must_use]
    pub fn pending_resolution(&self) -> Option<PendingResolution> {
        match self {
            Self::OptionSelected { pending, .. } => Some(*pending),
            _ => None,
        }
    }
}

/// Sounds a presentation layer may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Start,
    Tick,
    Correct,
    Wrong,
    Timeout,
}

/// Side-effect subscriber (audio, analytics, logging) for transition events.
///
/// Observers only watch; they cannot change session state.
pub trait GameObserver: Send + Sync {
    fn on_event(&self, event: &GameEvent);
}
