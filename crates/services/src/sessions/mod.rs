mod driver;
mod events;
mod machine;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use driver::{DriverHandle, GameDriver};
pub use events::{GameEvent, GameObserver, PendingResolution, SoundCue};
pub use machine::{FIFTY_FIFTY_HIDES, QuizMachine};
pub use view::{QuestionView, SessionSnapshot};
pub use workflow::GameService;
