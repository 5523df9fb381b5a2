mod category;
mod ids;
mod leaderboard;
mod question;
mod rank;
mod session;
mod settings;

pub use category::{Category, CategoryKey, UnknownCategory};
pub use ids::{QuestionId, SessionId};
pub use leaderboard::{LEADERBOARD_CAPACITY, Leaderboard, LeaderboardEntry};
pub use question::{MAX_OPTIONS, Question, QuestionError};
pub use rank::Rank;
pub use session::{GameResult, Outcome, Phase, group_thousands};
pub use settings::{GameSettings, GameSettingsError};
