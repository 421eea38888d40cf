pub mod game;
pub mod score;
pub mod user;

pub use game::{Game, GameRecord, Guess, MoveRecord, PendingTurn, PlayerRef, Seat};
pub use score::Score;
pub use user::{User, UserStats};
