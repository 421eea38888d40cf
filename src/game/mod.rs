// Memory game engine

pub mod board;
pub mod cards;
pub mod engine;
pub mod error;
pub mod resolution;
pub mod validator;
pub mod view;

pub use engine::{MoveOutcome, TurnEngine};
pub use error::GameError;
pub use resolution::Resolution;
pub use validator::MoveValidator;
pub use view::{GameOutcome, GameView};
