use thiserror::Error;

/// Rule violations raised by the game engine. None of them mutate the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Requested move is out of grid board boundary")]
    OutOfBounds { row: i64, column: i64 },

    #[error("Card has already been flipped")]
    AlreadyFlipped { row: usize, column: usize },

    #[error("Game already over")]
    GameOver,

    #[error("A score needs a strict winner, both players have {0}")]
    InvalidScore(u32),

    #[error("A deck of {0} cards cannot be laid out as a square board")]
    InvalidDeck(usize),
}
