use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Game, Score, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to (de)serialize game state: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("A user named {0} already exists")]
    DuplicateUser(String),

    /// The game was saved by another request after it was loaded
    #[error("Game {0} was modified concurrently")]
    StaleGame(Uuid),

    #[error("Game {0} not found")]
    GameNotFound(Uuid),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users, games and scores.
///
/// Game writes are versioned: `save_game` and `finish_game` only succeed when
/// the stored version still equals `game.version`, and bump it on success.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, name: &str, email: Option<&str>) -> StoreResult<User>;

    async fn find_user(&self, name: &str) -> StoreResult<Option<User>>;

    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Users with at least one finished game, best win percentage first
    async fn user_rankings(&self) -> StoreResult<Vec<User>>;

    async fn insert_game(&self, game: &Game) -> StoreResult<()>;

    async fn load_game(&self, game_id: Uuid) -> StoreResult<Option<Game>>;

    /// Returns the game as stored, with its new version
    async fn save_game(&self, game: &Game) -> StoreResult<Game>;

    /// Save a decisive game, insert its score and update both players'
    /// records as one unit
    async fn finish_game(&self, game: &Game, score: &Score) -> StoreResult<Game>;

    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()>;

    async fn games_for_user(&self, user_id: Uuid, active_only: bool) -> StoreResult<Vec<Game>>;

    async fn get_score(&self, score_id: Uuid) -> StoreResult<Option<Score>>;

    async fn scores_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Score>>;

    async fn all_scores(&self) -> StoreResult<Vec<Score>>;
}
