use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    queries,
    store::{Store, StoreError, StoreResult},
};
use crate::models::{Game, GameRecord, Score, User};

/// Store backed by PostgreSQL
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reload after a versioned write so callers see the new version
    async fn reload(&self, game_id: Uuid) -> StoreResult<Game> {
        let record = queries::get_game(&self.pool, game_id)
            .await?
            .ok_or(StoreError::GameNotFound(game_id))?;
        Ok(record.into_game()?)
    }
}

fn into_games(records: Vec<GameRecord>) -> StoreResult<Vec<Game>> {
    records
        .into_iter()
        .map(|record| record.into_game().map_err(StoreError::from))
        .collect()
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, name: &str, email: Option<&str>) -> StoreResult<User> {
        let user = User::new(name, email);
        queries::create_user(&self.pool, &user).await.map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if unique {
                StoreError::DuplicateUser(name.to_string())
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn find_user(&self, name: &str) -> StoreResult<Option<User>> {
        Ok(queries::get_user_by_name(&self.pool, name).await?)
    }

    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(queries::get_user(&self.pool, user_id).await?)
    }

    async fn user_rankings(&self) -> StoreResult<Vec<User>> {
        Ok(queries::get_ranked_users(&self.pool).await?)
    }

    async fn insert_game(&self, game: &Game) -> StoreResult<()> {
        let state = serde_json::to_value(game)?;
        queries::create_game(&self.pool, game, state).await?;
        Ok(())
    }

    async fn load_game(&self, game_id: Uuid) -> StoreResult<Option<Game>> {
        match queries::get_game(&self.pool, game_id).await? {
            Some(record) => Ok(Some(record.into_game()?)),
            None => Ok(None),
        }
    }

    async fn save_game(&self, game: &Game) -> StoreResult<Game> {
        let state = serde_json::to_value(game)?;
        if queries::update_game(&self.pool, game, state).await? == 0 {
            tracing::warn!("Stale save rejected for game {} (version {})", game.game_id, game.version);
            return Err(StoreError::StaleGame(game.game_id));
        }
        self.reload(game.game_id).await
    }

    async fn finish_game(&self, game: &Game, score: &Score) -> StoreResult<Game> {
        let state = serde_json::to_value(game)?;
        if queries::finish_game(&self.pool, game, state, score).await? == 0 {
            tracing::warn!("Stale finish rejected for game {} (version {})", game.game_id, game.version);
            return Err(StoreError::StaleGame(game.game_id));
        }
        self.reload(game.game_id).await
    }

    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()> {
        if queries::delete_game(&self.pool, game_id).await? == 0 {
            return Err(StoreError::GameNotFound(game_id));
        }
        Ok(())
    }

    async fn games_for_user(&self, user_id: Uuid, active_only: bool) -> StoreResult<Vec<Game>> {
        into_games(queries::get_user_games(&self.pool, user_id, active_only).await?)
    }

    async fn get_score(&self, score_id: Uuid) -> StoreResult<Option<Score>> {
        Ok(queries::get_score(&self.pool, score_id).await?)
    }

    async fn scores_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Score>> {
        Ok(queries::get_user_scores(&self.pool, user_id).await?)
    }

    async fn all_scores(&self) -> StoreResult<Vec<Score>> {
        Ok(queries::get_all_scores(&self.pool).await?)
    }
}
