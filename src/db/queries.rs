use sqlx::{PgExecutor, PgPool, Result};
use uuid::Uuid;

use crate::models::{Game, GameRecord, Score, User};

// User queries
pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_by_name(pool: &PgPool, name: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// Insert a new user. A taken name surfaces as a unique violation.
pub async fn create_user(pool: &PgPool, user: &User) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (user_id, name, email, wins, total_played, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user.user_id)
    .bind(&user.name)
    .bind(user.email.as_deref())
    .bind(user.wins)
    .bind(user.total_played)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .await
}

/// Users who have finished at least one game, best win rate first
pub async fn get_ranked_users(pool: &PgPool) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT * FROM users
        WHERE total_played > 0
        ORDER BY (wins::REAL / total_played) DESC, wins DESC, name
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Count a finished game against a user's record
pub async fn record_game_played<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    won: bool,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET wins = wins + $1,
            total_played = total_played + 1,
            updated_at = NOW()
        WHERE user_id = $2
        "#,
    )
    .bind(if won { 1_i32 } else { 0_i32 })
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}

// Game queries
pub async fn create_game(pool: &PgPool, game: &Game, state: serde_json::Value) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO games (
            game_id, first_user_id, second_user_id, game_over,
            winner_id, loser_id, state, version, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(game.game_id)
    .bind(game.first_user.user_id)
    .bind(game.second_user.user_id)
    .bind(game.game_over)
    .bind(game.winner)
    .bind(game.loser)
    .bind(state)
    .bind(game.version)
    .bind(game.created_at)
    .bind(game.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_game(pool: &PgPool, game_id: Uuid) -> Result<Option<GameRecord>> {
    sqlx::query_as::<_, GameRecord>("SELECT * FROM games WHERE game_id = $1")
        .bind(game_id)
        .fetch_optional(pool)
        .await
}

/// Write the game back if nobody else has saved it since it was loaded.
///
/// Returns the number of rows updated: 0 means the stored version moved on.
pub async fn update_game<'e>(
    executor: impl PgExecutor<'e>,
    game: &Game,
    state: serde_json::Value,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET game_over = $1,
            winner_id = $2,
            loser_id = $3,
            state = $4,
            version = version + 1,
            updated_at = NOW()
        WHERE game_id = $5 AND version = $6
        "#,
    )
    .bind(game.game_over)
    .bind(game.winner)
    .bind(game.loser)
    .bind(state)
    .bind(game.game_id)
    .bind(game.version)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_game(pool: &PgPool, game_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM games WHERE game_id = $1")
        .bind(game_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn get_user_games(
    pool: &PgPool,
    user_id: Uuid,
    active_only: bool,
) -> Result<Vec<GameRecord>> {
    sqlx::query_as::<_, GameRecord>(
        r#"
        SELECT * FROM games
        WHERE (first_user_id = $1 OR second_user_id = $1)
          AND (NOT $2 OR game_over = FALSE)
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(active_only)
    .fetch_all(pool)
    .await
}

/// Save a decisive game together with its score and both players' records.
///
/// Runs in one transaction. Returns 0 without writing anything if the game
/// was saved by someone else in the meantime.
pub async fn finish_game(
    pool: &PgPool,
    game: &Game,
    state: serde_json::Value,
    score: &Score,
) -> Result<u64> {
    let mut tx = pool.begin().await?;

    let updated = update_game(&mut *tx, game, state).await?;
    if updated == 0 {
        tx.rollback().await?;
        return Ok(0);
    }

    insert_score(&mut *tx, score).await?;
    record_game_played(&mut *tx, score.winner_id, true).await?;
    record_game_played(&mut *tx, score.loser_id, false).await?;

    tx.commit().await?;
    Ok(updated)
}

// Score queries
pub async fn insert_score<'e>(executor: impl PgExecutor<'e>, score: &Score) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO scores (
            score_id, game_id, winner_id, loser_id, winner_score, loser_score, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(score.score_id)
    .bind(score.game_id)
    .bind(score.winner_id)
    .bind(score.loser_id)
    .bind(score.winner_score)
    .bind(score.loser_score)
    .bind(score.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_score(pool: &PgPool, score_id: Uuid) -> Result<Option<Score>> {
    sqlx::query_as::<_, Score>("SELECT * FROM scores WHERE score_id = $1")
        .bind(score_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_user_scores(pool: &PgPool, user_id: Uuid) -> Result<Vec<Score>> {
    sqlx::query_as::<_, Score>(
        r#"
        SELECT * FROM scores
        WHERE winner_id = $1 OR loser_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get_all_scores(pool: &PgPool) -> Result<Vec<Score>> {
    sqlx::query_as::<_, Score>("SELECT * FROM scores ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}
