use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ApiResult,
    game::GameView,
    models::MoveRecord,
    services::games,
    AppState,
};

pub const TIME_TO_MOVE: &str = "Time to make a move!";

#[derive(Debug, Deserialize)]
pub struct NewGameRequest {
    pub first_user: String,
    pub second_user: String,
}

#[derive(Debug, Deserialize)]
pub struct MakeMoveRequest {
    /// Name of the user making the move
    pub name: String,
    pub row: i64,
    pub column: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create a new game of memory for two users
pub async fn new_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewGameRequest>,
) -> ApiResult<(StatusCode, Json<GameView>)> {
    let game = games::new_game(state.store.as_ref(), &payload.first_user, &payload.second_user).await?;
    let message = format!(
        "Good luck playing Memory, it's {}'s turn first!",
        game.first_user.name
    );
    Ok((StatusCode::CREATED, Json(GameView::new(&game, message))))
}

/// Return the current game state
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<Json<GameView>> {
    let game = games::get_game(state.store.as_ref(), game_id).await?;
    Ok(Json(GameView::new(&game, TIME_TO_MOVE)))
}

/// Flip a card. Returns the game state with a message describing the move.
pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<MakeMoveRequest>,
) -> ApiResult<Json<GameView>> {
    tracing::debug!(
        "Move in game {} by {} at ({}, {})",
        game_id,
        payload.name,
        payload.row,
        payload.column
    );

    let report = games::make_move(
        state.store.as_ref(),
        game_id,
        &payload.name,
        payload.row,
        payload.column,
    )
    .await?;

    Ok(Json(GameView::new(&report.game, report.message())))
}

pub async fn cancel_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    games::cancel_game(state.store.as_ref(), game_id).await?;
    Ok(Json(MessageResponse {
        message: "Game cancelled".to_string(),
    }))
}

pub async fn game_history(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MoveRecord>>> {
    Ok(Json(games::history(state.store.as_ref(), game_id).await?))
}
