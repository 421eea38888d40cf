use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::ApiResult,
    game::GameView,
    models::{Score, UserStats},
    services::{games, users},
    AppState,
};

use super::games::{MessageResponse, TIME_TO_MOVE};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: Option<String>,
}

/// Create a user. Names must be unique.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let user = users::create_user(state.store.as_ref(), &payload.name, payload.email.as_deref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("User {} created!", user.name),
        }),
    ))
}

pub async fn rankings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<UserStats>>> {
    Ok(Json(users::rankings(state.store.as_ref()).await?))
}

/// All of a user's active games
pub async fn user_games(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<GameView>>> {
    let games = games::user_games(state.store.as_ref(), &name).await?;
    Ok(Json(
        games
            .iter()
            .map(|game| GameView::new(game, TIME_TO_MOVE))
            .collect(),
    ))
}

pub async fn user_scores(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<Score>>> {
    Ok(Json(users::user_scores(state.store.as_ref(), &name).await?))
}

pub async fn all_scores(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Score>>> {
    Ok(Json(users::all_scores(state.store.as_ref()).await?))
}

pub async fn get_score(
    State(state): State<Arc<AppState>>,
    Path(score_id): Path<Uuid>,
) -> ApiResult<Json<Score>> {
    Ok(Json(users::get_score(state.store.as_ref(), score_id).await?))
}
