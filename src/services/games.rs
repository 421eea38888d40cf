use uuid::Uuid;

use crate::{
    db::Store,
    error::{ApiError, ApiResult},
    game::{MoveOutcome, MoveValidator, Resolution, TurnEngine},
    models::{Game, MoveRecord, PlayerRef, Seat, User},
};

use super::users;

/// Result of a move request: the game as it now stands and what happened
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub game: Game,
    pub outcome: MoveOutcome,
}

impl MoveReport {
    pub fn message(&self) -> String {
        self.outcome.message()
    }
}

fn player_ref(user: &User) -> PlayerRef {
    PlayerRef {
        user_id: user.user_id,
        name: user.name.clone(),
    }
}

/// Start a game between two registered users on a shuffled board
pub async fn new_game(store: &dyn Store, first_name: &str, second_name: &str) -> ApiResult<Game> {
    let first = store.find_user(first_name).await?;
    let second = store.find_user(second_name).await?;
    let (first, second) = match (first, second) {
        (Some(first), Some(second)) => (first, second),
        _ => {
            return Err(ApiError::NotFound(
                "One of users with that name does not exist!".to_string(),
            ))
        }
    };
    if first.user_id == second.user_id {
        return Err(ApiError::InvalidRequest(
            "Please select two different users to play this game!".to_string(),
        ));
    }

    let game = {
        let mut rng = rand::rng();
        TurnEngine::new_game(player_ref(&first), player_ref(&second), &mut rng)?
    };
    store.insert_game(&game).await?;

    tracing::info!(
        "Started game {} between {} and {}",
        game.game_id,
        first.name,
        second.name
    );
    Ok(game)
}

pub async fn get_game(store: &dyn Store, game_id: Uuid) -> ApiResult<Game> {
    store
        .load_game(game_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Game not found!".to_string()))
}

/// Load, check, apply and persist one move.
///
/// Every check runs before the game is touched. A decisive finish is saved
/// together with its score; a draw removes the game.
pub async fn make_move(
    store: &dyn Store,
    game_id: Uuid,
    user_name: &str,
    row: i64,
    column: i64,
) -> ApiResult<MoveReport> {
    let mut game = get_game(store, game_id).await?;
    if game.game_over {
        return Err(ApiError::InvalidRequest("Game already over".to_string()));
    }

    let user = users::get_user(store, user_name).await?;
    let seat = game.seat_of(user.user_id).ok_or_else(|| {
        ApiError::InvalidRequest("You are not playing in this game!".to_string())
    })?;
    if seat != game.next_move {
        return Err(ApiError::InvalidRequest("It's not your turn!".to_string()));
    }

    MoveValidator::is_valid_move(&game.board, row, column, true)?;

    let acting_is_first = seat == Seat::First;
    let outcome = TurnEngine::make_move(&mut game, row, column, acting_is_first)?;

    let game = match &outcome {
        MoveOutcome::Finished(resolution @ Resolution::Decisive { .. }) => {
            let score = resolution.to_score(&game)?;
            let saved = store.finish_game(&game, &score).await?;
            tracing::info!(
                "Recorded score {} for game {}: {} to {}",
                score.score_id,
                game_id,
                score.winner_score,
                score.loser_score
            );
            saved
        }
        MoveOutcome::Finished(Resolution::Draw { .. }) => {
            // Drawn games are not scored and cannot be resumed
            let saved = store.save_game(&game).await?;
            store.delete_game(game_id).await?;
            tracing::info!("Discarded drawn game {}", game_id);
            saved
        }
        _ => store.save_game(&game).await?,
    };

    Ok(MoveReport { game, outcome })
}

/// Cancel a game that is still being played
pub async fn cancel_game(store: &dyn Store, game_id: Uuid) -> ApiResult<()> {
    let game = get_game(store, game_id).await?;
    if game.game_over {
        return Err(ApiError::InvalidRequest(
            "Game already over, it cannot be cancelled".to_string(),
        ));
    }

    store.delete_game(game_id).await?;
    tracing::info!("Cancelled game {}", game_id);
    Ok(())
}

/// Games the user is still playing
pub async fn user_games(store: &dyn Store, user_name: &str) -> ApiResult<Vec<Game>> {
    let user = users::get_user(store, user_name).await?;
    Ok(store.games_for_user(user.user_id, true).await?)
}

pub async fn history(store: &dyn Store, game_id: Uuid) -> ApiResult<Vec<MoveRecord>> {
    Ok(get_game(store, game_id).await?.history)
}
