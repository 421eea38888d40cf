use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Won,
    Draw,
}

/// Outbound snapshot of a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub game_id: Uuid,
    pub board: Vec<String>,
    pub first_user: String,
    pub second_user: String,
    pub next_move: String,
    pub game_over: bool,
    pub unmatched_pairs: u32,
    pub first_user_score: u32,
    pub second_user_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub outcome: GameOutcome,
    pub message: String,
}

impl GameView {
    pub fn new(game: &Game, message: impl Into<String>) -> Self {
        let outcome = if !game.game_over {
            GameOutcome::InProgress
        } else if game.winner.is_some() {
            GameOutcome::Won
        } else {
            GameOutcome::Draw
        };

        Self {
            game_id: game.game_id,
            board: game.board.render(),
            first_user: game.first_user.name.clone(),
            second_user: game.second_user.name.clone(),
            next_move: game.next_player().name.clone(),
            game_over: game.game_over,
            unmatched_pairs: game.unmatched_pairs,
            first_user_score: game.first_user_score,
            second_user_score: game.second_user_score,
            winner: game.winner_name().map(str::to_string),
            outcome,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::TurnEngine;
    use crate::models::game::fixtures::fixed_game;

    #[test]
    fn test_new_game_view() {
        let game = fixed_game();
        let view = GameView::new(&game, "Good luck");

        assert_eq!(view.board, vec!["? ? ? ?"; 4]);
        assert_eq!(view.next_move, "alice");
        assert_eq!(view.outcome, GameOutcome::InProgress);
        assert_eq!(view.unmatched_pairs, 8);
        assert!(view.winner.is_none());
        assert_eq!(view.message, "Good luck");
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut game = fixed_game();
        TurnEngine::make_move(&mut game, 0, 0, true).unwrap();

        let first = GameView::new(&game, "Time to make a move!");
        let second = GameView::new(&game, "Time to make a move!");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.board[0], "DEATH ? ? ?");
    }

    #[test]
    fn test_finished_view_names_winner() {
        let mut game = fixed_game();
        game.game_over = true;
        game.winner = Some(game.second_user.user_id);
        game.loser = Some(game.first_user.user_id);

        let view = GameView::new(&game, "done");
        assert_eq!(view.outcome, GameOutcome::Won);
        assert_eq!(view.winner.as_deref(), Some("bob"));

        game.winner = None;
        game.loser = None;
        assert_eq!(GameView::new(&game, "done").outcome, GameOutcome::Draw);
    }
}
