use crate::models::{Game, PlayerRef, Score, Seat};

use super::GameError;

/// How a finished game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Decisive {
        winner: PlayerRef,
        loser: PlayerRef,
        winner_score: u32,
        loser_score: u32,
    },
    /// Equal scores. Nothing is recorded and the game is discarded.
    Draw { score: u32 },
}

impl Resolution {
    pub fn message(&self) -> String {
        match self {
            Resolution::Decisive {
                winner,
                winner_score,
                loser_score,
                ..
            } => format!(
                "Game over, {} wins {} to {}!",
                winner.name, winner_score, loser_score
            ),
            Resolution::Draw { score } => {
                format!("Game over, it's a draw with {} pairs each!", score)
            }
        }
    }

    /// Score entry to record for this result
    pub fn to_score(&self, game: &Game) -> Result<Score, GameError> {
        match self {
            Resolution::Decisive {
                winner,
                loser,
                winner_score,
                loser_score,
            } => Score::new(
                game.game_id,
                winner.user_id,
                loser.user_id,
                *winner_score,
                *loser_score,
            ),
            Resolution::Draw { score } => Err(GameError::InvalidScore(*score)),
        }
    }
}

pub struct GameResolver;

impl GameResolver {
    /// Close the game once every pair is matched and decide the winner
    pub fn resolve(game: &mut Game) -> Resolution {
        game.game_over = true;
        game.pending = None;

        let first = game.first_user_score;
        let second = game.second_user_score;

        let winner = match first.cmp(&second) {
            std::cmp::Ordering::Greater => Seat::First,
            std::cmp::Ordering::Less => Seat::Second,
            std::cmp::Ordering::Equal => {
                tracing::info!("Game {} ended in a draw at {} each", game.game_id, first);
                game.winner = None;
                game.loser = None;
                return Resolution::Draw { score: first };
            }
        };

        let winner_ref = game.player(winner).clone();
        let loser_ref = game.player(winner.other()).clone();
        game.winner = Some(winner_ref.user_id);
        game.loser = Some(loser_ref.user_id);

        tracing::info!(
            "Game {} won by {} ({} to {})",
            game.game_id,
            winner_ref.name,
            first.max(second),
            first.min(second)
        );

        Resolution::Decisive {
            winner: winner_ref,
            loser: loser_ref,
            winner_score: first.max(second),
            loser_score: first.min(second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::fixtures::fixed_game;

    #[test]
    fn test_first_user_wins() {
        let mut game = fixed_game();
        game.first_user_score = 5;
        game.second_user_score = 3;
        game.unmatched_pairs = 0;

        let resolution = GameResolver::resolve(&mut game);
        assert!(game.game_over);
        assert_eq!(game.winner, Some(game.first_user.user_id));
        assert_eq!(game.loser, Some(game.second_user.user_id));
        assert_eq!(
            resolution,
            Resolution::Decisive {
                winner: game.first_user.clone(),
                loser: game.second_user.clone(),
                winner_score: 5,
                loser_score: 3,
            }
        );
        assert_eq!(resolution.message(), "Game over, alice wins 5 to 3!");
    }

    #[test]
    fn test_second_user_wins() {
        let mut game = fixed_game();
        game.first_user_score = 1;
        game.second_user_score = 7;

        let resolution = GameResolver::resolve(&mut game);
        assert_eq!(game.winner, Some(game.second_user.user_id));
        assert_eq!(game.winner_name(), Some("bob"));

        let score = resolution.to_score(&game).unwrap();
        assert_eq!(score.winner_id, game.second_user.user_id);
        assert_eq!(score.winner_score, 7);
        assert_eq!(score.loser_score, 1);
        assert_eq!(score.game_id, game.game_id);
    }

    #[test]
    fn test_equal_scores_are_a_draw() {
        let mut game = fixed_game();
        game.first_user_score = 4;
        game.second_user_score = 4;

        let resolution = GameResolver::resolve(&mut game);
        assert_eq!(resolution, Resolution::Draw { score: 4 });
        assert!(game.game_over);
        assert!(game.is_draw());
        assert!(game.winner.is_none());
        assert!(game.loser.is_none());
        assert_eq!(resolution.to_score(&game), Err(GameError::InvalidScore(4)));
    }
}
