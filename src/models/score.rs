use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::game::GameError;

/// Result of a finished game that had a strict winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Score {
    pub score_id: Uuid,
    pub game_id: Uuid,
    pub winner_id: Uuid,
    pub loser_id: Uuid,
    pub winner_score: i32,
    pub loser_score: i32,
    pub created_at: DateTime<Utc>,
}

impl Score {
    /// Scores are only kept for decisive games; equal scores are a draw
    pub fn new(
        game_id: Uuid,
        winner_id: Uuid,
        loser_id: Uuid,
        winner_score: u32,
        loser_score: u32,
    ) -> Result<Self, GameError> {
        if winner_score == loser_score {
            return Err(GameError::InvalidScore(winner_score));
        }

        Ok(Self {
            score_id: Uuid::new_v4(),
            game_id,
            winner_id,
            loser_id,
            winner_score: winner_score.max(loser_score) as i32,
            loser_score: winner_score.min(loser_score) as i32,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_orders_points() {
        let score = Score::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 3, 5).unwrap();
        assert_eq!(score.winner_score, 5);
        assert_eq!(score.loser_score, 3);
    }

    #[test]
    fn test_equal_scores_rejected() {
        let result = Score::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 4, 4);
        assert_eq!(result, Err(GameError::InvalidScore(4)));
    }
}
