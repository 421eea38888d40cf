use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use super::store::{Store, StoreError, StoreResult};
use crate::models::{Game, Score, User};

/// Store kept in process memory. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// Index from user name to user_id, also guards name uniqueness
    user_names: DashMap<String, Uuid>,
    games: DashMap<Uuid, Game>,
    scores: DashMap<Uuid, Score>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_game_played(&self, user_id: Uuid, won: bool) {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            if won {
                user.wins += 1;
            }
            user.total_played += 1;
            user.updated_at = Utc::now();
        }
    }

    fn sorted_scores(&self, filter: impl Fn(&Score) -> bool) -> Vec<Score> {
        let mut scores: Vec<Score> = self
            .scores
            .iter()
            .filter(|s| filter(s.value()))
            .map(|s| s.value().clone())
            .collect();
        scores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        scores
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, name: &str, email: Option<&str>) -> StoreResult<User> {
        match self.user_names.entry(name.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateUser(name.to_string())),
            Entry::Vacant(slot) => {
                let user = User::new(name, email);
                self.users.insert(user.user_id, user.clone());
                slot.insert(user.user_id);
                Ok(user)
            }
        }
    }

    async fn find_user(&self, name: &str) -> StoreResult<Option<User>> {
        let Some(user_id) = self.user_names.get(name).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }

    async fn get_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.get(&user_id).map(|u| u.clone()))
    }

    async fn user_rankings(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|u| u.total_played > 0)
            .map(|u| u.value().clone())
            .collect();
        users.sort_by(|a, b| {
            b.win_percentage()
                .total_cmp(&a.win_percentage())
                .then(b.wins.cmp(&a.wins))
                .then(a.name.cmp(&b.name))
        });
        Ok(users)
    }

    async fn insert_game(&self, game: &Game) -> StoreResult<()> {
        self.games.insert(game.game_id, game.clone());
        Ok(())
    }

    async fn load_game(&self, game_id: Uuid) -> StoreResult<Option<Game>> {
        Ok(self.games.get(&game_id).map(|g| g.clone()))
    }

    async fn save_game(&self, game: &Game) -> StoreResult<Game> {
        let mut stored = self
            .games
            .get_mut(&game.game_id)
            .ok_or(StoreError::GameNotFound(game.game_id))?;
        if stored.version != game.version {
            return Err(StoreError::StaleGame(game.game_id));
        }

        let mut saved = game.clone();
        saved.version += 1;
        saved.updated_at = Utc::now();
        *stored = saved.clone();
        Ok(saved)
    }

    async fn finish_game(&self, game: &Game, score: &Score) -> StoreResult<Game> {
        // The entry guard is held until the score and both records are written
        let mut stored = self
            .games
            .get_mut(&game.game_id)
            .ok_or(StoreError::GameNotFound(game.game_id))?;
        if stored.version != game.version {
            return Err(StoreError::StaleGame(game.game_id));
        }

        let mut saved = game.clone();
        saved.version += 1;
        saved.updated_at = Utc::now();

        self.scores.insert(score.score_id, score.clone());
        self.record_game_played(score.winner_id, true);
        self.record_game_played(score.loser_id, false);

        *stored = saved.clone();
        Ok(saved)
    }

    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()> {
        self.games
            .remove(&game_id)
            .map(|_| ())
            .ok_or(StoreError::GameNotFound(game_id))
    }

    async fn games_for_user(&self, user_id: Uuid, active_only: bool) -> StoreResult<Vec<Game>> {
        let mut games: Vec<Game> = self
            .games
            .iter()
            .filter(|g| g.seat_of(user_id).is_some())
            .filter(|g| !active_only || !g.game_over)
            .map(|g| g.value().clone())
            .collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(games)
    }

    async fn get_score(&self, score_id: Uuid) -> StoreResult<Option<Score>> {
        Ok(self.scores.get(&score_id).map(|s| s.clone()))
    }

    async fn scores_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Score>> {
        Ok(self.sorted_scores(|s| s.winner_id == user_id || s.loser_id == user_id))
    }

    async fn all_scores(&self) -> StoreResult<Vec<Score>> {
        Ok(self.sorted_scores(|_| true))
    }
}
