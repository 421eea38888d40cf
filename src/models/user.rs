use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    /// Unique display name, also used to look the user up
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub total_played: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub name: String,
    pub email: Option<String>,
    pub wins: i32,
    pub total_played: i32,
    pub win_percentage: f32,
}

impl User {
    pub fn new(name: &str, email: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.map(str::to_string),
            wins: 0,
            total_played: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Share of played games that were won, 0 before the first game
    pub fn win_percentage(&self) -> f32 {
        if self.total_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.total_played as f32
        }
    }

    pub fn to_stats(&self) -> UserStats {
        UserStats {
            name: self.name.clone(),
            email: self.email.clone(),
            wins: self.wins,
            total_played: self.total_played,
            win_percentage: self.win_percentage(),
        }
    }
}
