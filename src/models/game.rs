use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::game::{board::Board, cards::CardName};

/// One of the two places at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn from_is_first(is_first: bool) -> Self {
        if is_first {
            Seat::First
        } else {
            Seat::Second
        }
    }

    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// A user taking part in a game. The name is unique and never changes,
/// so it is kept next to the id for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub user_id: Uuid,
    pub name: String,
}

/// A single card picked during the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub card: CardName,
    pub row: usize,
    pub column: usize,
}

/// Guesses made so far in the turn being played.
///
/// Exists from the first guess of a turn until either a match clears it or
/// the next move hides a mismatched pair and starts over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTurn {
    pub first: Guess,
    pub second: Option<Guess>,
}

impl PendingTurn {
    pub fn new(first: Guess) -> Self {
        Self {
            first,
            second: None,
        }
    }

    /// Both guesses are in and they did not match
    pub fn is_mismatched(&self) -> bool {
        self.second.is_some()
    }
}

/// Entry in a game's move history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: String,
    pub row: usize,
    pub column: usize,
    pub card: CardName,
    pub result: String,
    pub made_at: DateTime<Utc>,
}

/// Full state of one memory game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: Uuid,
    pub board: Board,
    pub first_user: PlayerRef,
    pub second_user: PlayerRef,
    pub next_move: Seat,
    pub first_user_score: u32,
    pub second_user_score: u32,
    pub unmatched_pairs: u32,
    pub game_over: bool,
    pub winner: Option<Uuid>,
    pub loser: Option<Uuid>,
    pub pending: Option<PendingTurn>,
    #[serde(default)]
    pub history: Vec<MoveRecord>,
    /// Bumped by the store on every successful save
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn new(first_user: PlayerRef, second_user: PlayerRef, board: Board) -> Self {
        let now = Utc::now();
        Self {
            game_id: Uuid::new_v4(),
            board,
            first_user,
            second_user,
            next_move: Seat::First,
            first_user_score: 0,
            second_user_score: 0,
            unmatched_pairs: CardName::ALL.len() as u32,
            game_over: false,
            winner: None,
            loser: None,
            pending: None,
            history: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn player(&self, seat: Seat) -> &PlayerRef {
        match seat {
            Seat::First => &self.first_user,
            Seat::Second => &self.second_user,
        }
    }

    pub fn score(&self, seat: Seat) -> u32 {
        match seat {
            Seat::First => self.first_user_score,
            Seat::Second => self.second_user_score,
        }
    }

    pub fn score_mut(&mut self, seat: Seat) -> &mut u32 {
        match seat {
            Seat::First => &mut self.first_user_score,
            Seat::Second => &mut self.second_user_score,
        }
    }

    /// Seat held by the given user, if they play in this game
    pub fn seat_of(&self, user_id: Uuid) -> Option<Seat> {
        if self.first_user.user_id == user_id {
            Some(Seat::First)
        } else if self.second_user.user_id == user_id {
            Some(Seat::Second)
        } else {
            None
        }
    }

    pub fn next_player(&self) -> &PlayerRef {
        self.player(self.next_move)
    }

    pub fn winner_name(&self) -> Option<&str> {
        let winner = self.winner?;
        self.seat_of(winner).map(|seat| self.player(seat).name.as_str())
    }

    pub fn is_draw(&self) -> bool {
        self.game_over && self.winner.is_none()
    }
}

/// Row of the `games` table. The full game lives in the `state` column,
/// the rest is duplicated for querying and version checks.
#[derive(Debug, Clone, FromRow)]
pub struct GameRecord {
    pub game_id: Uuid,
    pub first_user_id: Uuid,
    pub second_user_id: Uuid,
    pub game_over: bool,
    pub winner_id: Option<Uuid>,
    pub loser_id: Option<Uuid>,
    pub state: serde_json::Value,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameRecord {
    pub fn into_game(self) -> Result<Game, serde_json::Error> {
        let mut game: Game = serde_json::from_value(self.state)?;
        game.version = self.version;
        game.created_at = self.created_at;
        game.updated_at = self.updated_at;
        Ok(game)
    }
}
