use chrono::Utc;
use rand::Rng;

use crate::models::{Game, Guess, MoveRecord, PendingTurn, PlayerRef, Seat};

use super::{
    board::Board,
    cards::build_deck,
    resolution::{GameResolver, Resolution},
    validator::MoveValidator,
    GameError,
};

pub const ONE_MORE_GUESS: &str = "One more guess to make";
pub const MATCH_MADE: &str = "You made a match";
pub const NOT_A_MATCH: &str = "Not a match";

/// What a single move did to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// First card of the turn is showing
    OneMoreGuess,
    /// Pair found, the same player goes again
    Match,
    /// Pair missed, the turn passes to the other player
    NotAMatch,
    /// The last pair was found
    Finished(Resolution),
}

impl MoveOutcome {
    pub fn message(&self) -> String {
        match self {
            MoveOutcome::OneMoreGuess => ONE_MORE_GUESS.to_string(),
            MoveOutcome::Match => MATCH_MADE.to_string(),
            MoveOutcome::NotAMatch => NOT_A_MATCH.to_string(),
            MoveOutcome::Finished(resolution) => resolution.message(),
        }
    }
}

pub struct TurnEngine;

impl TurnEngine {
    /// Start a game between two users on a freshly shuffled board.
    /// The first user moves first.
    pub fn new_game(
        first_user: PlayerRef,
        second_user: PlayerRef,
        rng: &mut impl Rng,
    ) -> Result<Game, GameError> {
        let mut deck = build_deck();
        let board = Board::build(&mut deck, rng)?;
        Ok(Game::new(first_user, second_user, board))
    }

    /// Flip the card at `(row, column)` for the acting player.
    ///
    /// Turn order and membership are checked by the caller. The move is
    /// validated here before anything is touched, so an error leaves the
    /// game exactly as it was.
    pub fn make_move(
        game: &mut Game,
        row: i64,
        column: i64,
        acting_is_first: bool,
    ) -> Result<MoveOutcome, GameError> {
        if game.game_over {
            return Err(GameError::GameOver);
        }
        MoveValidator::is_valid_move(&game.board, row, column, true)?;

        // Validated above, both are in range
        let (row, column) = (row as usize, column as usize);
        let seat = Seat::from_is_first(acting_is_first);

        let card = match game.board.get_mut(row, column) {
            Some(card) => {
                card.reveal();
                card.name
            }
            None => return Err(GameError::OutOfBounds { row: row as i64, column: column as i64 }),
        };
        let guess = Guess { card, row, column };

        let outcome = match game.pending.take() {
            Some(pending) if !pending.is_mismatched() => {
                Self::second_guess(game, pending, guess, seat)
            }
            previous => {
                if let Some(mismatched) = previous {
                    Self::hide_pair(&mut game.board, &mismatched);
                }
                game.pending = Some(PendingTurn::new(guess));
                MoveOutcome::OneMoreGuess
            }
        };

        tracing::debug!(
            "Game {}: {} flipped {} at ({}, {}): {:?}",
            game.game_id,
            game.player(seat).name,
            card.as_str(),
            row,
            column,
            outcome
        );

        let now = Utc::now();
        game.history.push(MoveRecord {
            player: game.player(seat).name.clone(),
            row,
            column,
            card,
            result: outcome.message(),
            made_at: now,
        });
        game.updated_at = now;

        Ok(outcome)
    }

    fn second_guess(game: &mut Game, pending: PendingTurn, guess: Guess, seat: Seat) -> MoveOutcome {
        if pending.first.card != guess.card {
            game.pending = Some(PendingTurn {
                first: pending.first,
                second: Some(guess),
            });
            game.next_move = seat.other();
            return MoveOutcome::NotAMatch;
        }

        for g in [pending.first, guess] {
            if let Some(card) = game.board.get_mut(g.row, g.column) {
                card.mark_matched();
            }
        }
        *game.score_mut(seat) += 1;
        game.unmatched_pairs = game.unmatched_pairs.saturating_sub(1);

        if game.unmatched_pairs == 0 {
            MoveOutcome::Finished(GameResolver::resolve(game))
        } else {
            MoveOutcome::Match
        }
    }

    /// Turn a missed pair face down again
    fn hide_pair(board: &mut Board, pending: &PendingTurn) {
        let guesses = std::iter::once(&pending.first).chain(pending.second.as_ref());
        for g in guesses {
            if let Some(card) = board.get_mut(g.row, g.column) {
                card.hide();
            }
        }
    }
}
