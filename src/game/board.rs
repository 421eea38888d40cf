use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    cards::{Card, Deck},
    GameError,
};

/// Placeholder shown for a face-down card
pub const HIDDEN_CARD: &str = "?";

/// Square grid of cards, fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: Vec<Vec<Card>>,
}

impl Board {
    /// Lay out the deck on a square board in random order.
    ///
    /// The deck is consumed: each step takes a uniformly random remaining card
    /// and places it in the next free cell, row by row.
    pub fn build(deck: &mut Deck, rng: &mut impl Rng) -> Result<Self, GameError> {
        let dimension = square_dimension(deck.len())?;

        let mut rows = Vec::with_capacity(dimension);
        for _ in 0..dimension {
            let mut row = Vec::with_capacity(dimension);
            for _ in 0..dimension {
                let idx = rng.random_range(0..deck.len());
                row.push(deck.swap_remove(idx));
            }
            rows.push(row);
        }

        tracing::debug!("Built {}x{} grid board", dimension, dimension);
        Ok(Self { rows })
    }

    /// Build a board with a known layout
    pub fn from_rows(rows: Vec<Vec<Card>>) -> Result<Self, GameError> {
        let dimension = rows.len();
        let cells: usize = rows.iter().map(Vec::len).sum();
        if dimension == 0 || rows.iter().any(|row| row.len() != dimension) {
            return Err(GameError::InvalidDeck(cells));
        }
        Ok(Self { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Card> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut Card> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.rows.iter().flatten()
    }

    /// One line per row, face-down cards shown as `?`
    pub fn render(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|card| {
                        if card.is_flipped() {
                            card.name.as_str()
                        } else {
                            HIDDEN_CARD
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

fn square_dimension(len: usize) -> Result<usize, GameError> {
    let mut dimension = 0;
    while (dimension + 1) * (dimension + 1) <= len {
        dimension += 1;
    }
    if dimension == 0 || dimension * dimension != len {
        return Err(GameError::InvalidDeck(len));
    }
    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{build_deck, CardName};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_board_is_four_by_four() {
        let mut deck = build_deck();
        let board = Board::build(&mut deck, &mut rand::rng()).unwrap();
        assert_eq!(board.height(), 4);
        assert_eq!(board.width(), 4);
        assert!(deck.is_empty(), "building the board should consume the deck");
    }

    #[test]
    fn test_every_symbol_placed_twice() {
        for seed in 0..50 {
            let mut deck = build_deck();
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::build(&mut deck, &mut rng).unwrap();
            for name in CardName::ALL {
                let count = board.cards().filter(|card| card.name == name).count();
                assert_eq!(count, 2, "seed {}: {:?} placed {} times", seed, name, count);
            }
        }
    }

    #[test]
    fn test_dimension_squared_matches_deck_size() {
        for dimension in 1..6 {
            let mut deck: Deck = (0..dimension * dimension)
                .map(|i| Card::new(CardName::ALL[i % CardName::ALL.len()]))
                .collect();
            let size = deck.len();
            let board = Board::build(&mut deck, &mut rand::rng()).unwrap();
            assert_eq!(board.height() * board.width(), size);
        }
    }

    #[test]
    fn test_non_square_deck_rejected() {
        let mut deck = build_deck();
        deck.pop();
        assert_eq!(
            Board::build(&mut deck, &mut rand::rng()),
            Err(GameError::InvalidDeck(15))
        );

        let mut empty = Deck::new();
        assert_eq!(
            Board::build(&mut empty, &mut rand::rng()),
            Err(GameError::InvalidDeck(0))
        );
    }

    #[test]
    fn test_render_hides_face_down_cards() {
        let mut board = Board::from_rows(vec![
            vec![Card::new(CardName::Death), Card::new(CardName::Fool)],
            vec![Card::new(CardName::Fool), Card::new(CardName::Death)],
        ])
        .unwrap();
        board.get_mut(0, 1).unwrap().reveal();
        board.get_mut(1, 1).unwrap().mark_matched();

        assert_eq!(board.render(), vec!["? FOOL", "? DEATH"]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_grid() {
        let result = Board::from_rows(vec![
            vec![Card::new(CardName::Death), Card::new(CardName::Fool)],
            vec![Card::new(CardName::Fool)],
        ]);
        assert_eq!(result, Err(GameError::InvalidDeck(3)));
    }
}
