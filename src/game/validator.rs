use super::{board::Board, GameError};

pub struct MoveValidator;

impl MoveValidator {
    /// Check that a requested move lands on a face-down card inside the board.
    ///
    /// With `raise_on_invalid` set, an invalid move is reported as an error.
    /// Otherwise the result is `Ok(false)`.
    pub fn is_valid_move(
        board: &Board,
        row: i64,
        column: i64,
        raise_on_invalid: bool,
    ) -> Result<bool, GameError> {
        match Self::check(board, row, column) {
            Ok(()) => Ok(true),
            Err(e) if raise_on_invalid => Err(e),
            Err(e) => {
                tracing::debug!("Rejected move ({}, {}): {}", row, column, e);
                Ok(false)
            }
        }
    }

    fn check(board: &Board, row: i64, column: i64) -> Result<(), GameError> {
        let (r, c) = Self::on_board(board, row, column)
            .ok_or(GameError::OutOfBounds { row, column })?;

        match board.get(r, c) {
            Some(card) if card.is_flipped() => Err(GameError::AlreadyFlipped { row: r, column: c }),
            Some(_) => Ok(()),
            None => Err(GameError::OutOfBounds { row, column }),
        }
    }

    /// Convert a requested coordinate into a board index if it is in range
    fn on_board(board: &Board, row: i64, column: i64) -> Option<(usize, usize)> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(column).ok()?;
        (r < board.height() && c < board.width()).then_some((r, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{build_deck, Card, CardName};

    fn board() -> Board {
        let mut deck = build_deck();
        Board::build(&mut deck, &mut rand::rng()).unwrap()
    }

    #[test]
    fn test_moves_inside_board_are_valid() {
        let board = board();
        for row in 0..4 {
            for column in 0..4 {
                assert_eq!(MoveValidator::is_valid_move(&board, row, column, true), Ok(true));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_raises() {
        let board = board();
        for (row, column) in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100)] {
            assert_eq!(
                MoveValidator::is_valid_move(&board, row, column, true),
                Err(GameError::OutOfBounds { row, column })
            );
        }
    }

    #[test]
    fn test_out_of_bounds_without_raising_returns_false() {
        let board = board();
        assert_eq!(MoveValidator::is_valid_move(&board, -1, 2, false), Ok(false));
        assert_eq!(MoveValidator::is_valid_move(&board, 2, 4, false), Ok(false));
    }

    #[test]
    fn test_flipped_card_is_invalid() {
        let mut board = Board::from_rows(vec![
            vec![Card::new(CardName::Lovers), Card::new(CardName::Hermit)],
            vec![Card::new(CardName::Hermit), Card::new(CardName::Lovers)],
        ])
        .unwrap();
        board.get_mut(0, 1).unwrap().reveal();
        board.get_mut(1, 0).unwrap().mark_matched();

        assert_eq!(
            MoveValidator::is_valid_move(&board, 0, 1, true),
            Err(GameError::AlreadyFlipped { row: 0, column: 1 })
        );
        assert_eq!(
            MoveValidator::is_valid_move(&board, 1, 0, true),
            Err(GameError::AlreadyFlipped { row: 1, column: 0 })
        );
        assert_eq!(MoveValidator::is_valid_move(&board, 0, 1, false), Ok(false));
        assert_eq!(MoveValidator::is_valid_move(&board, 1, 1, false), Ok(true));
    }
}
