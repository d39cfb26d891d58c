//! Final legality gate for engine moves
//!
//! Checks run in a fixed order: format, bounds, emptiness, diagonal crossing.
//! Critical priority waives the crossing check and nothing else.

use thiserror::Error;

use crate::board::{Board, Pos, Stone};

use super::crossing::would_cross_opponent_diagonal;

/// How hard a candidate pushes past the crossing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPriority {
    #[default]
    Normal,
    /// Defensive moves that must land even across an opponent diagonal
    Critical,
}

/// Why a candidate move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("malformed move ({row}, {col}) for {player:?}")]
    Malformed { row: i32, col: i32, player: Stone },

    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    #[error("cell {0} is already occupied")]
    Occupied(Pos),

    #[error("move at {0} would cross an opponent diagonal")]
    CrossesDiagonal(Pos),
}

/// Stateless validator
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveValidator;

impl MoveValidator {
    /// Validate a candidate given as raw coordinates.
    ///
    /// # Returns
    /// The on-board position on success, or the first failed check.
    pub fn validate(
        board: &Board,
        row: i32,
        col: i32,
        player: Stone,
        priority: ValidationPriority,
    ) -> Result<Pos, MoveRejection> {
        // 1. Format
        if row < 0 || col < 0 || !player.is_player() {
            return Err(MoveRejection::Malformed { row, col, player });
        }

        // 2. Bounds
        let Some(pos) = board.pos_at(row, col) else {
            return Err(MoveRejection::OutOfBounds {
                row,
                col,
                size: board.size(),
            });
        };

        // 3. Emptiness
        if !board.is_empty(pos) {
            return Err(MoveRejection::Occupied(pos));
        }

        // 4. Diagonal crossing, waived under Critical priority
        if would_cross_opponent_diagonal(board, pos, player)
            && priority != ValidationPriority::Critical
        {
            return Err(MoveRejection::CrossesDiagonal(pos));
        }

        Ok(pos)
    }

    /// Validate an already typed position
    pub fn validate_pos(
        board: &Board,
        pos: Pos,
        player: Stone,
        priority: ValidationPriority,
    ) -> Result<Pos, MoveRejection> {
        Self::validate(board, pos.row as i32, pos.col as i32, player, priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossed_block() -> Board {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::Black);
        board.place_stone(Pos::new(5, 6), Stone::White);
        board.place_stone(Pos::new(6, 5), Stone::White);
        board
    }

    #[test]
    fn test_accepts_plain_move() {
        let board = Board::new();
        let result = MoveValidator::validate(&board, 7, 7, Stone::Black, ValidationPriority::Normal);
        assert_eq!(result, Ok(Pos::new(7, 7)));
    }

    #[test]
    fn test_rejects_negative_as_malformed() {
        let board = Board::new();
        let result = MoveValidator::validate(&board, -1, 3, Stone::Black, ValidationPriority::Critical);
        assert!(matches!(result, Err(MoveRejection::Malformed { .. })));
    }

    #[test]
    fn test_rejects_empty_player() {
        let board = Board::new();
        let result = MoveValidator::validate(&board, 3, 3, Stone::Empty, ValidationPriority::Normal);
        assert!(matches!(result, Err(MoveRejection::Malformed { .. })));
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let board = Board::with_size(9);
        let result = MoveValidator::validate(&board, 9, 0, Stone::White, ValidationPriority::Normal);
        assert_eq!(
            result,
            Err(MoveRejection::OutOfBounds { row: 9, col: 0, size: 9 })
        );
    }

    #[test]
    fn test_every_cell_of_crossed_block_rejected() {
        let board = crossed_block();
        for (r, c) in [(5, 5), (5, 6), (6, 5), (6, 6)] {
            for player in [Stone::Black, Stone::White] {
                for priority in [ValidationPriority::Normal, ValidationPriority::Critical] {
                    assert!(
                        MoveValidator::validate(&board, r, c, player, priority).is_err(),
                        "({}, {}) accepted for {:?}",
                        r,
                        c,
                        player
                    );
                }
            }
        }
    }

    #[test]
    fn test_crossing_rejected_unless_critical() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 6), Stone::White);
        board.place_stone(Pos::new(6, 5), Stone::White);
        board.place_stone(Pos::new(5, 5), Stone::Black);

        let normal = MoveValidator::validate(&board, 6, 6, Stone::Black, ValidationPriority::Normal);
        assert_eq!(normal, Err(MoveRejection::CrossesDiagonal(Pos::new(6, 6))));

        let critical =
            MoveValidator::validate(&board, 6, 6, Stone::Black, ValidationPriority::Critical);
        assert_eq!(critical, Ok(Pos::new(6, 6)));
    }

    #[test]
    fn test_critical_does_not_waive_occupancy() {
        let board = crossed_block();
        let result = MoveValidator::validate_pos(
            &board,
            Pos::new(5, 5),
            Stone::White,
            ValidationPriority::Critical,
        );
        assert_eq!(result, Err(MoveRejection::Occupied(Pos::new(5, 5))));
    }
}
