//! Diagonal crossing rule
//!
//! Two stones on opposite corners of a 2x2 block are diagonally connected.
//! The connection is crossed when the other two corners of the same block
//! both belong to the opponent. A move that would complete such a crossing
//! is illegal: the two players' connective lines never cross.

use crate::board::{Board, Pos, Stone};
use crate::geometry::{diagonal_neighbors, is_diagonal_step};

/// Offsets to the diagonal partner of a cell inside each of its four 2x2 blocks
const BLOCK_DIAGONALS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// The two cells completing the 2x2 block spanned by the diagonal step `a`-`b`
#[inline]
pub fn cross_corners(a: Pos, b: Pos) -> (Pos, Pos) {
    (Pos::new(a.row, b.col), Pos::new(b.row, a.col))
}

/// True if the diagonal link `a`-`b` of `owner` is crossed by the opponent.
///
/// Non-diagonal pairs are never crossed.
pub fn is_diagonal_crossed(board: &Board, a: Pos, b: Pos, owner: Stone) -> bool {
    if !is_diagonal_step(a, b) {
        return false;
    }
    let opponent = owner.opponent();
    let (c1, c2) = cross_corners(a, b);
    board.get(c1) == opponent && board.get(c2) == opponent
}

/// Would a stone of `player` at `pos` form a diagonal with one of its own
/// stones whose orthogonal corners are both held by the opponent?
pub fn would_cross_opponent_diagonal(board: &Board, pos: Pos, player: Stone) -> bool {
    if !player.is_player() {
        return false;
    }
    diagonal_neighbors(pos, board.size())
        .into_iter()
        .any(|partner| {
            board.get(partner) == player && is_diagonal_crossed(board, pos, partner, player)
        })
}

/// Would an opponent stone at `pos` cut across one of `player`'s diagonal links?
///
/// This is the defender's view of the crossing rule: such a cell is one the
/// opponent may only take through a priority override.
pub fn would_cross_own_diagonal(board: &Board, pos: Pos, player: Stone) -> bool {
    if !player.is_player() {
        return false;
    }
    let opponent = player.opponent();

    for &(dr, dc) in &BLOCK_DIAGONALS {
        let far = (pos.row as i32 + dr, pos.col as i32 + dc);
        if !board.is_valid_position(far.0, far.1) {
            continue;
        }
        // The other diagonal of this block: (pos.row + dr, pos.col) and (pos.row, pos.col + dc)
        let a = Pos::new((pos.row as i32 + dr) as u8, pos.col);
        let b = Pos::new(pos.row, (pos.col as i32 + dc) as u8);
        let corner = Pos::new(far.0 as u8, far.1 as u8);

        if board.get(a) == player && board.get(b) == player && board.get(corner) == opponent {
            return true;
        }
    }
    false
}

/// On the board, empty, and not crossing an opponent diagonal
pub fn is_legal_move(board: &Board, pos: Pos, player: Stone) -> bool {
    board.contains(pos) && board.is_empty(pos) && !would_cross_opponent_diagonal(board, pos, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black on the main diagonal, White on the anti-diagonal of the block at (5,5)
    fn crossed_block() -> Board {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::Black);
        board.place_stone(Pos::new(5, 6), Stone::White);
        board.place_stone(Pos::new(6, 5), Stone::White);
        board
    }

    #[test]
    fn test_cross_corners() {
        let (c1, c2) = cross_corners(Pos::new(5, 5), Pos::new(6, 6));
        assert_eq!(c1, Pos::new(5, 6));
        assert_eq!(c2, Pos::new(6, 5));
    }

    #[test]
    fn test_crossed_block_marks_both_diagonals() {
        let board = crossed_block();
        assert!(is_diagonal_crossed(&board, Pos::new(5, 5), Pos::new(6, 6), Stone::Black));
        assert!(is_diagonal_crossed(&board, Pos::new(5, 6), Pos::new(6, 5), Stone::White));
    }

    #[test]
    fn test_orthogonal_pair_never_crossed() {
        let board = crossed_block();
        assert!(!is_diagonal_crossed(&board, Pos::new(5, 5), Pos::new(5, 6), Stone::Black));
    }

    #[test]
    fn test_would_cross_opponent_diagonal() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 6), Stone::White);
        board.place_stone(Pos::new(6, 5), Stone::White);
        board.place_stone(Pos::new(5, 5), Stone::Black);

        // Black at (6,6) would link (5,5)-(6,6) across White's diagonal
        assert!(would_cross_opponent_diagonal(&board, Pos::new(6, 6), Stone::Black));
        assert!(!is_legal_move(&board, Pos::new(6, 6), Stone::Black));
        // White at (6,6) is fine
        assert!(!would_cross_opponent_diagonal(&board, Pos::new(6, 6), Stone::White));
    }

    #[test]
    fn test_would_cross_own_diagonal() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 6), Stone::White);
        board.place_stone(Pos::new(6, 5), Stone::White);
        board.place_stone(Pos::new(5, 5), Stone::Black);

        // From White's side: a Black stone at (6,6) would cut White's link
        assert!(would_cross_own_diagonal(&board, Pos::new(6, 6), Stone::White));
        assert!(!would_cross_own_diagonal(&board, Pos::new(6, 6), Stone::Black));
        assert!(!would_cross_own_diagonal(&board, Pos::new(9, 9), Stone::White));
    }

    #[test]
    fn test_legal_move_requires_empty() {
        let board = crossed_block();
        assert!(!is_legal_move(&board, Pos::new(5, 5), Stone::White));
        assert!(is_legal_move(&board, Pos::new(0, 0), Stone::White));
    }
}
