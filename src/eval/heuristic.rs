//! Cell scoring heuristics
//!
//! Small local measures used by the handlers to break ties between
//! otherwise equivalent cells:
//! - own and opponent stones around a cell
//! - progress toward a player's nearer border
//! - how exposed the diagonal links created by a stone would be

use crate::board::{Board, Pos, Stone};
use crate::geometry::{border_distance, diagonal_neighbors, neighbors8};
use crate::rules::{cross_corners, would_cross_opponent_diagonal, would_cross_own_diagonal};

/// Weight per adjacent opponent stone (blocking value)
const OPPONENT_PROXIMITY_WEIGHT: i32 = 20;

/// Weight per adjacent own stone (connectivity)
const OWN_CONNECTIVITY_WEIGHT: i32 = 15;

/// Weight per row (or column) gained toward the nearer border
const BORDER_PROGRESS_WEIGHT: i32 = 30;

/// Penalty per diagonal link the opponent could cut with one move
const EXPOSED_LINK_PENALTY: i32 = 40;

/// Count `stone` in the 8-neighbourhood of `pos`
pub fn adjacent_count(board: &Board, pos: Pos, stone: Stone) -> usize {
    neighbors8(pos, board.size())
        .into_iter()
        .filter(|&n| board.get(n) == stone)
        .count()
}

/// Rows (or columns) gained toward the nearer target border by moving
/// from `from` to `to`. Negative when moving back toward the centre.
pub fn border_progress(from: Pos, to: Pos, player: Stone, size: usize) -> i32 {
    let Some(axis) = player.axis() else {
        return 0;
    };
    let before = border_distance(from, axis, size).nearer() as i32;
    let after = border_distance(to, axis, size).nearer() as i32;
    before - after
}

/// Diagonal links a stone of `player` at `pos` would form that the opponent
/// could cross with a single move (one corner theirs, the other empty).
///
/// An open corner the opponent may not take, because a stone there would
/// cut another of `player`'s links, leaves the link safe.
pub fn exposed_links(board: &Board, pos: Pos, player: Stone) -> usize {
    let opponent = player.opponent();
    let open_to_opponent = |corner: Pos| !would_cross_own_diagonal(board, corner, player);
    diagonal_neighbors(pos, board.size())
        .into_iter()
        .filter(|&partner| board.get(partner) == player)
        .filter(|&partner| {
            let (c1, c2) = cross_corners(pos, partner);
            match (board.get(c1), board.get(c2)) {
                (s1, Stone::Empty) if s1 == opponent => open_to_opponent(c2),
                (Stone::Empty, s2) if s2 == opponent => open_to_opponent(c1),
                _ => false,
            }
        })
        .count()
}

/// Security of a cell for `player`: 0 when safe, negative per exposed link,
/// `i32::MIN / 2` when the placement itself would cross an opponent diagonal.
pub fn security(board: &Board, pos: Pos, player: Stone) -> i32 {
    if would_cross_opponent_diagonal(board, pos, player) {
        return i32::MIN / 2;
    }
    -(exposed_links(board, pos, player) as i32) * EXPOSED_LINK_PENALTY
}

/// Value of extending diagonally from `origin` to `cell`
pub fn diagonal_extension_value(board: &Board, origin: Pos, cell: Pos, player: Stone) -> i32 {
    let proximity = adjacent_count(board, cell, player.opponent()) as i32;
    let connectivity = adjacent_count(board, cell, player) as i32;
    let progress = border_progress(origin, cell, player, board.size());

    proximity * OPPONENT_PROXIMITY_WEIGHT
        + connectivity * OWN_CONNECTIVITY_WEIGHT
        + progress * BORDER_PROGRESS_WEIGHT
        + security(board, cell, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_count() {
        let mut board = Board::new();
        board.place_stone(Pos::new(4, 4), Stone::Black);
        board.place_stone(Pos::new(4, 5), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::White);
        assert_eq!(adjacent_count(&board, Pos::new(5, 5), Stone::Black), 2);
        assert_eq!(adjacent_count(&board, Pos::new(5, 5), Stone::White), 1);
        assert_eq!(adjacent_count(&board, Pos::new(0, 0), Stone::Black), 0);
    }

    #[test]
    fn test_border_progress() {
        // Black: row 4 -> row 3 is one step closer to the top edge
        assert_eq!(border_progress(Pos::new(4, 7), Pos::new(3, 8), Stone::Black, 15), 1);
        // Moving toward the middle loses ground
        assert_eq!(border_progress(Pos::new(4, 7), Pos::new(5, 8), Stone::Black, 15), -1);
        // White measures columns
        assert_eq!(border_progress(Pos::new(7, 11), Pos::new(6, 12), Stone::White, 15), 1);
    }

    #[test]
    fn test_exposed_links() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(5, 6), Stone::White);
        // Black at (6,6) links with (5,5); White holds (5,6), (6,5) is empty
        assert_eq!(exposed_links(&board, Pos::new(6, 6), Stone::Black), 1);
        assert!(security(&board, Pos::new(6, 6), Stone::Black) < 0);

        board.place_stone(Pos::new(6, 5), Stone::White);
        assert_eq!(security(&board, Pos::new(6, 6), Stone::Black), i32::MIN / 2);
    }

    #[test]
    fn test_link_safe_when_open_corner_is_forbidden() {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(5, 6), Stone::White);
        assert_eq!(exposed_links(&board, Pos::new(6, 6), Stone::Black), 1);

        // White at (6,5) would now cut Black's (6,4)-(7,5) link
        board.place_stone(Pos::new(6, 4), Stone::Black);
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 4), Stone::White);
        assert!(would_cross_own_diagonal(&board, Pos::new(6, 5), Stone::Black));
        assert_eq!(exposed_links(&board, Pos::new(6, 6), Stone::Black), 0);
        assert_eq!(security(&board, Pos::new(6, 6), Stone::Black), 0);
    }

    #[test]
    fn test_diagonal_value_prefers_progress() {
        let mut board = Board::new();
        board.place_stone(Pos::new(4, 7), Stone::Black);
        let up = diagonal_extension_value(&board, Pos::new(4, 7), Pos::new(3, 8), Stone::Black);
        let down = diagonal_extension_value(&board, Pos::new(4, 7), Pos::new(5, 8), Stone::Black);
        assert!(up > down);
    }
}
