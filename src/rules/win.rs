//! Win condition checking
//!
//! A player wins with a chain of own stones touching both of its goal edges.
//! Stones chain through any of the 8 neighbours; a diagonal step only counts
//! while the opponent does not hold both other corners of that 2x2 block.

use std::collections::VecDeque;

use crate::board::{Axis, Board, Pos, Stone};
use crate::geometry::neighbors8;

use super::crossing::is_diagonal_crossed;

/// True if `stone` has a chain between its two edges
pub fn has_connection(board: &Board, stone: Stone) -> bool {
    find_winning_path(board, stone).is_some()
}

/// Breadth-first search from the start edge to the end edge.
///
/// Returns the connecting stones ordered from the start edge to the end edge.
pub fn find_winning_path(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let axis = stone.axis()?;
    let size = board.size();
    let last = size - 1;

    // No chain can exist without a stone on each goal edge
    if !board.stones(stone)?.spans_edges(axis, size) {
        return None;
    }

    let mut parent: Vec<Option<Pos>> = vec![None; crate::board::TOTAL_CELLS];
    let mut seen = vec![false; crate::board::TOTAL_CELLS];
    let mut queue = VecDeque::new();

    for pos in board.player_positions(stone) {
        if axis.along(pos) == 0 {
            seen[pos.to_index()] = true;
            queue.push_back(pos);
        }
    }

    while let Some(pos) = queue.pop_front() {
        if axis.along(pos) == last {
            return Some(trace_path(&parent, pos));
        }

        for next in neighbors8(pos, size) {
            if seen[next.to_index()] || board.get(next) != stone {
                continue;
            }
            if is_diagonal_crossed(board, pos, next, stone) {
                continue;
            }
            seen[next.to_index()] = true;
            parent[next.to_index()] = Some(pos);
            queue.push_back(next);
        }
    }

    None
}

fn trace_path(parent: &[Option<Pos>], end: Pos) -> Vec<Pos> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = parent[current.to_index()] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Edge a path has to start from, for display purposes
pub fn start_edge_name(axis: Axis) -> &'static str {
    match axis {
        Axis::Vertical => "top",
        Axis::Horizontal => "left",
    }
}
