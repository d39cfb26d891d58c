//! Gap blocking detection
//!
//! A gap is blocked when the opponent has made it unrealizable, even if
//! some of its fill cells are still empty:
//! - L/I class: at least half (rounded up) of the diagonal sightlines
//!   between the endpoints and the empty fill cells are crossed
//! - D class: the fill cell has two or more opponent stones on its diagonals
//! - surrounded: every empty fill cell is mostly enclosed by the opponent
//! - exhausted: no fill cell is empty any more
//!
//! Results are cached per gap and invalidated whenever the move count changes.

use std::collections::HashMap;

use tracing::trace;

use crate::board::{Board, Pos, Stone};
use crate::geometry::{diagonal_neighbors, gap_cells, is_diagonal_step, neighbors8, PatternClass};
use crate::rules::is_diagonal_crossed;

use super::registry::{Gap, GapKey};

/// Share of a cell's neighbours the opponent must hold for it to count as surrounded
const SURROUNDED_RATIO: f32 = 0.6;

/// Why a gap was judged blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    CrossedSightlines,
    DiagonalPressure,
    Surrounded,
    Exhausted,
}

/// Blocking detector with a move-count keyed cache
#[derive(Debug, Default, Clone)]
pub struct BlockingDetector {
    generation: usize,
    cache: HashMap<GapKey, Option<BlockReason>>,
    hits: u64,
    misses: u64,
}

impl BlockingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached verdict
    pub fn clear(&mut self) {
        self.cache.clear();
        self.generation = 0;
    }

    /// (hits, misses) since creation
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn sync_generation(&mut self, board: &Board) {
        if board.move_count() != self.generation {
            self.cache.clear();
            self.generation = board.move_count();
        }
    }

    /// True if the pattern behind `gap` can no longer be realized by `owner`
    pub fn is_gap_blocked(&mut self, board: &Board, gap: &Gap) -> bool {
        self.block_reason(board, gap.key, gap.class, gap.owner).is_some()
    }

    /// Cached blocking verdict for the pattern `key` of `owner`
    pub fn block_reason(
        &mut self,
        board: &Board,
        key: GapKey,
        class: PatternClass,
        owner: Stone,
    ) -> Option<BlockReason> {
        self.sync_generation(board);
        if let Some(&reason) = self.cache.get(&key) {
            self.hits += 1;
            return reason;
        }
        self.misses += 1;
        let reason = evaluate_blocking(board, key, class, owner);
        if let Some(r) = reason {
            trace!(gap = %key, reason = ?r, "gap blocked");
        }
        self.cache.insert(key, reason);
        reason
    }

    /// After `mover` played at `pos`, the opponent gaps near `pos` that are now blocked
    pub fn check_pattern_blocking_after_move<'a>(
        &mut self,
        board: &Board,
        gaps: impl IntoIterator<Item = &'a Gap>,
        pos: Pos,
        mover: Stone,
    ) -> Vec<GapKey> {
        let victim = mover.opponent();
        let mut blocked = Vec::new();
        for gap in gaps {
            if gap.owner != victim || !gap.is_near(pos) {
                continue;
            }
            if self.block_reason(board, gap.key, gap.class, gap.owner).is_some() {
                blocked.push(gap.key);
            }
        }
        blocked
    }
}

fn evaluate_blocking(
    board: &Board,
    key: GapKey,
    class: PatternClass,
    owner: Stone,
) -> Option<BlockReason> {
    let (a, b) = key.endpoints();
    let empty: Vec<Pos> = gap_cells(a, b, board.size())
        .into_iter()
        .filter(|&c| board.is_empty(c))
        .collect();

    if empty.is_empty() {
        return Some(BlockReason::Exhausted);
    }

    let opponent = owner.opponent();
    match class {
        PatternClass::D => {
            let pressure = empty.iter().any(|&cell| {
                diagonal_neighbors(cell, board.size())
                    .into_iter()
                    .filter(|&n| board.get(n) == opponent)
                    .count()
                    >= 2
            });
            if pressure {
                return Some(BlockReason::DiagonalPressure);
            }
        }
        PatternClass::L | PatternClass::I => {
            let mut relevant: usize = 0;
            let mut crossed: usize = 0;
            for &cell in &empty {
                for end in [a, b] {
                    if is_diagonal_step(end, cell) {
                        relevant += 1;
                        if is_diagonal_crossed(board, end, cell, owner) {
                            crossed += 1;
                        }
                    }
                }
            }
            if relevant > 0 && crossed >= relevant.div_ceil(2) {
                return Some(BlockReason::CrossedSightlines);
            }
        }
    }

    if empty.iter().all(|&cell| is_surrounded(board, cell, opponent)) {
        return Some(BlockReason::Surrounded);
    }
    None
}

/// More than 60% of the cell's on-board neighbours belong to `opponent`
pub fn is_surrounded(board: &Board, cell: Pos, opponent: Stone) -> bool {
    let around = neighbors8(cell, board.size());
    if around.is_empty() {
        return false;
    }
    let held = around.iter().filter(|&&n| board.get(n) == opponent).count();
    held as f32 / around.len() as f32 > SURROUNDED_RATIO
}
