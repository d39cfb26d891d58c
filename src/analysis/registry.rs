//! Gap/pattern registry
//!
//! Live index of every unrealized two-stone pattern on the board. A pattern
//! is registered once, when its second stone is placed, and dropped as soon
//! as it is realized (the owner took a fill cell) or blocked. Fill cells and
//! usable cells are recomputed from the board on every refresh.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::eval::{attack_priority, banded, gap_positional_bonus, PriorityScore};
use crate::geometry::{classify, gap_cells, PatternClass, ALL_VECTORS};
use crate::rules::is_diagonal_crossed;

use super::blocking::BlockingDetector;

/// Identity of a pattern: its endpoints in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GapKey {
    a: Pos,
    b: Pos,
}

impl GapKey {
    pub fn new(p: Pos, q: Pos) -> Self {
        if p <= q {
            Self { a: p, b: q }
        } else {
            Self { a: q, b: p }
        }
    }

    #[inline]
    pub fn endpoints(self) -> (Pos, Pos) {
        (self.a, self.b)
    }

    pub fn contains(self, pos: Pos) -> bool {
        self.a == pos || self.b == pos
    }
}

impl fmt::Display for GapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Externally visible view of an active pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gap {
    pub key: GapKey,
    pub owner: Stone,
    pub class: PatternClass,
    /// Empty cells adjacent to both endpoints
    pub fill_cells: Vec<Pos>,
    /// Fill cells whose links to both endpoints are not crossed
    pub usable_cells: Vec<Pos>,
    pub blocked: bool,
    /// The owner occupies a fill cell
    pub realized: bool,
    /// Exactly one usable cell left
    pub threatened: bool,
    /// Priority for the owner (defense when threatened, fill otherwise)
    pub priority: i32,
    /// Priority for the opponent attacking this gap
    pub attack_priority: i32,
}

impl Gap {
    #[inline]
    pub fn endpoints(&self) -> (Pos, Pos) {
        self.key.endpoints()
    }

    /// At least two usable cells
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.usable_cells.len() >= 2
    }

    /// Within two cells of an endpoint
    pub fn is_near(&self, pos: Pos) -> bool {
        let (a, b) = self.endpoints();
        a.chebyshev(pos) <= 2 || b.chebyshev(pos) <= 2
    }
}

/// Counts for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GapStats {
    pub black_threatened: usize,
    pub black_safe: usize,
    pub white_threatened: usize,
    pub white_safe: usize,
    pub active: usize,
    pub registered_total: usize,
    pub realized_total: usize,
    pub blocked_total: usize,
}

/// Registry of active patterns for both players
#[derive(Debug, Clone, Default)]
pub struct GapRegistry {
    gaps: BTreeMap<GapKey, Gap>,
    detector: BlockingDetector,
    /// History entries already processed
    processed: usize,
    /// Last processed history entry, to detect a replaced game
    last_seen: Option<(Pos, Stone)>,
    size: usize,
    registered_total: usize,
    realized_total: usize,
    blocked_total: usize,
}

impl GapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Bring the registry up to date with `board`.
    ///
    /// Only moves played since the previous call are scanned for new
    /// patterns; every gap is then refreshed and blocked or realized ones
    /// are dropped. Calling it twice on the same board changes nothing.
    pub fn on_board_changed(&mut self, board: &Board) {
        let history = board.history();
        if self.size == 0 {
            self.size = board.size();
        }
        let replaced = history.len() < self.processed
            || board.size() != self.size
            || (self.processed > 0 && history.get(self.processed - 1).copied() != self.last_seen);
        if replaced {
            debug!(
                processed = self.processed,
                moves = history.len(),
                "board history changed, rebuilding gap registry"
            );
            self.clear();
            self.size = board.size();
        }

        if history.len() == self.processed && !replaced {
            return;
        }

        for &(pos, stone) in &history[self.processed..] {
            self.register_patterns_from(board, pos, stone);
            let blocked = self
                .detector
                .check_pattern_blocking_after_move(board, self.gaps.values(), pos, stone);
            for key in blocked {
                if let Some(gap) = self.gaps.get_mut(&key) {
                    gap.blocked = true;
                }
            }
        }
        self.processed = history.len();
        self.last_seen = history.last().copied();

        self.refresh_all(board);
        self.cleanup_blocked_patterns();
    }

    /// Register a pattern for every same-colour stone at a pattern vector from `pos`
    fn register_patterns_from(&mut self, board: &Board, pos: Pos, stone: Stone) {
        for v in ALL_VECTORS {
            let Some(partner) = board.pos_at(pos.row as i32 + v.dr, pos.col as i32 + v.dc) else {
                continue;
            };
            if board.get(partner) != stone {
                continue;
            }
            let key = GapKey::new(pos, partner);
            if self.gaps.contains_key(&key) {
                continue;
            }
            // Already connected through an own fill cell
            if gap_cells(pos, partner, board.size())
                .iter()
                .any(|&c| board.get(c) == stone)
            {
                continue;
            }
            trace!(gap = %key, class = v.class.name(), owner = stone.name(), "pattern registered");
            self.gaps.insert(
                key,
                Gap {
                    key,
                    owner: stone,
                    class: v.class,
                    fill_cells: Vec::new(),
                    usable_cells: Vec::new(),
                    blocked: false,
                    realized: false,
                    threatened: false,
                    priority: 0,
                    attack_priority: 0,
                },
            );
            self.registered_total += 1;
        }
    }

    fn refresh_all(&mut self, board: &Board) {
        for gap in self.gaps.values_mut() {
            refresh_gap(gap, board, &mut self.detector);
        }
    }

    /// Drop gaps that are blocked, realized or left without a usable cell.
    ///
    /// # Returns
    /// Number of gaps removed
    pub fn cleanup_blocked_patterns(&mut self) -> usize {
        let before = self.gaps.len();
        let mut realized = 0;
        let mut blocked = 0;
        self.gaps.retain(|key, gap| {
            if gap.realized {
                trace!(gap = %key, "pattern realized");
                realized += 1;
                false
            } else if gap.blocked || gap.usable_cells.is_empty() {
                trace!(gap = %key, "pattern blocked");
                blocked += 1;
                false
            } else {
                true
            }
        });
        self.blocked_total += blocked;
        self.realized_total += realized;
        before - self.gaps.len()
    }

    pub fn get(&self, key: GapKey) -> Option<&Gap> {
        self.gaps.get(&key)
    }

    /// True if `a` and `b` form an active pattern of `owner`
    pub fn links(&self, a: Pos, b: Pos, owner: Stone) -> bool {
        self.gaps
            .get(&GapKey::new(a, b))
            .is_some_and(|g| g.owner == owner)
    }

    pub fn gaps(&self) -> impl Iterator<Item = &Gap> {
        self.gaps.values()
    }

    pub fn gaps_of(&self, owner: Stone) -> impl Iterator<Item = &Gap> {
        self.gaps.values().filter(move |g| g.owner == owner)
    }

    /// Own gaps with exactly one usable cell, highest priority first
    pub fn own_threatened_gaps(&self, player: Stone) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps_of(player).filter(|g| g.threatened).collect();
        gaps.sort_by(|x, y| y.priority.cmp(&x.priority).then(x.key.cmp(&y.key)));
        gaps
    }

    /// Own gaps with two or more usable cells, highest priority first
    pub fn own_safe_gaps(&self, player: Stone) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps_of(player).filter(|g| g.is_safe()).collect();
        gaps.sort_by(|x, y| y.priority.cmp(&x.priority).then(x.key.cmp(&y.key)));
        gaps
    }

    /// Every gap of `opponent`, highest attack priority first
    pub fn opponent_vulnerable_gaps(&self, opponent: Stone) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps_of(opponent).collect();
        gaps.sort_by(|x, y| {
            y.attack_priority
                .cmp(&x.attack_priority)
                .then(x.key.cmp(&y.key))
        });
        gaps
    }

    pub fn has_any_gaps(&self, player: Stone) -> bool {
        self.gaps_of(player).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn stats(&self) -> GapStats {
        let mut stats = GapStats {
            active: self.gaps.len(),
            registered_total: self.registered_total,
            realized_total: self.realized_total,
            blocked_total: self.blocked_total,
            ..GapStats::default()
        };
        for gap in self.gaps.values() {
            match (gap.owner, gap.threatened) {
                (Stone::Black, true) => stats.black_threatened += 1,
                (Stone::Black, false) => stats.black_safe += 1,
                (Stone::White, true) => stats.white_threatened += 1,
                (Stone::White, false) => stats.white_safe += 1,
                (Stone::Empty, _) => {}
            }
        }
        stats
    }
}

/// Recompute the board-derived fields of `gap`
fn refresh_gap(gap: &mut Gap, board: &Board, detector: &mut BlockingDetector) {
    let (a, b) = gap.endpoints();
    let cells = gap_cells(a, b, board.size());

    if cells.iter().any(|&c| board.get(c) == gap.owner) {
        gap.realized = true;
        gap.fill_cells.clear();
        gap.usable_cells.clear();
        gap.threatened = false;
        return;
    }

    gap.fill_cells = cells.into_iter().filter(|&c| board.is_empty(c)).collect();
    gap.usable_cells = gap
        .fill_cells
        .iter()
        .copied()
        .filter(|&c| is_usable(board, a, b, c, gap.owner))
        .collect();
    gap.blocked = gap.blocked || detector.is_gap_blocked(board, gap);
    gap.threatened = gap.usable_cells.len() == 1;

    let axis = gap.owner.axis().unwrap_or(crate::board::Axis::Vertical);
    let bonus = gap_positional_bonus(gap.class, a, b, axis, board.size());
    gap.priority = if gap.threatened {
        banded(PriorityScore::THREAT_DEFENSE, bonus)
    } else {
        banded(PriorityScore::SAFE_GAP_FILL, bonus)
    };
    gap.attack_priority = banded(attack_priority(gap.usable_cells.len()), bonus);
}

/// Empty, and neither endpoint link to the cell is a crossed diagonal
pub fn is_usable(board: &Board, a: Pos, b: Pos, cell: Pos, owner: Stone) -> bool {
    board.is_empty(cell)
        && !is_diagonal_crossed(board, a, cell, owner)
        && !is_diagonal_crossed(board, b, cell, owner)
}

/// Pattern class of two positions, if they are at a pattern vector
pub fn pattern_between(a: Pos, b: Pos) -> Option<PatternClass> {
    let (dr, dc) = a.delta(b);
    classify(dr, dc)
}
