//! Fragment and head tracking
//!
//! Fragments are rebuilt from scratch every turn: a union-find pass over
//! one player's stones, joining stones that touch (diagonals only while
//! uncrossed) or that form an active pattern in the gap registry.

use tracing::trace;

use crate::board::{Axis, Board, Pos, Stone, TOTAL_CELLS};
use crate::geometry::{
    border_distance, classify, gap_cells, is_adjacent, neighbors8, Direction, PatternClass,
};
use crate::rules::{is_diagonal_crossed, is_legal_move};

use super::registry::{is_usable, GapRegistry};

/// Which end of a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum HeadSide {
    /// Extremal stone toward the start edge (top or left)
    Near,
    /// Extremal stone toward the end edge (bottom or right)
    Far,
}

impl HeadSide {
    pub fn other(self) -> Self {
        match self {
            HeadSide::Near => HeadSide::Far,
            HeadSide::Far => HeadSide::Near,
        }
    }

    /// Sign of travel along the axis when extending from this head
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            HeadSide::Near => -1,
            HeadSide::Far => 1,
        }
    }
}

/// A connected group of one player's stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Row-major
    pub stones: Vec<Pos>,
    pub axis: Axis,
    pub touches_start: bool,
    pub touches_end: bool,
    pub near_head: Pos,
    pub far_head: Pos,
    pub score: i32,
}

impl Fragment {
    /// Build a fragment from stones assumed connected. `None` when empty.
    pub fn from_stones(mut stones: Vec<Pos>, axis: Axis, size: usize) -> Option<Self> {
        stones.sort();
        let first = *stones.first()?;
        let mut near = first;
        let mut far = first;
        for &s in &stones {
            if axis.along(s) < axis.along(near) {
                near = s;
            }
            if axis.along(s) > axis.along(far) {
                far = s;
            }
        }
        let last = size - 1;
        let touches_start = axis.along(near) == 0;
        let touches_end = axis.along(far) == last;

        let mut score = 10 * stones.len() as i32;
        score += 100 * (touches_start as i32 + touches_end as i32);
        if touches_start && touches_end {
            score += 1000;
        }
        let near_dist = border_distance(near, axis, size).to_start;
        let far_dist = border_distance(far, axis, size).to_end;
        score += (last - near_dist) as i32 + (last - far_dist) as i32;

        Some(Self {
            stones,
            axis,
            touches_start,
            touches_end,
            near_head: near,
            far_head: far,
            score,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.stones.len()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.stones.binary_search(&pos).is_ok()
    }

    #[inline]
    pub fn head(&self, side: HeadSide) -> Pos {
        match side {
            HeadSide::Near => self.near_head,
            HeadSide::Far => self.far_head,
        }
    }

    /// Distance from a head to the border it is heading for
    pub fn head_distance(&self, side: HeadSide, size: usize) -> usize {
        let d = border_distance(self.head(side), self.axis, size);
        match side {
            HeadSide::Near => d.to_start,
            HeadSide::Far => d.to_end,
        }
    }

    /// False once the head is within one step of its border
    pub fn can_extend(&self, side: HeadSide, size: usize) -> bool {
        self.head_distance(side, size) > 1
    }

    pub fn touches(&self, side: HeadSide) -> bool {
        match side {
            HeadSide::Near => self.touches_start,
            HeadSide::Far => self.touches_end,
        }
    }

    /// Smallest Chebyshev distance between two fragments, with the closest pair
    pub fn closest_pair(&self, other: &Fragment) -> Option<(Pos, Pos, i32)> {
        let mut best: Option<(Pos, Pos, i32)> = None;
        for &a in &self.stones {
            for &b in &other.stones {
                let d = a.chebyshev(b);
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((a, b, d));
                }
            }
        }
        best
    }
}

/// Compass direction a head should grow toward
pub fn head_direction(axis: Axis, side: HeadSide) -> Direction {
    match (axis, side) {
        (Axis::Vertical, HeadSide::Near) => Direction::North,
        (Axis::Vertical, HeadSide::Far) => Direction::South,
        (Axis::Horizontal, HeadSide::Near) => Direction::West,
        (Axis::Horizontal, HeadSide::Far) => Direction::East,
    }
}

/// A move bridging two fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionMove {
    pub cell: Pos,
    /// Stone of the first fragment the cell attaches to
    pub from: Pos,
    /// Stone of the second fragment the cell attaches to
    pub to: Pos,
    /// Pattern class of the weaker of the two links (None when both touch)
    pub class: Option<PatternClass>,
    pub score: i32,
}

/// Per-turn fragment partition for one player
#[derive(Debug, Clone, Default)]
pub struct FragmentTracker {
    player: Option<Stone>,
    size: usize,
    fragments: Vec<Fragment>,
    active: Option<usize>,
}

impl FragmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Recompute every fragment of `player` from the board
    pub fn update(&mut self, board: &Board, player: Stone, registry: Option<&GapRegistry>) {
        self.player = Some(player);
        self.size = board.size();
        self.fragments.clear();
        self.active = None;

        let Some(axis) = player.axis() else {
            return;
        };
        let stones = board.player_positions(player);
        if stones.is_empty() {
            return;
        }

        let mut index = vec![usize::MAX; TOTAL_CELLS];
        for (i, s) in stones.iter().enumerate() {
            index[s.to_index()] = i;
        }
        let mut uf = UnionFind::new(stones.len());

        for (i, &s) in stones.iter().enumerate() {
            for n in neighbors8(s, board.size()) {
                let j = index[n.to_index()];
                if j == usize::MAX || j <= i {
                    continue;
                }
                if !is_diagonal_crossed(board, s, n, player) {
                    uf.union(i, j);
                }
            }
        }
        if let Some(reg) = registry {
            for gap in reg.gaps_of(player) {
                let (a, b) = gap.endpoints();
                let (ia, ib) = (index[a.to_index()], index[b.to_index()]);
                if ia != usize::MAX && ib != usize::MAX {
                    uf.union(ia, ib);
                }
            }
        }

        let mut groups: Vec<Vec<Pos>> = Vec::new();
        let mut group_of_root = vec![usize::MAX; stones.len()];
        for (i, &s) in stones.iter().enumerate() {
            let root = uf.find(i);
            if group_of_root[root] == usize::MAX {
                group_of_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[group_of_root[root]].push(s);
        }

        self.fragments = groups
            .into_iter()
            .filter_map(|g| Fragment::from_stones(g, axis, board.size()))
            .collect();

        // Highest score wins, earliest fragment on ties
        let mut best: Option<(usize, i32)> = None;
        for (i, f) in self.fragments.iter().enumerate() {
            if best.map_or(true, |(_, score)| f.score > score) {
                best = Some((i, f.score));
            }
        }
        self.active = best.map(|(i, _)| i);

        trace!(
            player = player.name(),
            fragments = self.fragments.len(),
            active_size = self.active_fragment().map_or(0, |f| f.size()),
            "fragments rebuilt"
        );
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn active_fragment(&self) -> Option<&Fragment> {
        self.active.and_then(|i| self.fragments.get(i))
    }

    /// Fragments by descending score, active first
    pub fn ranked(&self) -> Vec<&Fragment> {
        let mut ranked: Vec<&Fragment> = self.fragments.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// (near, far) heads of the active fragment
    pub fn heads(&self) -> Option<(Pos, Pos)> {
        self.active_fragment().map(|f| (f.near_head, f.far_head))
    }

    pub fn can_extend(&self, side: HeadSide) -> bool {
        self.active_fragment()
            .is_some_and(|f| f.can_extend(side, self.size))
    }

    pub fn head_direction(&self, side: HeadSide) -> Option<Direction> {
        let axis = self.player?.axis()?;
        Some(head_direction(axis, side))
    }

    /// Fragment nearest to the active one, with its distance
    pub fn nearest_to_active(&self) -> Option<(&Fragment, i32)> {
        let active = self.active?;
        let base = &self.fragments[active];
        self.fragments
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != active)
            .filter_map(|(_, f)| base.closest_pair(f).map(|(_, _, d)| (f, d)))
            .min_by_key(|&(_, d)| d)
    }

    /// Best single stone bridging fragments `a` and `b`.
    ///
    /// Candidates are empty legal cells that touch or form a pattern with a
    /// stone of each fragment. Touching links score 4, L links 3, I links 2
    /// and D links 1; the pair with the highest total wins.
    pub fn best_connection_move(
        &self,
        board: &Board,
        a: &Fragment,
        b: &Fragment,
    ) -> Option<ConnectionMove> {
        let player = self.player?;
        let size = board.size();

        // Two stones already at pattern distance: play the gap itself
        if let Some((x, y, 2)) = a.closest_pair(b) {
            let (dr, dc) = x.delta(y);
            if classify(dr, dc).is_some() {
                let cell = gap_cells(x, y, size)
                    .into_iter()
                    .find(|&c| is_usable(board, x, y, c, player) && is_legal_move(board, c, player));
                if let Some(cell) = cell {
                    return Some(ConnectionMove {
                        cell,
                        from: x,
                        to: y,
                        class: None,
                        score: 8,
                    });
                }
            }
        }

        let mut best: Option<ConnectionMove> = None;
        for &x in &a.stones {
            for &y in &b.stones {
                if x.chebyshev(y) > 4 {
                    continue;
                }
                for cell in window(x, 2, size) {
                    if cell.chebyshev(y) > 2 || !is_legal_move(board, cell, player) {
                        continue;
                    }
                    let (Some(lx), Some(ly)) = (link_value(cell, x), link_value(cell, y)) else {
                        continue;
                    };
                    let score = lx.0 + ly.0;
                    let class = match (lx.1, ly.1) {
                        (None, c) | (c, None) => c,
                        (Some(c1), Some(c2)) => {
                            if link_strength(c1) <= link_strength(c2) {
                                Some(c1)
                            } else {
                                Some(c2)
                            }
                        }
                    };
                    if best.map_or(true, |m| score > m.score) {
                        best = Some(ConnectionMove {
                            cell,
                            from: x,
                            to: y,
                            class,
                            score,
                        });
                    }
                }
            }
        }
        best
    }
}

/// Cells within `radius` of `center`, row-major
fn window(center: Pos, radius: i32, size: usize) -> impl Iterator<Item = Pos> {
    (-radius..=radius).flat_map(move |dr| {
        (-radius..=radius).filter_map(move |dc| {
            let row = center.row as i32 + dr;
            let col = center.col as i32 + dc;
            (row >= 0 && col >= 0 && row < size as i32 && col < size as i32)
                .then(|| Pos::new(row as u8, col as u8))
        })
    })
}

fn link_strength(class: PatternClass) -> i32 {
    match class {
        PatternClass::L => 3,
        PatternClass::I => 2,
        PatternClass::D => 1,
    }
}

/// Strength of the link between a candidate cell and a stone
fn link_value(cell: Pos, stone: Pos) -> Option<(i32, Option<PatternClass>)> {
    if is_adjacent(cell, stone) {
        return Some((4, None));
    }
    let (dr, dc) = cell.delta(stone);
    classify(dr, dc).map(|c| (link_strength(c), Some(c)))
}

/// Minimal union-find with path halving
#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Keep the lower index as root so group order follows stone order
            if ra < rb {
                self.parent[rb] = ra;
            } else {
                self.parent[ra] = rb;
            }
        }
    }
}
