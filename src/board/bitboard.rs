//! Per-player stone sets
//!
//! Cells are indexed row-major with a fixed stride of [`MAX_BOARD_SIZE`], so
//! one layout serves every supported board size. A board smaller than the
//! stride simply leaves the tail of each row unused.

use super::{Axis, Pos, MAX_BOARD_SIZE, TOTAL_CELLS};

const WORDS: usize = TOTAL_CELLS.div_ceil(64);

/// Word index and bit mask of a cell
#[inline]
fn slot(pos: Pos) -> (usize, u64) {
    let idx = pos.to_index();
    (idx / 64, 1u64 << (idx % 64))
}

/// Set of cells held by one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    words: [u64; WORDS],
}

impl Bitboard {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    #[inline]
    pub fn insert(&mut self, pos: Pos) {
        let (w, mask) = slot(pos);
        self.words[w] |= mask;
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        let (w, mask) = slot(pos);
        self.words[w] & mask != 0
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Any cell on line `index` across `axis` on a board of `size`.
    ///
    /// For the vertical axis the line is row `index`, for the horizontal axis
    /// it is column `index`. Line 0 and line `size - 1` are the goal edges.
    pub fn touches_line(&self, axis: Axis, index: usize, size: usize) -> bool {
        if index >= size.min(MAX_BOARD_SIZE) {
            return false;
        }
        (0..size).any(|other| {
            let pos = match axis {
                Axis::Vertical => Pos::new(index as u8, other as u8),
                Axis::Horizontal => Pos::new(other as u8, index as u8),
            };
            self.contains(pos)
        })
    }

    /// True when both goal edges of `axis` hold at least one cell
    pub fn spans_edges(&self, axis: Axis, size: usize) -> bool {
        size > 0 && self.touches_line(axis, 0, size) && self.touches_line(axis, size - 1, size)
    }

    /// Set cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            Ones(word)
                .map(move |bit| w * 64 + bit)
                .filter(|&idx| idx < TOTAL_CELLS)
                .map(Pos::from_index)
        })
    }
}

/// Bit offsets of the set bits of one word, lowest first
struct Ones(u64);

impl Iterator for Ones {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_iterate_row_major() {
        let mut bb = Bitboard::new();
        for pos in [Pos::new(18, 18), Pos::new(3, 4), Pos::new(3, 2), Pos::new(0, 0)] {
            bb.insert(pos);
        }
        assert_eq!(bb.len(), 4);
        assert!(bb.contains(Pos::new(3, 4)));
        assert!(!bb.contains(Pos::new(4, 3)));
        let cells: Vec<Pos> = bb.iter().collect();
        assert_eq!(
            cells,
            vec![Pos::new(0, 0), Pos::new(3, 2), Pos::new(3, 4), Pos::new(18, 18)]
        );
    }

    #[test]
    fn test_touches_line_per_axis() {
        let mut bb = Bitboard::new();
        bb.insert(Pos::new(0, 6));
        assert!(bb.touches_line(Axis::Vertical, 0, 15));
        assert!(!bb.touches_line(Axis::Horizontal, 0, 15));
        assert!(bb.touches_line(Axis::Horizontal, 6, 15));
        // Out of range lines never match
        assert!(!bb.touches_line(Axis::Vertical, 15, 15));
    }

    #[test]
    fn test_spans_edges_respects_board_size() {
        let mut bb = Bitboard::new();
        bb.insert(Pos::new(0, 3));
        bb.insert(Pos::new(10, 3));
        assert!(!bb.spans_edges(Axis::Vertical, 15));
        assert!(bb.spans_edges(Axis::Vertical, 11));
        assert!(!bb.spans_edges(Axis::Horizontal, 11));
    }
}
