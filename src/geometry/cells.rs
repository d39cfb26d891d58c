//! Neighbourhoods, gap cells and border distances

use crate::board::{Axis, Pos};

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
fn on_board(row: i32, col: i32, size: usize) -> Option<Pos> {
    if row >= 0 && col >= 0 && row < size as i32 && col < size as i32 {
        Some(Pos::new(row as u8, col as u8))
    } else {
        None
    }
}

/// The (up to) 8 surrounding cells, row-major
pub fn neighbors8(pos: Pos, size: usize) -> Vec<Pos> {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| on_board(pos.row as i32 + dr, pos.col as i32 + dc, size))
        .collect()
}

/// The (up to) 4 diagonal neighbours
pub fn diagonal_neighbors(pos: Pos, size: usize) -> Vec<Pos> {
    DIAGONAL_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| on_board(pos.row as i32 + dr, pos.col as i32 + dc, size))
        .collect()
}

/// True for distinct cells that touch, including diagonally
#[inline]
pub fn is_adjacent(a: Pos, b: Pos) -> bool {
    a != b && a.chebyshev(b) == 1
}

#[inline]
pub fn is_diagonal_step(a: Pos, b: Pos) -> bool {
    let (dr, dc) = a.delta(b);
    dr.abs() == 1 && dc.abs() == 1
}

/// Cells adjacent to both endpoints of a pattern.
///
/// `b - a` is expected to be a pattern vector; other displacements give
/// whatever the neighbourhood intersection happens to be.
/// L vectors yield 2 cells, D vectors 1 cell, I vectors 3 cells away from the edge.
pub fn gap_cells(a: Pos, b: Pos, size: usize) -> Vec<Pos> {
    let around_b = neighbors8(b, size);
    neighbors8(a, size)
        .into_iter()
        .filter(|cell| around_b.contains(cell))
        .collect()
}

/// Distances from a position to the two edges of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderDistance {
    /// Rows (or columns) to the top (or left) edge
    pub to_start: usize,
    /// Rows (or columns) to the bottom (or right) edge
    pub to_end: usize,
}

impl BorderDistance {
    #[inline]
    pub fn nearer(self) -> usize {
        self.to_start.min(self.to_end)
    }

    #[inline]
    pub fn farther(self) -> usize {
        self.to_start.max(self.to_end)
    }
}

pub fn border_distance(pos: Pos, axis: Axis, size: usize) -> BorderDistance {
    let along = axis.along(pos);
    BorderDistance {
        to_start: along,
        to_end: (size - 1).saturating_sub(along),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vectors::{D_VECTORS, I_VECTORS, L_VECTORS};

    fn sorted(mut cells: Vec<Pos>) -> Vec<Pos> {
        cells.sort();
        cells
    }

    #[test]
    fn test_gap_cells_l_vector() {
        let cells = sorted(gap_cells(Pos::new(5, 5), Pos::new(7, 6), 15));
        assert_eq!(cells, vec![Pos::new(6, 5), Pos::new(6, 6)]);
    }

    #[test]
    fn test_gap_cells_i_vector() {
        let cells = sorted(gap_cells(Pos::new(5, 5), Pos::new(5, 7), 15));
        assert_eq!(cells, vec![Pos::new(4, 6), Pos::new(5, 6), Pos::new(6, 6)]);
    }

    #[test]
    fn test_gap_cells_d_vector() {
        let cells = gap_cells(Pos::new(5, 5), Pos::new(7, 7), 15);
        assert_eq!(cells, vec![Pos::new(6, 6)]);
    }

    #[test]
    fn test_gap_cells_i_vector_on_edge() {
        // Along the top edge the row above does not exist
        let cells = sorted(gap_cells(Pos::new(0, 4), Pos::new(0, 6), 15));
        assert_eq!(cells, vec![Pos::new(0, 5), Pos::new(1, 5)]);
    }

    #[test]
    fn test_every_l_pair_has_two_shared_neighbors() {
        let size = 15;
        for r in 0..size as u8 {
            for c in 0..size as u8 {
                let a = Pos::new(r, c);
                for v in L_VECTORS {
                    let Some(b) = a.offset(v.dr, v.dc) else { continue };
                    if b.row as usize >= size || b.col as usize >= size {
                        continue;
                    }
                    let cells = gap_cells(a, b, size);
                    assert_eq!(cells.len(), 2, "L pair {} {}", a, b);
                    for cell in cells {
                        assert!(is_adjacent(cell, a) && is_adjacent(cell, b));
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_d_pair_has_one_shared_neighbor() {
        let size = 15;
        for r in 0..size as u8 {
            for c in 0..size as u8 {
                let a = Pos::new(r, c);
                for v in D_VECTORS {
                    let Some(b) = a.offset(v.dr, v.dc) else { continue };
                    if b.row as usize >= size || b.col as usize >= size {
                        continue;
                    }
                    assert_eq!(gap_cells(a, b, size).len(), 1, "D pair {} {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_i_pairs_have_two_or_three_cells() {
        let size = 15;
        for r in 0..size as u8 {
            for c in 0..size as u8 {
                let a = Pos::new(r, c);
                for v in I_VECTORS {
                    let Some(b) = a.offset(v.dr, v.dc) else { continue };
                    if b.row as usize >= size || b.col as usize >= size {
                        continue;
                    }
                    let n = gap_cells(a, b, size).len();
                    assert!(n == 2 || n == 3);
                }
            }
        }
    }

    #[test]
    fn test_neighbors_at_corner() {
        assert_eq!(neighbors8(Pos::new(0, 0), 15).len(), 3);
        assert_eq!(neighbors8(Pos::new(7, 7), 15).len(), 8);
        assert_eq!(diagonal_neighbors(Pos::new(0, 5), 15).len(), 2);
    }

    #[test]
    fn test_border_distance() {
        let d = border_distance(Pos::new(3, 10), Axis::Vertical, 15);
        assert_eq!(d, BorderDistance { to_start: 3, to_end: 11 });
        assert_eq!(d.nearer(), 3);
        assert_eq!(d.farther(), 11);

        let h = border_distance(Pos::new(3, 10), Axis::Horizontal, 15);
        assert_eq!(h.to_start, 10);
        assert_eq!(h.to_end, 4);
    }

    #[test]
    fn test_adjacency() {
        assert!(is_adjacent(Pos::new(4, 4), Pos::new(5, 5)));
        assert!(!is_adjacent(Pos::new(4, 4), Pos::new(4, 4)));
        assert!(!is_adjacent(Pos::new(4, 4), Pos::new(6, 4)));
        assert!(is_diagonal_step(Pos::new(4, 4), Pos::new(3, 5)));
        assert!(!is_diagonal_step(Pos::new(4, 4), Pos::new(4, 5)));
    }
}
