//! Board representation for the connection game

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, MoveOutcome, WinCheck};

/// Canonical board size (15x15)
pub const BOARD_SIZE: usize = 15;
/// Largest supported board. Bitboards use this as their row stride.
pub const MAX_BOARD_SIZE: usize = 19;
pub const TOTAL_CELLS: usize = MAX_BOARD_SIZE * MAX_BOARD_SIZE; // 361

/// Which pair of edges a player has to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// Top edge (row 0) to bottom edge (row N-1)
    Vertical,
    /// Left edge (col 0) to right edge (col N-1)
    Horizontal,
}

impl Axis {
    /// Coordinate measured along the axis
    #[inline]
    pub fn along(self, pos: Pos) -> usize {
        match self {
            Axis::Vertical => pos.row as usize,
            Axis::Horizontal => pos.col as usize,
        }
    }

    /// Coordinate measured across the axis
    #[inline]
    pub fn across(self, pos: Pos) -> usize {
        match self {
            Axis::Vertical => pos.col as usize,
            Axis::Horizontal => pos.row as usize,
        }
    }

    /// Split a displacement into (along, across) components
    #[inline]
    pub fn split(self, dr: i32, dc: i32) -> (i32, i32) {
        match self {
            Axis::Vertical => (dr, dc),
            Axis::Horizontal => (dc, dr),
        }
    }
}

/// Stone colors. Black connects top to bottom, White connects left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// Connection axis of the player (None for Empty)
    #[inline]
    pub fn axis(self) -> Option<Axis> {
        match self {
            Stone::Black => Some(Axis::Vertical),
            Stone::White => Some(Axis::Horizontal),
            Stone::Empty => None,
        }
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Stone::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < MAX_BOARD_SIZE as u8 && col < MAX_BOARD_SIZE as u8);
        Self { row, col }
    }

    /// Build a position from signed coordinates, if they fit the largest board
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        if row >= 0 && row < MAX_BOARD_SIZE as i32 && col >= 0 && col < MAX_BOARD_SIZE as i32 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * MAX_BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / MAX_BOARD_SIZE) as u8,
            col: (idx % MAX_BOARD_SIZE) as u8,
        }
    }

    /// Displacement from `self` to `other` as (dr, dc)
    #[inline]
    pub fn delta(self, other: Pos) -> (i32, i32) {
        (
            other.row as i32 - self.row as i32,
            other.col as i32 - self.col as i32,
        )
    }

    /// Position shifted by (dr, dc), or None when it leaves the coordinate range
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        Pos::try_new(self.row as i32 + dr, self.col as i32 + dc)
    }

    /// Chebyshev distance (king moves)
    #[inline]
    pub fn chebyshev(self, other: Pos) -> i32 {
        let (dr, dc) = self.delta(other);
        dr.abs().max(dc.abs())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}
