//! Pattern vectors and the candidate moves they generate

use serde::Serialize;

use crate::board::{Axis, Pos};

/// Shape class of a two-stone pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternClass {
    /// Knight-like (2,1): two interchangeable fill cells
    L,
    /// Straight (2,0): up to three fill cells
    I,
    /// Diagonal (2,2): a single fill cell
    D,
}

impl PatternClass {
    pub fn name(self) -> &'static str {
        match self {
            PatternClass::L => "L",
            PatternClass::I => "I",
            PatternClass::D => "D",
        }
    }
}

/// A fixed displacement between pattern endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternVector {
    pub dr: i32,
    pub dc: i32,
    pub class: PatternClass,
}

impl PatternVector {
    const fn new(dr: i32, dc: i32, class: PatternClass) -> Self {
        Self { dr, dc, class }
    }

    /// Squared euclidean length
    #[inline]
    pub fn magnitude_sq(self) -> i32 {
        self.dr * self.dr + self.dc * self.dc
    }

    #[inline]
    pub fn orientation(self) -> Orientation {
        Orientation::of(self.dr, self.dc)
    }

    #[inline]
    pub fn direction(self) -> Direction {
        Direction::of(self.dr, self.dc)
    }

    /// How well the vector follows the axis: `2*|along| - |across|`
    #[inline]
    pub fn alignment(self, axis: Axis) -> i32 {
        let (along, across) = axis.split(self.dr, self.dc);
        2 * along.abs() - across.abs()
    }
}

pub const L_VECTORS: [PatternVector; 8] = [
    PatternVector::new(2, 1, PatternClass::L),
    PatternVector::new(2, -1, PatternClass::L),
    PatternVector::new(-2, 1, PatternClass::L),
    PatternVector::new(-2, -1, PatternClass::L),
    PatternVector::new(1, 2, PatternClass::L),
    PatternVector::new(1, -2, PatternClass::L),
    PatternVector::new(-1, 2, PatternClass::L),
    PatternVector::new(-1, -2, PatternClass::L),
];

pub const I_VECTORS: [PatternVector; 4] = [
    PatternVector::new(2, 0, PatternClass::I),
    PatternVector::new(-2, 0, PatternClass::I),
    PatternVector::new(0, 2, PatternClass::I),
    PatternVector::new(0, -2, PatternClass::I),
];

pub const D_VECTORS: [PatternVector; 4] = [
    PatternVector::new(2, 2, PatternClass::D),
    PatternVector::new(2, -2, PatternClass::D),
    PatternVector::new(-2, 2, PatternClass::D),
    PatternVector::new(-2, -2, PatternClass::D),
];

pub const ALL_VECTORS: [PatternVector; 16] = [
    L_VECTORS[0], L_VECTORS[1], L_VECTORS[2], L_VECTORS[3],
    L_VECTORS[4], L_VECTORS[5], L_VECTORS[6], L_VECTORS[7],
    I_VECTORS[0], I_VECTORS[1], I_VECTORS[2], I_VECTORS[3],
    D_VECTORS[0], D_VECTORS[1], D_VECTORS[2], D_VECTORS[3],
];

/// Pattern class of a displacement, if it is a pattern vector
pub fn classify(dr: i32, dc: i32) -> Option<PatternClass> {
    match (dr.abs(), dc.abs()) {
        (2, 1) | (1, 2) => Some(PatternClass::L),
        (2, 0) | (0, 2) => Some(PatternClass::I),
        (2, 2) => Some(PatternClass::D),
        _ => None,
    }
}

/// Coarse orientation of a displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
    Diagonal,
}

impl Orientation {
    pub fn of(dr: i32, dc: i32) -> Self {
        match dr.abs().cmp(&dc.abs()) {
            std::cmp::Ordering::Greater => Orientation::Vertical,
            std::cmp::Ordering::Less => Orientation::Horizontal,
            std::cmp::Ordering::Equal => Orientation::Diagonal,
        }
    }
}

/// Compass direction (north = decreasing row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Direction of a displacement by the signs of its components.
    /// A zero displacement reads as North.
    pub fn of(dr: i32, dc: i32) -> Self {
        match (dr.signum(), dc.signum()) {
            (-1, 0) | (0, 0) => Direction::North,
            (-1, 1) => Direction::NorthEast,
            (0, 1) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (1, 0) => Direction::South,
            (1, -1) => Direction::SouthWest,
            (0, -1) => Direction::West,
            _ => Direction::NorthWest,
        }
    }

    /// Unit step (dr, dc)
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Sign of the step measured along an axis
    pub fn along(self, axis: Axis) -> i32 {
        let (dr, dc) = self.step();
        axis.split(dr, dc).0
    }
}

/// A candidate target generated from an origin and a pattern vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMove {
    pub origin: Pos,
    pub target: Pos,
    pub vector: PatternVector,
    pub magnitude_sq: i32,
    pub orientation: Orientation,
    pub direction: Direction,
    pub alignment: i32,
}

/// Targets `origin + vector` for every vector that stays on a `size`x`size` board
pub fn pattern_moves(
    origin: Pos,
    vectors: &[PatternVector],
    axis: Axis,
    size: usize,
) -> Vec<PatternMove> {
    vectors
        .iter()
        .filter_map(|&vector| {
            let row = origin.row as i32 + vector.dr;
            let col = origin.col as i32 + vector.dc;
            if row < 0 || col < 0 || row >= size as i32 || col >= size as i32 {
                return None;
            }
            Some(PatternMove {
                origin,
                target: Pos::new(row as u8, col as u8),
                vector,
                magnitude_sq: vector.magnitude_sq(),
                orientation: vector.orientation(),
                direction: vector.direction(),
                alignment: vector.alignment(axis),
            })
        })
        .collect()
}
