//! Board geometry for the pattern model
//!
//! Pure functions over coordinates:
//! - pattern vectors (L, I and D classes) and the moves they generate
//! - gap cells shared by two pattern endpoints
//! - neighbourhoods and border distances along a player's axis

pub mod cells;
pub mod vectors;

pub use cells::{
    border_distance, diagonal_neighbors, gap_cells, is_adjacent, is_diagonal_step, neighbors8,
    BorderDistance,
};
pub use vectors::{
    classify, pattern_moves, Direction, Orientation, PatternClass, PatternMove, PatternVector,
    ALL_VECTORS, D_VECTORS, I_VECTORS, L_VECTORS,
};
