//! Move priorities and cell scoring

pub mod heuristic;
pub mod patterns;

pub use heuristic::{
    adjacent_count, border_progress, diagonal_extension_value, exposed_links, security,
};
pub use patterns::{attack_priority, banded, gap_positional_bonus, weighted, PriorityScore};
