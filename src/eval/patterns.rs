//! Priority scores for candidate moves
//!
//! Every tactical handler reports its candidate with one of these base
//! scores plus a small positional bonus. The bands never overlap because
//! the bonus is capped below the smallest gap between two bands.

use crate::board::{Axis, Pos};
use crate::geometry::PatternClass;

/// Base priorities per move type
pub struct PriorityScore;

impl PriorityScore {
    /// Own gap with a single usable fill cell left
    pub const THREAT_DEFENSE: i32 = 10_000;

    /// Opponent gap with a single usable fill cell: taking it cuts the link
    pub const CRITICAL_ATTACK: i32 = 5_000;
    /// Opponent gap with exactly two usable fill cells
    pub const STANDARD_ATTACK: i32 = 2_500;
    /// Opponent gap with three usable fill cells
    pub const OPPORTUNISTIC_ATTACK: i32 = 1_200;

    pub const BORDER_CONNECTION: i32 = 900;
    pub const FRAGMENT_CONNECTION: i32 = 700;
    pub const CHAIN_EXTENSION: i32 = 500;
    pub const SAFE_GAP_FILL: i32 = 300;
    pub const DIAGONAL_EXTENSION: i32 = 100;

    /// Completing an armed threat; ranks with a critical attack
    pub const THREAT_FOLLOW_UP: i32 = Self::CRITICAL_ATTACK;

    /// Opening moves carry no competing candidates
    pub const OPENING: i32 = 0;

    /// Upper bound of any positional bonus
    pub const MAX_POSITIONAL_BONUS: i32 = 199;
}

/// Base score plus a bonus clamped to [0, MAX_POSITIONAL_BONUS]
#[inline]
pub fn banded(base: i32, bonus: i32) -> i32 {
    base + bonus.clamp(0, PriorityScore::MAX_POSITIONAL_BONUS)
}

/// Attack band for an opponent gap by its number of usable fill cells
pub fn attack_priority(usable_cells: usize) -> i32 {
    match usable_cells {
        0 => 0,
        1 => PriorityScore::CRITICAL_ATTACK,
        2 => PriorityScore::STANDARD_ATTACK,
        _ => PriorityScore::OPPORTUNISTIC_ATTACK,
    }
}

/// Positional bonus of a gap, in [0, 199].
///
/// Rewards patterns that span the owner's axis, sit near the middle of the
/// board across that axis, and belong to the sturdier classes.
pub fn gap_positional_bonus(class: PatternClass, a: Pos, b: Pos, axis: Axis, size: usize) -> i32 {
    let span = (axis.along(a) as i32 - axis.along(b) as i32).abs();
    let span_bonus = span * 30;

    let centre = (size as i32 - 1) / 2;
    let across = (axis.across(a) as i32 + axis.across(b) as i32) / 2;
    let centrality = (centre - (across - centre).abs()).max(0) * 5;

    let class_bonus = match class {
        PatternClass::L => 50,
        PatternClass::I => 30,
        PatternClass::D => 10,
    };

    (span_bonus + centrality + class_bonus).clamp(0, PriorityScore::MAX_POSITIONAL_BONUS)
}

/// Scale a base priority by a personality weight
#[inline]
pub fn weighted(priority: i32, weight: f32) -> i32 {
    (priority as f32 * weight).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_hierarchy() {
        assert!(PriorityScore::THREAT_DEFENSE > PriorityScore::CRITICAL_ATTACK);
        assert!(PriorityScore::CRITICAL_ATTACK > PriorityScore::STANDARD_ATTACK);
        assert!(PriorityScore::STANDARD_ATTACK > PriorityScore::OPPORTUNISTIC_ATTACK);
        assert!(PriorityScore::OPPORTUNISTIC_ATTACK > PriorityScore::BORDER_CONNECTION);
        assert!(PriorityScore::BORDER_CONNECTION > PriorityScore::FRAGMENT_CONNECTION);
        assert!(PriorityScore::FRAGMENT_CONNECTION > PriorityScore::CHAIN_EXTENSION);
        assert!(PriorityScore::CHAIN_EXTENSION > PriorityScore::SAFE_GAP_FILL);
        assert!(PriorityScore::SAFE_GAP_FILL > PriorityScore::DIAGONAL_EXTENSION);
    }

    #[test]
    fn test_bonus_never_crosses_bands() {
        // Smallest distance between adjacent bands
        let bands = [
            PriorityScore::THREAT_DEFENSE,
            PriorityScore::CRITICAL_ATTACK,
            PriorityScore::STANDARD_ATTACK,
            PriorityScore::OPPORTUNISTIC_ATTACK,
            PriorityScore::BORDER_CONNECTION,
            PriorityScore::FRAGMENT_CONNECTION,
            PriorityScore::CHAIN_EXTENSION,
            PriorityScore::SAFE_GAP_FILL,
            PriorityScore::DIAGONAL_EXTENSION,
        ];
        let min_gap = bands.windows(2).map(|w| w[0] - w[1]).min().unwrap();
        assert!(PriorityScore::MAX_POSITIONAL_BONUS < min_gap);
    }

    #[test]
    fn test_banded_clamps_bonus() {
        assert_eq!(banded(PriorityScore::FRAGMENT_CONNECTION, 80), 780);
        assert_eq!(
            banded(PriorityScore::FRAGMENT_CONNECTION, 10_000),
            PriorityScore::FRAGMENT_CONNECTION + PriorityScore::MAX_POSITIONAL_BONUS
        );
        assert!(banded(PriorityScore::FRAGMENT_CONNECTION, 10_000) < PriorityScore::BORDER_CONNECTION);
        assert_eq!(banded(PriorityScore::CHAIN_EXTENSION, -40), PriorityScore::CHAIN_EXTENSION);
    }

    #[test]
    fn test_attack_priority_bands() {
        assert_eq!(attack_priority(1), PriorityScore::CRITICAL_ATTACK);
        assert_eq!(attack_priority(2), PriorityScore::STANDARD_ATTACK);
        assert_eq!(attack_priority(3), PriorityScore::OPPORTUNISTIC_ATTACK);
        assert_eq!(attack_priority(0), 0);
    }

    #[test]
    fn test_positional_bonus_bounds() {
        for size in [5, 15, 19] {
            let last = (size - 1) as u8;
            for (a, b) in [
                (Pos::new(0, 0), Pos::new(2, 1)),
                (Pos::new(last - 2, last), Pos::new(last, last)),
                (Pos::new(7.min(last - 2), 7.min(last)), Pos::new(7.min(last - 2) + 2, 7.min(last))),
            ] {
                for class in [PatternClass::L, PatternClass::I, PatternClass::D] {
                    let bonus = gap_positional_bonus(class, a, b, Axis::Vertical, size);
                    assert!((0..=PriorityScore::MAX_POSITIONAL_BONUS).contains(&bonus));
                }
            }
        }
    }

    #[test]
    fn test_positional_bonus_prefers_axis_span() {
        let along = gap_positional_bonus(PatternClass::L, Pos::new(5, 7), Pos::new(7, 8), Axis::Vertical, 15);
        let across = gap_positional_bonus(PatternClass::L, Pos::new(5, 7), Pos::new(6, 9), Axis::Vertical, 15);
        assert!(along > across);
    }

    #[test]
    fn test_weighted() {
        assert_eq!(weighted(2500, 1.0), 2500);
        assert_eq!(weighted(2500, 0.5), 1250);
        assert_eq!(weighted(1000, 0.0), 0);
    }
}
