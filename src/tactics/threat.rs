//! Own-threat defense

use crate::engine::MoveType;
use crate::eval::weighted;

use super::{Candidate, TacticalContext};

/// Take the last usable fill cell of the most valuable threatened own gap.
///
/// The move is marked critical: it may cross an opponent diagonal, since
/// losing the gap costs more than the crossing rule protects.
pub fn defend_threatened_gap(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let registry = ctx.registry?;
    let weight = ctx.personality.priorities.threat_defense;

    for gap in registry.own_threatened_gaps(ctx.player) {
        let Some(&cell) = gap.usable_cells.first() else {
            continue;
        };
        if !ctx.board.is_empty(cell) {
            continue;
        }
        let (a, b) = gap.endpoints();
        return Some(
            Candidate::new(
                cell,
                MoveType::ThreatDefense,
                weighted(gap.priority, weight),
                format!("defend {} gap {}-{}", gap.class.name(), a, b),
            )
            .with_pattern(gap.class)
            .critical(),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{pos_of, Fixture};
    use super::*;
    use crate::board::{Pos, Stone};
    use crate::rules::ValidationPriority;

    #[test]
    fn test_defends_last_cell() {
        let mut fx = Fixture::new(&[
            ((5, 5), Stone::Black),
            ((7, 6), Stone::Black),
            ((6, 5), Stone::White),
        ]);
        let mut ctx = fx.ctx(Stone::Black);
        let c = defend_threatened_gap(&mut ctx).unwrap();
        assert_eq!(pos_of(&c), Pos::new(6, 6));
        assert_eq!(c.validation, ValidationPriority::Critical);
        assert_eq!(c.move_type, MoveType::ThreatDefense);
    }

    #[test]
    fn test_nothing_to_defend() {
        let mut fx = Fixture::new(&[((5, 5), Stone::Black), ((7, 6), Stone::Black)]);
        let mut ctx = fx.ctx(Stone::Black);
        assert!(defend_threatened_gap(&mut ctx).is_none());
    }

    #[test]
    fn test_without_registry_yields_nothing() {
        let mut fx = Fixture::new(&[
            ((5, 5), Stone::Black),
            ((7, 6), Stone::Black),
            ((6, 5), Stone::White),
        ]);
        let mut ctx = fx.bare_ctx(Stone::Black);
        assert!(defend_threatened_gap(&mut ctx).is_none());
    }
}
