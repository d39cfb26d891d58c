//! Joining the active fragment with its nearest neighbour

use tracing::trace;

use crate::analysis::HeadSide;
use crate::engine::MoveType;
use crate::eval::{banded, weighted, PriorityScore};

use super::{Candidate, TacticalContext};

/// Fragments further apart than this (Chebyshev) are left alone
pub const MAX_CONNECTION_DISTANCE: i32 = 4;

/// Bridge the active fragment to the closest other fragment.
///
/// While the active fragment can still grow at either head, the
/// personality's independence is the chance of ignoring the neighbour and
/// letting chain extension run instead.
pub fn connect_fragments(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let tracker = ctx.fragments?;
    let weight = ctx.personality.priorities.fragment_connection;
    let independence = ctx.personality.strategy.independence;

    let active = tracker.active_fragment()?;
    let (nearest, distance) = tracker.nearest_to_active()?;
    if distance > MAX_CONNECTION_DISTANCE {
        return None;
    }

    let extendable = tracker.can_extend(HeadSide::Near) || tracker.can_extend(HeadSide::Far);
    if extendable && ctx.chance(independence) {
        trace!(distance, "fragment connection skipped for independence");
        return None;
    }

    let bridge = tracker.best_connection_move(ctx.board, active, nearest)?;
    let priority = banded(PriorityScore::FRAGMENT_CONNECTION, bridge.score * 10);
    let mut candidate = Candidate::new(
        bridge.cell,
        MoveType::FragmentConnection,
        weighted(priority, weight),
        format!(
            "join fragments of {} and {} stones via {}-{}",
            active.size(),
            nearest.size(),
            bridge.from,
            bridge.to
        ),
    );
    if let Some(class) = bridge.class {
        candidate = candidate.with_pattern(class);
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{pos_of, Fixture};
    use super::*;
    use crate::board::{Pos, Stone};
    use crate::geometry::classify;

    fn linked(p: Pos, q: Pos) -> bool {
        let (dr, dc) = p.delta(q);
        p.chebyshev(q) == 1 || classify(dr, dc).is_some()
    }

    #[test]
    fn test_bridges_two_fragments() {
        // Two vertical pairs four columns apart
        let mut fx = Fixture::new(&[
            ((6, 4), Stone::Black),
            ((7, 4), Stone::Black),
            ((6, 8), Stone::Black),
            ((7, 8), Stone::Black),
        ]);
        fx.personality.strategy.independence = 0.0;
        let mut ctx = fx.ctx(Stone::Black);
        let c = connect_fragments(&mut ctx).unwrap();
        let cell = pos_of(&c);
        assert_eq!(c.move_type, MoveType::FragmentConnection);
        let left = [Pos::new(6, 4), Pos::new(7, 4)];
        let right = [Pos::new(6, 8), Pos::new(7, 8)];
        assert!(left.iter().any(|&s| linked(cell, s)));
        assert!(right.iter().any(|&s| linked(cell, s)));
        assert!(c.priority >= PriorityScore::FRAGMENT_CONNECTION);
        assert!(c.priority < PriorityScore::BORDER_CONNECTION);
    }

    #[test]
    fn test_independence_skips() {
        let mut fx = Fixture::new(&[
            ((6, 4), Stone::Black),
            ((7, 4), Stone::Black),
            ((6, 8), Stone::Black),
            ((7, 8), Stone::Black),
        ]);
        fx.personality.strategy.independence = 1.0;
        let mut ctx = fx.ctx(Stone::Black);
        assert!(connect_fragments(&mut ctx).is_none());
    }

    #[test]
    fn test_distant_fragments_ignored() {
        let mut fx = Fixture::new(&[((2, 2), Stone::White), ((12, 12), Stone::White)]);
        fx.personality.strategy.independence = 0.0;
        let mut ctx = fx.ctx(Stone::White);
        assert!(connect_fragments(&mut ctx).is_none());
    }

    #[test]
    fn test_single_fragment_yields_nothing() {
        let mut fx = Fixture::new(&[((6, 6), Stone::Black), ((7, 6), Stone::Black)]);
        fx.personality.strategy.independence = 0.0;
        let mut ctx = fx.ctx(Stone::Black);
        assert!(connect_fragments(&mut ctx).is_none());
    }

    #[test]
    fn test_requires_tracker() {
        let mut fx = Fixture::new(&[((6, 4), Stone::Black), ((6, 8), Stone::Black)]);
        let mut ctx = fx.bare_ctx(Stone::Black);
        assert!(connect_fragments(&mut ctx).is_none());
    }
}
