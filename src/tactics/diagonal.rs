//! Diagonal extension, the last resort before giving up

use crate::board::Pos;
use crate::engine::MoveType;
use crate::eval::{banded, diagonal_extension_value, weighted, PriorityScore};
use crate::geometry::{diagonal_neighbors, Direction};
use crate::rules::is_legal_move;

use super::{pick_with_noise, Candidate, TacticalContext};

/// Best empty diagonal neighbour of any own stone.
///
/// Cells are valued by opponent proximity, own connectivity, progress
/// toward the nearer border, and exposure.
pub fn extend_diagonal(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    if !ctx.personality.strategy.enable_diagonal_extension {
        return None;
    }
    let weight = ctx.personality.priorities.diagonal_extension;
    let noise = ctx.personality.randomization.move_noise;
    let size = ctx.size();

    let mut scored: Vec<(i32, Pos, Pos)> = Vec::new();
    for origin in ctx.own_stones() {
        for cell in diagonal_neighbors(origin, size) {
            if !is_legal_move(ctx.board, cell, ctx.player) {
                continue;
            }
            let value = diagonal_extension_value(ctx.board, origin, cell, ctx.player);
            scored.push((value, cell, origin));
        }
    }
    scored.sort_by_key(|&(value, cell, origin)| (-value, cell, origin));

    let (value, cell, origin) = pick_with_noise(ctx, &scored, noise)?;
    let priority = banded(PriorityScore::DIAGONAL_EXTENSION, value);
    Some(
        Candidate::new(
            cell,
            MoveType::DiagonalExtension,
            weighted(priority, weight),
            format!("diagonal step from {}", origin),
        )
        .with_head(origin, step_direction(origin, cell)),
    )
}

fn step_direction(from: Pos, to: Pos) -> Direction {
    let (dr, dc) = from.delta(to);
    Direction::of(dr, dc)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{pos_of, Fixture};
    use super::*;
    use crate::board::Stone;
    use crate::geometry::is_diagonal_step;

    #[test]
    fn test_disabled_by_default() {
        let mut fx = Fixture::new(&[((7, 7), Stone::Black)]);
        let mut ctx = fx.bare_ctx(Stone::Black);
        assert!(extend_diagonal(&mut ctx).is_none());
    }

    #[test]
    fn test_steps_diagonally() {
        let mut fx = Fixture::new(&[((7, 7), Stone::Black)]);
        fx.personality.strategy.enable_diagonal_extension = true;
        let mut ctx = fx.bare_ctx(Stone::Black);
        let c = extend_diagonal(&mut ctx).unwrap();
        assert!(is_diagonal_step(Pos::new(7, 7), pos_of(&c)));
        assert_eq!(c.move_type, MoveType::DiagonalExtension);
        assert!(c.priority >= PriorityScore::DIAGONAL_EXTENSION);
    }

    #[test]
    fn test_prefers_border_progress() {
        // Nearer border is the top edge: the step should go up
        let mut fx = Fixture::new(&[((4, 7), Stone::Black)]);
        fx.personality.strategy.enable_diagonal_extension = true;
        let mut ctx = fx.bare_ctx(Stone::Black);
        let c = extend_diagonal(&mut ctx).unwrap();
        assert_eq!(pos_of(&c).row, 3);
    }

    #[test]
    fn test_skips_crossing_cells() {
        // (6,6)-(7,7) would be crossed by white at (6,7) and (7,6)
        let mut fx = Fixture::new(&[
            ((7, 7), Stone::Black),
            ((6, 7), Stone::White),
            ((7, 6), Stone::White),
        ]);
        fx.personality.strategy.enable_diagonal_extension = true;
        let mut ctx = fx.bare_ctx(Stone::Black);
        let c = extend_diagonal(&mut ctx).unwrap();
        assert_ne!(pos_of(&c), Pos::new(6, 6));
    }
}
