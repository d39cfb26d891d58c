//! Safe gap filling

use crate::analysis::Gap;
use crate::board::Pos;
use crate::engine::MoveType;
use crate::eval::{adjacent_count, security, weighted};
use crate::geometry::{neighbors8, PatternClass};
use crate::rules::is_legal_move;

use super::{pick_with_noise, Candidate, TacticalContext};

/// Fill one of the player's safe gaps.
///
/// Gaps with an opponent stone next to a fill cell come first; untouched
/// gaps are only filled as often as the personality's defensive reactivity
/// allows. L gaps are preferred because their cells are interchangeable;
/// in an I gap the cell touching the most own stones is taken.
pub fn fill_safe_gap(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let registry = ctx.registry?;
    let weight = ctx.personality.priorities.gap_fill;
    let reactivity = ctx.personality.strategy.defensive_reactivity;
    let noise = ctx.personality.randomization.move_noise;

    let mut gaps = registry.own_safe_gaps(ctx.player);
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_by_key(|g| (!is_contested(ctx, g), class_rank(g.class), -g.priority, g.key));

    if !is_contested(ctx, gaps[0]) && !ctx.chance(reactivity) {
        return None;
    }

    for gap in gaps {
        let cells = ranked_cells(ctx, gap);
        let Some(cell) = pick_with_noise(ctx, &cells, noise) else {
            continue;
        };
        let (a, b) = gap.endpoints();
        return Some(
            Candidate::new(
                cell,
                MoveType::GapFill,
                weighted(gap.priority, weight),
                format!("fill {} gap {}-{}", gap.class.name(), a, b),
            )
            .with_pattern(gap.class),
        );
    }
    None
}

fn class_rank(class: PatternClass) -> u8 {
    match class {
        PatternClass::L => 0,
        PatternClass::I => 1,
        PatternClass::D => 2,
    }
}

/// An opponent stone touches one of the gap's fill cells
fn is_contested(ctx: &TacticalContext<'_>, gap: &Gap) -> bool {
    let opponent = ctx.opponent();
    gap.fill_cells.iter().any(|&cell| {
        neighbors8(cell, ctx.size())
            .into_iter()
            .any(|n| ctx.board.get(n) == opponent)
    })
}

/// Legal usable cells of `gap`, best first
fn ranked_cells(ctx: &TacticalContext<'_>, gap: &Gap) -> Vec<Pos> {
    let mut cells: Vec<Pos> = gap
        .usable_cells
        .iter()
        .copied()
        .filter(|&c| is_legal_move(ctx.board, c, ctx.player))
        .collect();
    match gap.class {
        PatternClass::I => cells.sort_by_key(|&c| {
            (
                -(adjacent_count(ctx.board, c, ctx.player) as i32),
                -security(ctx.board, c, ctx.player),
                c,
            )
        }),
        _ => cells.sort_by_key(|&c| (-security(ctx.board, c, ctx.player), c)),
    }
    cells
}
