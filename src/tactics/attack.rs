//! Attacks on opponent gaps

use tracing::trace;

use crate::board::Pos;
use crate::engine::MoveType;
use crate::eval::{adjacent_count, security, weighted};
use crate::rules::is_legal_move;

use super::{pick_with_noise, Candidate, TacticalContext};

/// Occupy a usable fill cell of the most vulnerable opponent gap.
///
/// Runs with the personality's attack probability and only for gaps whose
/// weighted attack priority reaches the attack threshold. The remaining
/// usable cells travel with the candidate so the engine can arm a
/// follow-through.
pub fn attack_vulnerable_gap(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let registry = ctx.registry?;
    let strategy = &ctx.personality.strategy;
    let (probability, threshold) = (strategy.attack_probability, strategy.attack_threshold);
    let weight = ctx.personality.priorities.attack;
    let noise = ctx.personality.randomization.move_noise;

    if !ctx.chance(probability) {
        trace!("attack skipped by probability gate");
        return None;
    }

    for gap in registry.opponent_vulnerable_gaps(ctx.opponent()) {
        let value = weighted(gap.attack_priority, weight);
        if value < threshold {
            // Sorted by priority: nothing further qualifies
            break;
        }

        let mut cells: Vec<Pos> = gap
            .usable_cells
            .iter()
            .copied()
            .filter(|&c| is_legal_move(ctx.board, c, ctx.player))
            .collect();
        if cells.is_empty() {
            continue;
        }
        cells.sort_by_key(|&c| {
            (
                -(adjacent_count(ctx.board, c, ctx.player) as i32),
                -security(ctx.board, c, ctx.player),
                c,
            )
        });
        let Some(target) = pick_with_noise(ctx, &cells, noise) else {
            continue;
        };
        let remaining: Vec<Pos> = gap
            .usable_cells
            .iter()
            .copied()
            .filter(|&c| c != target)
            .collect();

        let (a, b) = gap.endpoints();
        return Some(
            Candidate::new(
                target,
                MoveType::Attack,
                value,
                format!(
                    "attack {} gap {}-{} ({} usable)",
                    gap.class.name(),
                    a,
                    b,
                    gap.usable_cells.len()
                ),
            )
            .with_pattern(gap.class)
            .with_threat_cells(remaining),
        );
    }
    None
}
