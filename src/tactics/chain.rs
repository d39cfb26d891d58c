//! Fragment-aware chain extension

use crate::analysis::{head_direction, is_usable, HeadSide};
use crate::board::{Axis, Pos};
use crate::engine::MoveType;
use crate::eval::{banded, security, weighted, PriorityScore};
use crate::geometry::{
    gap_cells, pattern_moves, PatternMove, PatternVector, D_VECTORS, I_VECTORS, L_VECTORS,
};
use crate::rules::is_legal_move;

use super::{pick_with_noise, Candidate, TacticalContext};

/// Bonus per point of axis alignment
const ALIGNMENT_BONUS: i32 = 25;

/// Extend from a head toward its border, L patterns first.
///
/// The active fragment is tried first, then the others by rank. Within a
/// fragment the head with more ground to cover goes first, unless head
/// selection noise swaps them.
pub fn extend_chain(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let axis = ctx.axis();
    let size = ctx.size();
    let weight = ctx.personality.priorities.chain_extension;
    let head_noise = ctx.personality.randomization.head_selection;
    let pattern_noise = ctx.personality.randomization.pattern_selection;
    let risk_taking = ctx.personality.strategy.risk_taking;

    let allow_exposed = ctx.chance(risk_taking);
    let heads = ordered_heads(ctx, head_noise, axis, size);

    for (head, side) in heads {
        if remaining(head, side, axis, size) <= 1 {
            continue;
        }
        for vectors in [&L_VECTORS[..], &I_VECTORS[..], &D_VECTORS[..]] {
            let moves = extension_moves(ctx, head, side, vectors, allow_exposed);
            let Some(m) = pick_with_noise(ctx, &moves, pattern_noise) else {
                continue;
            };
            let priority = banded(PriorityScore::CHAIN_EXTENSION, m.alignment * ALIGNMENT_BONUS);
            return Some(
                Candidate::new(
                    m.target,
                    MoveType::ChainExtension,
                    weighted(priority, weight),
                    format!("{} pattern from head {}", m.vector.class.name(), head),
                )
                .with_pattern(m.vector.class)
                .with_head(head, head_direction(axis, side)),
            );
        }
    }
    None
}

fn remaining(head: Pos, side: HeadSide, axis: Axis, size: usize) -> usize {
    match side {
        HeadSide::Near => axis.along(head),
        HeadSide::Far => size - 1 - axis.along(head),
    }
}

/// Heads grouped per fragment (or per stone without a tracker), longest way first
fn ordered_heads(
    ctx: &mut TacticalContext<'_>,
    noise: f32,
    axis: Axis,
    size: usize,
) -> Vec<(Pos, HeadSide)> {
    let heads = ctx.candidate_heads();
    let mut ordered = Vec::with_capacity(heads.len());
    for (i, pair) in heads.chunks(2).enumerate() {
        let mut pair = pair.to_vec();
        pair.sort_by_key(|&(h, s)| std::cmp::Reverse(remaining(h, s, axis, size)));
        // Only the leading fragment's choice is randomized
        if i == 0 && pair.len() == 2 && ctx.chance(noise) {
            pair.swap(0, 1);
        }
        ordered.extend(pair);
    }
    ordered
}

/// Legal pattern moves from `head` heading for its border, best first
fn extension_moves(
    ctx: &TacticalContext<'_>,
    head: Pos,
    side: HeadSide,
    vectors: &[PatternVector],
    allow_exposed: bool,
) -> Vec<PatternMove> {
    let axis = ctx.axis();
    let size = ctx.size();
    let mut moves: Vec<PatternMove> = pattern_moves(head, vectors, axis, size)
        .into_iter()
        .filter(|m| m.direction.along(axis) == side.sign())
        .filter(|m| is_legal_move(ctx.board, m.target, ctx.player))
        .filter(|m| {
            gap_cells(head, m.target, size)
                .into_iter()
                .all(|c| is_usable(ctx.board, head, m.target, c, ctx.player))
        })
        .filter(|m| allow_exposed || security(ctx.board, m.target, ctx.player) >= 0)
        .collect();
    moves.sort_by_key(|m| {
        (
            -m.alignment,
            -security(ctx.board, m.target, ctx.player),
            m.target,
        )
    });
    moves
}
