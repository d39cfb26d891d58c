//! Border connection for heads close to their target edge

use crate::analysis::{head_direction, HeadSide};
use crate::board::{Axis, Pos};
use crate::engine::MoveType;
use crate::eval::{banded, security, weighted, PriorityScore};
use crate::geometry::{gap_cells, PatternClass};
use crate::rules::is_legal_move;

use super::{Candidate, TacticalContext};

/// Bonus per step a head is already past the two-cell mark
const CLOSENESS_BONUS: i32 = 50;

/// Connect a head within two cells of its border.
///
/// At distance 1 the head plays an adjacent border cell. At distance 2 it
/// plays a fill cell of the I pattern between the head and the border cell
/// straight ahead, preferring the middle one.
pub fn connect_border(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let axis = ctx.axis();
    let size = ctx.size();
    let weight = ctx.personality.priorities.border_connection;

    let mut heads = ctx.candidate_heads();
    heads.sort_by_key(|&(head, side)| head_distance(head, side, axis, size));

    for (head, side) in heads {
        let distance = head_distance(head, side, axis, size);
        if distance == 0 || distance > 2 {
            continue;
        }
        if let Some(tracker) = ctx.fragments {
            let reached = tracker
                .fragments()
                .iter()
                .any(|f| f.contains(head) && f.touches(side));
            if reached {
                continue;
            }
        }

        let cells = if distance == 1 {
            border_cells(ctx, head, side, axis)
        } else {
            approach_cells(ctx, head, side, axis, size)
        };
        let Some(&cell) = cells.first() else {
            continue;
        };

        let priority =
            banded(PriorityScore::BORDER_CONNECTION, (2 - distance as i32) * CLOSENESS_BONUS);
        let mut candidate = Candidate::new(
            cell,
            MoveType::BorderConnection,
            weighted(priority, weight),
            format!("connect {} to the border from {}", cell, head),
        )
        .with_head(head, head_direction(axis, side));
        if distance == 2 {
            candidate = candidate.with_pattern(PatternClass::I);
        }
        return Some(candidate);
    }
    None
}

fn head_distance(head: Pos, side: HeadSide, axis: Axis, size: usize) -> usize {
    let along = axis.along(head);
    match side {
        HeadSide::Near => along,
        HeadSide::Far => size - 1 - along,
    }
}

/// Position `along` steps along the axis and `across` steps across it
fn step(head: Pos, axis: Axis, along: i32, across: i32) -> Option<Pos> {
    match axis {
        Axis::Vertical => head.offset(along, across),
        Axis::Horizontal => head.offset(across, along),
    }
}

/// Empty legal border cells touching the head, straight ahead first
fn border_cells(ctx: &TacticalContext<'_>, head: Pos, side: HeadSide, axis: Axis) -> Vec<Pos> {
    let mut cells: Vec<Pos> = [0, -1, 1]
        .into_iter()
        .filter_map(|across| step(head, axis, side.sign(), across))
        .filter(|&p| ctx.board.contains(p) && is_legal_move(ctx.board, p, ctx.player))
        .collect();
    cells.sort_by_key(|&p| (!is_straight(head, p, axis), -security(ctx.board, p, ctx.player), p));
    cells
}

/// Fill cells of the I pattern from the head to the border cell straight ahead
fn approach_cells(
    ctx: &TacticalContext<'_>,
    head: Pos,
    side: HeadSide,
    axis: Axis,
    size: usize,
) -> Vec<Pos> {
    let Some(border) = step(head, axis, 2 * side.sign(), 0) else {
        return Vec::new();
    };
    if !ctx.board.contains(border) {
        return Vec::new();
    }
    let mut cells: Vec<Pos> = gap_cells(head, border, size)
        .into_iter()
        .filter(|&p| is_legal_move(ctx.board, p, ctx.player))
        .collect();
    cells.sort_by_key(|&p| (!is_straight(head, p, axis), -security(ctx.board, p, ctx.player), p));
    cells
}

fn is_straight(head: Pos, p: Pos, axis: Axis) -> bool {
    axis.across(head) == axis.across(p)
}
