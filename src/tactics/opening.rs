//! Opening moves: the first stone and the pattern that follows it

use rand::Rng;

use crate::board::Pos;
use crate::engine::MoveType;
use crate::eval::{security, PriorityScore};
use crate::geometry::{gap_cells, pattern_moves, PatternClass, PatternMove, D_VECTORS, L_VECTORS};
use crate::rules::is_legal_move;

use super::{pick_with_noise, Candidate, TacticalContext};

/// First stone: the centre of the starting area, jittered by personality
pub fn initial_move(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let size = ctx.size();
    let area = &ctx.personality.starting_area;
    let rows = area.rows(size);
    let cols = area.cols(size);
    let center = Pos::new(
        ((rows.start() + rows.end()) / 2) as u8,
        ((cols.start() + cols.end()) / 2) as u8,
    );
    let center_weight = area.center_weight;
    let jitter = ctx.personality.randomization.starting_jitter;

    let mut target = center;
    if ctx.chance(jitter) {
        if ctx.chance(center_weight) {
            // Stay next to the centre
            let r = (center.row as i32 + ctx.rng.gen_range(-1..=1))
                .clamp(*rows.start() as i32, *rows.end() as i32);
            let c = (center.col as i32 + ctx.rng.gen_range(-1..=1))
                .clamp(*cols.start() as i32, *cols.end() as i32);
            target = Pos::new(r as u8, c as u8);
        } else {
            let r = ctx.rng.gen_range(rows.clone());
            let c = ctx.rng.gen_range(cols.clone());
            target = Pos::new(r as u8, c as u8);
        }
    }

    if !is_legal_move(ctx.board, target, ctx.player) {
        // Closest free cell of the area
        let mut free: Vec<Pos> = rows
            .clone()
            .flat_map(|r| cols.clone().map(move |c| Pos::new(r as u8, c as u8)))
            .filter(|&p| is_legal_move(ctx.board, p, ctx.player))
            .collect();
        free.sort_by_key(|p| (p.chebyshev(center), *p));
        target = *free.first()?;
    }

    Some(Candidate::new(
        target,
        MoveType::Initial,
        PriorityScore::OPENING,
        format!("opening stone at {target}"),
    ))
}

/// Second stone: an L pattern from the first one along the player's axis,
/// or a diagonal step away when an opponent stone presses on it orthogonally.
pub fn second_move(ctx: &mut TacticalContext<'_>) -> Option<Candidate> {
    let own = ctx.own_stones();
    let [first] = own.as_slice() else {
        return None;
    };
    let first = *first;
    let axis = ctx.axis();
    let size = ctx.size();
    let opponent = ctx.opponent();

    let pressure: Vec<(i32, i32)> = [(-1, 0), (1, 0), (0, -1), (0, 1)]
        .into_iter()
        .filter(|&(dr, dc)| ctx.board.get_at(first.row as i32 + dr, first.col as i32 + dc) == opponent)
        .collect();

    if !pressure.is_empty() {
        let mut away: Vec<PatternMove> = pattern_moves(first, &D_VECTORS, axis, size)
            .into_iter()
            .filter(|m| {
                pressure
                    .iter()
                    .all(|&(pr, pc)| pr * m.vector.dr.signum() + pc * m.vector.dc.signum() <= 0)
            })
            .filter(|m| diagonal_open(ctx, m))
            .collect();
        away.sort_by_key(|m| -border_room(m, axis, size));
        if let Some(m) = away.first() {
            return Some(
                Candidate::new(
                    m.target,
                    MoveType::Second,
                    PriorityScore::OPENING,
                    format!("diagonal away from pressure at {}", first),
                )
                .with_pattern(PatternClass::D)
                .with_head(first, m.direction),
            );
        }
    }

    let mut l_moves: Vec<PatternMove> = pattern_moves(first, &L_VECTORS, axis, size)
        .into_iter()
        .filter(|m| is_legal_move(ctx.board, m.target, ctx.player))
        .filter(|m| gap_cells(first, m.target, size).iter().all(|&c| ctx.board.is_empty(c)))
        .collect();
    // Best axis alignment first, then toward the edge with more room
    l_moves.sort_by_key(|m| (-m.alignment, -border_room(m, axis, size), m.target));
    let best_alignment = l_moves.first().map(|m| m.alignment);
    let top: Vec<PatternMove> = l_moves
        .iter()
        .copied()
        .filter(|m| Some(m.alignment) == best_alignment)
        .collect();
    let noise = ctx.personality.randomization.pattern_selection;
    if let Some(m) = pick_with_noise(ctx, &top, noise) {
        return Some(
            Candidate::new(
                m.target,
                MoveType::Second,
                PriorityScore::OPENING,
                format!("L pattern from {}", first),
            )
            .with_pattern(PatternClass::L)
            .with_head(first, m.direction),
        );
    }

    // Boxed in: any legal diagonal pattern
    let mut diagonals: Vec<PatternMove> = pattern_moves(first, &D_VECTORS, axis, size)
        .into_iter()
        .filter(|m| diagonal_open(ctx, m))
        .collect();
    diagonals.sort_by_key(|m| -security(ctx.board, m.target, ctx.player));
    diagonals.first().map(|m| {
        Candidate::new(
            m.target,
            MoveType::Second,
            PriorityScore::OPENING,
            format!("fallback diagonal from {}", first),
        )
        .with_pattern(PatternClass::D)
        .with_head(first, m.direction)
    })
}

fn diagonal_open(ctx: &TacticalContext<'_>, m: &PatternMove) -> bool {
    is_legal_move(ctx.board, m.target, ctx.player)
        && gap_cells(m.origin, m.target, ctx.size())
            .iter()
            .all(|&c| ctx.board.is_empty(c))
}

/// Rows (or columns) left between the target and the edge it moves toward
fn border_room(m: &PatternMove, axis: crate::board::Axis, size: usize) -> i32 {
    let along = axis.along(m.target) as i32;
    if m.direction.along(axis) < 0 {
        along
    } else {
        size as i32 - 1 - along
    }
}
