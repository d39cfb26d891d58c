//! Threat follow-through
//!
//! After an attack that leaves more fill cells in the opponent's gap, the
//! engine arms a record. On its next turn (two plies later) it either
//! completes the cut by taking another fill cell, or gives up because the
//! opponent already answered. A record never re-arms.

use serde::Serialize;
use tracing::info;

use crate::board::{Board, Pos, Stone};
use crate::rules::is_legal_move;

/// Own moves after which a record is dropped whatever its status
const STALE_AFTER_OWN_MOVES: usize = 4;

/// Plies between arming and the follow-up turn
const FOLLOW_UP_PLIES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThreatStatus {
    Armed,
    Fulfilled,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatRecord {
    /// Board move count when the attack was chosen
    pub created_at_move: usize,
    /// Own move counter when the attack was chosen
    pub created_at_own_move: usize,
    pub target_cell: Pos,
    pub alternative_fill_cells: Vec<Pos>,
    pub status: ThreatStatus,
}

/// What the follow-up step decided this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Nothing armed, or not yet time
    Idle,
    /// Play this cell to complete the cut
    Complete(Pos),
    /// Record abandoned this turn
    Abandoned,
}

/// Holds at most one live threat record
#[derive(Debug, Clone, Default)]
pub struct ThreatTracker {
    record: Option<ThreatRecord>,
}

impl ThreatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.record = None;
    }

    pub fn record(&self) -> Option<&ThreatRecord> {
        self.record.as_ref()
    }

    pub fn status(&self) -> Option<ThreatStatus> {
        self.record.as_ref().map(|r| r.status)
    }

    /// Arm a new record, replacing any previous one
    pub fn arm(&mut self, board: &Board, own_moves: usize, target: Pos, alternatives: Vec<Pos>) {
        info!(
            target = %target,
            alternatives = alternatives.len(),
            at_move = board.move_count(),
            "threat armed"
        );
        self.record = Some(ThreatRecord {
            created_at_move: board.move_count(),
            created_at_own_move: own_moves,
            target_cell: target,
            alternative_fill_cells: alternatives,
            status: ThreatStatus::Armed,
        });
    }

    /// Drop a record older than four of the engine's own moves
    pub fn collect_garbage(&mut self, own_moves: usize) {
        let stale = self
            .record
            .as_ref()
            .is_some_and(|r| own_moves.saturating_sub(r.created_at_own_move) > STALE_AFTER_OWN_MOVES);
        if stale {
            self.record = None;
        }
    }

    /// Decide the follow-up for `player` on the current board.
    ///
    /// Exactly two plies after arming: abandon if the opponent took any of
    /// the cells, otherwise propose a different empty cell. Later than that
    /// the record is abandoned.
    pub fn follow_up(&mut self, board: &Board, player: Stone) -> FollowUp {
        let Some(record) = self.record.as_mut() else {
            return FollowUp::Idle;
        };
        if record.status != ThreatStatus::Armed {
            return FollowUp::Idle;
        }

        let elapsed = board.move_count().saturating_sub(record.created_at_move);
        if elapsed < FOLLOW_UP_PLIES {
            return FollowUp::Idle;
        }

        let opponent = player.opponent();
        let answered = record
            .alternative_fill_cells
            .iter()
            .chain(std::iter::once(&record.target_cell))
            .any(|&c| board.get(c) == opponent);

        let next = record
            .alternative_fill_cells
            .iter()
            .copied()
            .find(|&c| c != record.target_cell && is_legal_move(board, c, player));

        match (elapsed, answered, next) {
            (FOLLOW_UP_PLIES, false, Some(cell)) => FollowUp::Complete(cell),
            _ => {
                info!(
                    target = %record.target_cell,
                    elapsed,
                    answered,
                    "threat abandoned"
                );
                record.status = ThreatStatus::Abandoned;
                FollowUp::Abandoned
            }
        }
    }

    /// The completing move was accepted
    pub fn fulfil(&mut self) {
        if let Some(record) = self.record.as_mut() {
            if record.status == ThreatStatus::Armed {
                info!(target = %record.target_cell, "threat fulfilled");
                record.status = ThreatStatus::Fulfilled;
            }
        }
    }

    /// The completing move was rejected by the validator
    pub fn abandon(&mut self) {
        if let Some(record) = self.record.as_mut() {
            if record.status == ThreatStatus::Armed {
                info!(target = %record.target_cell, "threat abandoned after rejection");
                record.status = ThreatStatus::Abandoned;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black L gap (5,5)-(7,6) with fill cells (6,5) and (6,6); White attacks (6,5)
    fn armed() -> (Board, ThreatTracker) {
        let mut board = Board::new();
        board.place_stone(Pos::new(5, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);
        board.place_stone(Pos::new(0, 0), Stone::White);

        let mut tracker = ThreatTracker::new();
        tracker.arm(&board, 1, Pos::new(6, 5), vec![Pos::new(6, 6)]);
        board.place_stone(Pos::new(6, 5), Stone::White);
        (board, tracker)
    }

    #[test]
    fn test_completes_when_unanswered() {
        let (mut board, mut tracker) = armed();
        board.place_stone(Pos::new(12, 12), Stone::Black);

        assert_eq!(tracker.follow_up(&board, Stone::White), FollowUp::Complete(Pos::new(6, 6)));
        tracker.fulfil();
        assert_eq!(tracker.status(), Some(ThreatStatus::Fulfilled));
        // Never re-arms
        assert_eq!(tracker.follow_up(&board, Stone::White), FollowUp::Idle);
    }

    #[test]
    fn test_abandons_when_answered() {
        let (mut board, mut tracker) = armed();
        board.place_stone(Pos::new(6, 6), Stone::Black);
        assert_eq!(tracker.follow_up(&board, Stone::White), FollowUp::Abandoned);
        assert_eq!(tracker.status(), Some(ThreatStatus::Abandoned));
    }

    #[test]
    fn test_idle_before_reply() {
        let (board, mut tracker) = armed();
        assert_eq!(tracker.follow_up(&board, Stone::White), FollowUp::Idle);
        assert_eq!(tracker.status(), Some(ThreatStatus::Armed));
    }

    #[test]
    fn test_abandons_when_late() {
        let (mut board, mut tracker) = armed();
        board.place_stone(Pos::new(12, 12), Stone::Black);
        board.place_stone(Pos::new(0, 14), Stone::White);
        board.place_stone(Pos::new(12, 13), Stone::Black);
        assert_eq!(tracker.follow_up(&board, Stone::White), FollowUp::Abandoned);
    }

    #[test]
    fn test_garbage_collection() {
        let (_, mut tracker) = armed();
        tracker.collect_garbage(5);
        assert!(tracker.record().is_some());
        tracker.collect_garbage(6);
        assert!(tracker.record().is_none());
    }

    #[test]
    fn test_rearming_replaces_record() {
        let (board, mut tracker) = armed();
        tracker.arm(&board, 2, Pos::new(9, 9), vec![Pos::new(9, 10)]);
        assert_eq!(tracker.record().unwrap().target_cell, Pos::new(9, 9));
        assert_eq!(tracker.status(), Some(ThreatStatus::Armed));
    }
}
