//! Tactical handlers
//!
//! Each handler looks at the position from one narrow angle and proposes at
//! most one candidate move. Handlers never mutate the board; the engine
//! validates their candidates and keeps the first one that passes.

pub mod attack;
pub mod border;
pub mod chain;
pub mod connection;
pub mod diagonal;
pub mod gap_fill;
pub mod opening;
pub mod threat;

use rand::rngs::StdRng;
use rand::Rng;

use crate::analysis::{FragmentTracker, GapRegistry, HeadSide};
use crate::board::{Axis, Board, Pos, Stone};
use crate::engine::MoveType;
use crate::geometry::{Direction, PatternClass};
use crate::personality::Personality;
use crate::rules::ValidationPriority;

/// Everything a handler may read, plus the shared random source
pub struct TacticalContext<'a> {
    pub board: &'a Board,
    pub player: Stone,
    pub personality: &'a Personality,
    /// Absent when the engine runs without a gap registry
    pub registry: Option<&'a GapRegistry>,
    /// Absent when the engine runs without fragment tracking
    pub fragments: Option<&'a FragmentTracker>,
    pub rng: &'a mut StdRng,
}

impl<'a> TacticalContext<'a> {
    #[inline]
    pub fn opponent(&self) -> Stone {
        self.player.opponent()
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.player.axis().unwrap_or(Axis::Vertical)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn own_stones(&self) -> Vec<Pos> {
        self.board.player_positions(self.player)
    }

    /// Uniform draw in [0, 1)
    #[inline]
    pub fn roll(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// True with probability `p`
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        p > 0.0 && self.roll() < p
    }

    /// Heads to extend from, best first.
    ///
    /// With a fragment tracker: both heads of every fragment by fragment
    /// rank. Without one every own stone is a head on both sides.
    pub fn candidate_heads(&self) -> Vec<(Pos, HeadSide)> {
        match self.fragments {
            Some(tracker) => tracker
                .ranked()
                .into_iter()
                .flat_map(|f| [(f.near_head, HeadSide::Near), (f.far_head, HeadSide::Far)])
                .collect(),
            None => self
                .own_stones()
                .into_iter()
                .flat_map(|s| [(s, HeadSide::Near), (s, HeadSide::Far)])
                .collect(),
        }
    }
}

/// A proposed move, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Raw coordinates; negative values are malformed and get dropped
    pub row: i32,
    pub col: i32,
    pub move_type: MoveType,
    pub pattern: Option<PatternClass>,
    pub reason: String,
    pub priority: i32,
    pub validation: ValidationPriority,
    pub from_head: Option<Pos>,
    pub direction: Option<Direction>,
    /// Fill cells left in an attacked gap, for threat follow-through
    pub threat_cells: Vec<Pos>,
}

impl Candidate {
    pub fn new(pos: Pos, move_type: MoveType, priority: i32, reason: impl Into<String>) -> Self {
        Self {
            row: pos.row as i32,
            col: pos.col as i32,
            move_type,
            pattern: None,
            reason: reason.into(),
            priority,
            validation: ValidationPriority::Normal,
            from_head: None,
            direction: None,
            threat_cells: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: PatternClass) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_head(mut self, head: Pos, direction: Direction) -> Self {
        self.from_head = Some(head);
        self.direction = Some(direction);
        self
    }

    pub fn critical(mut self) -> Self {
        self.validation = ValidationPriority::Critical;
        self
    }

    pub fn with_threat_cells(mut self, cells: Vec<Pos>) -> Self {
        self.threat_cells = cells;
        self
    }
}

/// Pick from a best-first list, taking the runner-up with probability `noise`
pub(crate) fn pick_with_noise<T: Copy>(ctx: &mut TacticalContext<'_>, ranked: &[T], noise: f32) -> Option<T> {
    match ranked {
        [] => None,
        [only] => Some(*only),
        [first, second, ..] => {
            if ctx.chance(noise) {
                Some(*second)
            } else {
                Some(*first)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;

    use super::*;

    pub struct Fixture {
        pub board: Board,
        pub personality: Personality,
        pub registry: GapRegistry,
        pub fragments: FragmentTracker,
        pub rng: StdRng,
    }

    impl Fixture {
        pub fn new(stones: &[((u8, u8), Stone)]) -> Self {
            let mut board = Board::new();
            for &((r, c), s) in stones {
                board.place_stone(Pos::new(r, c), s);
            }
            Self {
                board,
                personality: Personality::default(),
                registry: GapRegistry::new(),
                fragments: FragmentTracker::new(),
                rng: StdRng::seed_from_u64(7),
            }
        }

        pub fn ctx(&mut self, player: Stone) -> TacticalContext<'_> {
            self.registry.on_board_changed(&self.board);
            self.fragments.update(&self.board, player, Some(&self.registry));
            TacticalContext {
                board: &self.board,
                player,
                personality: &self.personality,
                registry: Some(&self.registry),
                fragments: Some(&self.fragments),
                rng: &mut self.rng,
            }
        }

        pub fn bare_ctx(&mut self, player: Stone) -> TacticalContext<'_> {
            TacticalContext {
                board: &self.board,
                player,
                personality: &self.personality,
                registry: None,
                fragments: None,
                rng: &mut self.rng,
            }
        }
    }

    pub fn pos_of(c: &Candidate) -> Pos {
        Pos::new(c.row as u8, c.col as u8)
    }
}
