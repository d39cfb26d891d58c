//! Move descriptors and engine statistics

use serde::Serialize;

use crate::analysis::GapStats;
use crate::board::Pos;
use crate::geometry::{Direction, PatternClass};

use super::followup::ThreatStatus;

/// Pipeline step that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveType {
    Initial,
    Second,
    ThreatDefense,
    ThreatFollowUp,
    FragmentConnection,
    Attack,
    BorderConnection,
    ChainExtension,
    GapFill,
    DiagonalExtension,
}

impl MoveType {
    pub fn name(self) -> &'static str {
        match self {
            MoveType::Initial => "initial",
            MoveType::Second => "second",
            MoveType::ThreatDefense => "threat-defense",
            MoveType::ThreatFollowUp => "threat-follow-up",
            MoveType::FragmentConnection => "fragment-connection",
            MoveType::Attack => "attack",
            MoveType::BorderConnection => "border-connection",
            MoveType::ChainExtension => "chain-extension",
            MoveType::GapFill => "gap-fill",
            MoveType::DiagonalExtension => "diagonal-extension",
        }
    }
}

/// A validated move returned to the caller, who applies it to the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveDescriptor {
    pub row: usize,
    pub col: usize,
    pub move_type: MoveType,
    /// Pattern class the move creates or completes, if any
    pub pattern: Option<PatternClass>,
    pub reason: String,
    /// Weighted priority of the candidate
    pub value: i32,
    /// Stone the move was played from
    pub from_head: Option<Pos>,
    pub direction: Option<Direction>,
}

impl MoveDescriptor {
    #[inline]
    pub fn pos(&self) -> Pos {
        Pos::new(self.row as u8, self.col as u8)
    }
}

/// Diagnostics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Stones in the active fragment
    pub chain_length: usize,
    pub fragments: usize,
    pub personality: String,
    pub gap_stats: GapStats,
    pub last_move_type: Option<MoveType>,
    pub moves_played: usize,
    pub threat: Option<ThreatStatus>,
}
