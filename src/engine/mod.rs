//! Main AI engine orchestrating the tactical handlers
//!
//! Every turn the engine refreshes its analysis of the board and then walks
//! a fixed list of steps, highest priority first. The first step that
//! proposes a move which passes the validator decides the turn:
//!
//! 1. **Initial**: first stone, inside the starting area
//! 2. **Second**: second stone, an L (or escaping D) pattern from the first
//! 3. **Threat defense**: save an own gap with one usable cell left
//! 4. **Pending attack**: complete the cut armed two plies ago
//! 5. **Fragment connection**: join the active fragment to its neighbour
//! 6. **Attack**: take a fill cell of a vulnerable opponent gap
//! 7. **Border connection**: link a head within two cells of its edge
//! 8. **Chain extension**: grow a head toward its edge
//! 9. **Gap fill**: solidify a safe own gap
//! 10. **Diagonal extension**: last resort, when enabled
//!
//! The engine never mutates the board; the caller applies the returned move.
//!
//! # Example
//!
//! ```
//! use bridges::{AIEngine, Board, Personality, Stone};
//!
//! let mut engine = AIEngine::with_seed(Stone::Black, Personality::default(), 42);
//! let mut board = Board::new();
//!
//! let mv = engine.get_next_move(&board).expect("empty board always has a move");
//! println!("{} at ({}, {}): {}", mv.move_type.name(), mv.row, mv.col, mv.reason);
//! board.make_move(mv.pos(), Stone::Black);
//! ```

pub mod descriptor;
pub mod followup;

pub use descriptor::{EngineStats, MoveDescriptor, MoveType};
pub use followup::{FollowUp, ThreatRecord, ThreatStatus, ThreatTracker};

use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace, warn};

use crate::analysis::{FragmentTracker, GapRegistry};
use crate::board::{Board, Pos, Stone};
use crate::eval::{weighted, PriorityScore};
use crate::personality::Personality;
use crate::rules::{MoveRejection, MoveValidator};
use crate::tactics::{
    attack, border, chain, connection, diagonal, gap_fill, opening, threat, Candidate,
    TacticalContext,
};

/// Fragment connection only runs once this many stones are on the board
const FRAGMENT_CONNECTION_MIN_MOVES: usize = 5;

type Handler = fn(&mut TacticalContext<'_>) -> Option<Candidate>;

/// One entry of the move pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Initial,
    Second,
    ThreatDefense,
    PendingAttack,
    FragmentConnection,
    Attack,
    BorderConnection,
    ChainExtension,
    GapFill,
    DiagonalExtension,
}

const PIPELINE: [Step; 10] = [
    Step::Initial,
    Step::Second,
    Step::ThreatDefense,
    Step::PendingAttack,
    Step::FragmentConnection,
    Step::Attack,
    Step::BorderConnection,
    Step::ChainExtension,
    Step::GapFill,
    Step::DiagonalExtension,
];

impl Step {
    fn name(self) -> &'static str {
        match self {
            Step::Initial => "initial",
            Step::Second => "second",
            Step::ThreatDefense => "threat-defense",
            Step::PendingAttack => "pending-attack",
            Step::FragmentConnection => "fragment-connection",
            Step::Attack => "attack",
            Step::BorderConnection => "border-connection",
            Step::ChainExtension => "chain-extension",
            Step::GapFill => "gap-fill",
            Step::DiagonalExtension => "diagonal-extension",
        }
    }

    fn is_enabled(self, own_stones: usize, total_moves: usize, personality: &Personality) -> bool {
        match self {
            Step::Initial => own_stones == 0,
            Step::Second => own_stones == 1,
            Step::FragmentConnection => total_moves >= FRAGMENT_CONNECTION_MIN_MOVES,
            Step::DiagonalExtension => personality.strategy.enable_diagonal_extension,
            _ => own_stones >= 1,
        }
    }

    /// Tactical handler for the step; pending attacks are handled by the engine
    fn handler(self) -> Option<Handler> {
        let handler: Handler = match self {
            Step::Initial => opening::initial_move,
            Step::Second => opening::second_move,
            Step::ThreatDefense => threat::defend_threatened_gap,
            Step::PendingAttack => return None,
            Step::FragmentConnection => connection::connect_fragments,
            Step::Attack => attack::attack_vulnerable_gap,
            Step::BorderConnection => border::connect_border,
            Step::ChainExtension => chain::extend_chain,
            Step::GapFill => gap_fill::fill_safe_gap,
            Step::DiagonalExtension => diagonal::extend_diagonal,
        };
        Some(handler)
    }
}

/// Heuristic engine playing one side of the connection game.
///
/// The gap registry and fragment tracker are optional collaborators. Without
/// them every own stone counts as a head and the gap-based steps stay quiet.
pub struct AIEngine {
    player: Stone,
    personality: Personality,
    rng: StdRng,
    registry: Option<GapRegistry>,
    fragments: Option<FragmentTracker>,
    threats: ThreatTracker,
    /// Promotes per-step logging from trace to debug
    debug: bool,
    own_moves: usize,
    last_move_type: Option<MoveType>,
}

impl AIEngine {
    /// Engine for `player` with the balanced personality.
    ///
    /// # Example
    ///
    /// ```
    /// use bridges::{AIEngine, Stone};
    ///
    /// let engine = AIEngine::new(Stone::White);
    /// assert_eq!(engine.player(), Stone::White);
    /// ```
    #[must_use]
    pub fn new(player: Stone) -> Self {
        Self::with_config(player, Personality::default())
    }

    /// Engine with a custom personality, seeded from the OS
    #[must_use]
    pub fn with_config(player: Stone, personality: Personality) -> Self {
        Self::with_collaborators(
            player,
            personality,
            StdRng::from_entropy(),
            Some(GapRegistry::new()),
            Some(FragmentTracker::new()),
        )
    }

    /// Reproducible engine: the same seed and the same boards give the same moves
    #[must_use]
    pub fn with_seed(player: Stone, personality: Personality, seed: u64) -> Self {
        Self::with_collaborators(
            player,
            personality,
            StdRng::seed_from_u64(seed),
            Some(GapRegistry::new()),
            Some(FragmentTracker::new()),
        )
    }

    /// Engine with explicitly injected collaborators; `None` disables one
    #[must_use]
    pub fn with_collaborators(
        player: Stone,
        personality: Personality,
        rng: StdRng,
        registry: Option<GapRegistry>,
        fragments: Option<FragmentTracker>,
    ) -> Self {
        Self {
            player,
            personality,
            rng,
            registry,
            fragments,
            threats: ThreatTracker::new(),
            debug: false,
            own_moves: 0,
            last_move_type: None,
        }
    }

    #[inline]
    pub fn player(&self) -> Stone {
        self.player
    }

    #[inline]
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    /// Current threat record, if one is live
    pub fn threat(&self) -> Option<&ThreatRecord> {
        self.threats.record()
    }

    /// Read-only view of the gap registry, if enabled
    pub fn registry(&self) -> Option<&GapRegistry> {
        self.registry.as_ref()
    }

    /// Choose the next move for the engine's player.
    ///
    /// # Returns
    /// A validated move, or `None` when no step produced a legal candidate.
    pub fn get_next_move(&mut self, board: &Board) -> Option<MoveDescriptor> {
        if !self.player.is_player() {
            return None;
        }
        self.refresh(board);
        self.threats.collect_garbage(self.own_moves);

        let own_stones = board.stone_count(self.player) as usize;
        let total_moves = board.move_count();

        for step in PIPELINE {
            if !step.is_enabled(own_stones, total_moves, &self.personality) {
                continue;
            }
            self.log_step(step, "trying");

            let candidate = match step.handler() {
                Some(handler) => self.run_handler(step, handler, board),
                None => self.pending_attack(board),
            };
            let Some(candidate) = candidate else {
                continue;
            };

            match MoveValidator::validate(
                board,
                candidate.row,
                candidate.col,
                self.player,
                candidate.validation,
            ) {
                Ok(pos) => return Some(self.accept(board, step, candidate, pos)),
                Err(rejection @ MoveRejection::Malformed { .. }) => {
                    warn!(step = step.name(), %rejection, "malformed candidate dropped");
                }
                Err(rejection) => {
                    debug!(step = step.name(), %rejection, "candidate rejected");
                }
            }
            if step == Step::PendingAttack {
                self.threats.abandon();
            }
        }

        debug!(player = self.player.name(), "no legal candidate");
        None
    }

    /// Forget everything learned about the current game
    pub fn reset(&mut self) {
        if let Some(registry) = self.registry.as_mut() {
            registry.clear();
        }
        if let Some(fragments) = self.fragments.as_mut() {
            fragments.clear();
        }
        self.threats.clear();
        self.own_moves = 0;
        self.last_move_type = None;
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn stats(&self) -> EngineStats {
        let active = self.fragments.as_ref().and_then(|f| f.active_fragment());
        EngineStats {
            chain_length: active.map_or(0, |f| f.size()),
            fragments: self.fragments.as_ref().map_or(0, |f| f.fragments().len()),
            personality: self.personality.name.clone(),
            gap_stats: self.registry.as_ref().map(|r| r.stats()).unwrap_or_default(),
            last_move_type: self.last_move_type,
            moves_played: self.own_moves,
            threat: self.threats.status(),
        }
    }

    /// Does `player` still have an open pattern on `board`?
    ///
    /// A connection is only final once the winner has no gaps left to fill.
    pub fn has_any_gaps(&mut self, board: &Board, player: Stone) -> bool {
        match self.registry.as_mut() {
            Some(registry) => {
                registry.on_board_changed(board);
                registry.has_any_gaps(player)
            }
            None => {
                let mut registry = GapRegistry::new();
                registry.on_board_changed(board);
                registry.has_any_gaps(player)
            }
        }
    }

    fn refresh(&mut self, board: &Board) {
        if let Some(registry) = self.registry.as_mut() {
            registry.on_board_changed(board);
        }
        if let Some(fragments) = self.fragments.as_mut() {
            fragments.update(board, self.player, self.registry.as_ref());
        }
    }

    /// Run a handler, treating a panic as "no candidate"
    fn run_handler(&mut self, step: Step, handler: Handler, board: &Board) -> Option<Candidate> {
        let mut ctx = TacticalContext {
            board,
            player: self.player,
            personality: &self.personality,
            registry: self.registry.as_ref(),
            fragments: self.fragments.as_ref(),
            rng: &mut self.rng,
        };
        match panic::catch_unwind(AssertUnwindSafe(|| handler(&mut ctx))) {
            Ok(candidate) => candidate,
            Err(_) => {
                warn!(step = step.name(), "handler panicked, skipping step");
                None
            }
        }
    }

    fn pending_attack(&mut self, board: &Board) -> Option<Candidate> {
        let target = self.threats.record().map(|r| r.target_cell)?;
        match self.threats.follow_up(board, self.player) {
            FollowUp::Complete(cell) => Some(Candidate::new(
                cell,
                MoveType::ThreatFollowUp,
                weighted(PriorityScore::THREAT_FOLLOW_UP, self.personality.priorities.attack),
                format!("complete the cut started at {}", target),
            )),
            FollowUp::Idle | FollowUp::Abandoned => None,
        }
    }

    fn accept(&mut self, board: &Board, step: Step, candidate: Candidate, pos: Pos) -> MoveDescriptor {
        if step == Step::PendingAttack {
            self.threats.fulfil();
        } else if candidate.move_type == MoveType::Attack && !candidate.threat_cells.is_empty() {
            self.threats
                .arm(board, self.own_moves, pos, candidate.threat_cells.clone());
        }
        self.own_moves += 1;
        self.last_move_type = Some(candidate.move_type);

        debug!(
            player = self.player.name(),
            step = step.name(),
            pos = %pos,
            value = candidate.priority,
            reason = %candidate.reason,
            "move chosen"
        );

        MoveDescriptor {
            row: pos.row as usize,
            col: pos.col as usize,
            move_type: candidate.move_type,
            pattern: candidate.pattern,
            reason: candidate.reason,
            value: candidate.priority,
            from_head: candidate.from_head,
            direction: candidate.direction,
        }
    }

    fn log_step(&self, step: Step, message: &str) {
        if self.debug {
            debug!(step = step.name(), "{}", message);
        } else {
            trace!(step = step.name(), "{}", message);
        }
    }
}
