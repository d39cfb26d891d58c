//! Game state management for the GUI

use std::time::{Duration, Instant};

use tracing::info;

use crate::error::{EngineError, Result};
use crate::rules::{MoveValidator, ValidationPriority};
use crate::{AIEngine, Board, EngineStats, MoveDescriptor, Personality, Pos, Stone};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Human vs AI, human playing either colour
    PvE { human_color: Stone },
    /// AI vs AI, stepped by the front-end
    EvE,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// `None` when the board filled up without a final connection
    pub winner: Option<Stone>,
    pub winning_path: Vec<Pos>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_turn: Stone,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<(Pos, Stone)>,
    pub last_descriptor: Option<MoveDescriptor>,
    pub last_stats: Option<EngineStats>,
    pub move_timer: MoveTimer,
    pub message: Option<String>,
    /// Connection reached but the winner still has open gaps
    pub provisional_winner: Option<Stone>,
    personality: Personality,
    black_ai: AIEngine,
    white_ai: AIEngine,
}

impl GameState {
    pub fn new(mode: GameMode, personality: Personality) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_turn: Stone::Black,
            game_over: None,
            last_move: None,
            move_history: Vec::new(),
            last_descriptor: None,
            last_stats: None,
            move_timer: MoveTimer::default(),
            message: None,
            provisional_winner: None,
            black_ai: AIEngine::with_config(Stone::Black, personality.clone()),
            white_ai: AIEngine::with_config(Stone::White, personality.clone()),
            personality,
        }
    }

    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_descriptor = None;
        self.last_stats = None;
        self.move_timer = MoveTimer::default();
        self.message = None;
        self.provisional_winner = None;
        self.black_ai.reset();
        self.white_ai.reset();
    }

    /// Switch mode and start a new game
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.black_ai.set_debug_mode(enabled);
        self.white_ai.set_debug_mode(enabled);
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn == human_color,
            GameMode::EvE => false,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        self.game_over.is_none() && !self.is_human_turn()
    }

    /// Attempt to place a human stone at the given position
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<()> {
        if self.game_over.is_some() {
            return Err(EngineError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(EngineError::NotYourTurn(self.current_turn));
        }

        let player = self.current_turn;
        MoveValidator::validate_pos(&self.board, pos, player, ValidationPriority::Normal)
            .map_err(|reason| EngineError::IllegalMove { pos, player, reason })?;

        self.execute_move(pos);
        Ok(())
    }

    /// Let the engine of the side to move play once
    pub fn play_ai_turn(&mut self) {
        if !self.is_ai_turn() {
            return;
        }
        let color = self.current_turn;
        let started = Instant::now();
        let engine = match color {
            Stone::White => &mut self.white_ai,
            _ => &mut self.black_ai,
        };
        let descriptor = engine.get_next_move(&self.board);
        self.last_stats = Some(engine.stats());
        self.move_timer.set_ai_time(started.elapsed());

        match descriptor {
            Some(mv) => {
                let pos = mv.pos();
                self.last_descriptor = Some(mv);
                self.execute_move(pos);
            }
            None => {
                self.message = Some(format!("{} AI found no legal move", color.name()));
                self.game_over = Some(GameResult {
                    winner: None,
                    winning_path: Vec::new(),
                });
            }
        }
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) {
        let color = self.current_turn;
        let outcome = self.board.make_move(pos, color);
        if !outcome.success {
            self.message = Some(format!("move at {} was refused by the board", pos));
            return;
        }

        self.move_history.push((pos, color));
        self.last_move = Some(pos);
        self.move_timer.stop();
        self.message = None;

        if let Some(result) = self.check_game_over() {
            info!(winner = ?result.winner, moves = self.board.move_count(), "game over");
            self.game_over = Some(result);
            return;
        }

        self.current_turn = color.opponent();
        self.move_timer.start();
    }

    /// A connection only ends the game once its owner has no gaps left
    fn check_game_over(&mut self) -> Option<GameResult> {
        self.provisional_winner = None;
        for color in [Stone::Black, Stone::White] {
            let check = self.board.check_win(color);
            if !check.is_win {
                continue;
            }
            let engine = match color {
                Stone::White => &mut self.white_ai,
                _ => &mut self.black_ai,
            };
            if engine.has_any_gaps(&self.board, color) {
                self.provisional_winner = Some(color);
                self.message = Some(format!("{} connected, gaps still open", color.name()));
                continue;
            }
            return Some(GameResult {
                winner: Some(color),
                winning_path: check.path,
            });
        }

        self.board.is_full().then(|| GameResult {
            winner: self.provisional_winner,
            winning_path: Vec::new(),
        })
    }

    /// Path to highlight: final or provisional connection
    pub fn winning_path(&self) -> Vec<Pos> {
        if let Some(result) = &self.game_over {
            return result.winning_path.clone();
        }
        self.provisional_winner
            .map(|c| self.board.check_win(c).path)
            .unwrap_or_default()
    }

    /// Engine of either colour, for overlays
    pub fn engine(&self, color: Stone) -> &AIEngine {
        match color {
            Stone::White => &self.white_ai,
            _ => &self.black_ai,
        }
    }

    /// Undo last move (human + AI reply in PvE), replaying the rest
    pub fn undo(&mut self) {
        if self.move_history.is_empty() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        let moves_to_keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<_> = self.move_history.drain(..moves_to_keep).collect();

        self.board = Board::new();
        self.move_history.clear();
        self.current_turn = Stone::Black;
        self.game_over = None;
        self.provisional_winner = None;
        self.last_move = None;
        self.last_descriptor = None;
        self.black_ai.reset();
        self.white_ai.reset();

        for (pos, color) in moves {
            self.board.make_move(pos, color);
            self.move_history.push((pos, color));
            self.last_move = Some(pos);
            self.current_turn = color.opponent();
        }

        self.move_timer.start();
    }
}
