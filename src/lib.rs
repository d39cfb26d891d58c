//! Heuristic engine for a two-player connection game
//!
//! Two players take turns placing stones on an N x N board (15 x 15 by
//! default). Black must link the top and bottom edges, White the left and
//! right edges. Two stones on opposite corners of a 2x2 block are connected
//! unless the other two corners both belong to the opponent, and no move may
//! complete such a crossing.
//!
//! # Architecture
//!
//! The crate is organized into several modules, leaves first:
//! - [`board`]: Board representation with bitboards and move history
//! - [`geometry`]: Pattern vectors (L, I, D), gap cells and border distances
//! - [`rules`]: Diagonal crossing, win detection and the move validator
//! - [`eval`]: Move priorities and cell scoring
//! - [`analysis`]: Gap registry, blocking detection and fragment tracking
//! - [`tactics`]: One handler per tactical idea, each proposing a candidate
//! - [`engine`]: The move pipeline and threat follow-through
//! - [`personality`]: Tunable weights, probabilities and starting area
//! - [`ui`]: Reference desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use bridges::{AIEngine, Board, Personality, Stone};
//!
//! let mut board = Board::new();
//! let mut black = AIEngine::with_seed(Stone::Black, Personality::default(), 1);
//! let mut white = AIEngine::with_seed(Stone::White, Personality::aggressive(), 2);
//!
//! for _ in 0..6 {
//!     for (engine, stone) in [(&mut black, Stone::Black), (&mut white, Stone::White)] {
//!         if let Some(mv) = engine.get_next_move(&board) {
//!             board.make_move(mv.pos(), stone);
//!         }
//!     }
//! }
//! assert_eq!(board.move_count(), 12);
//! ```
//!
//! # Move Priority
//!
//! The engine tries, in order: opening moves, defense of its own threatened
//! gaps, completion of a pending attack, fragment connection, attacks on
//! opponent gaps, border connection, chain extension, safe gap filling and
//! finally diagonal extension.

pub mod analysis;
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod geometry;
pub mod personality;
pub mod rules;
pub mod tactics;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Axis, Board, Pos, Stone, BOARD_SIZE};
pub use engine::{AIEngine, EngineStats, MoveDescriptor, MoveType};
pub use error::{EngineError, Result};
pub use personality::Personality;
