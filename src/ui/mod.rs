//! GUI module for the connection game
//!
//! This module provides a native Rust GUI using egui/eframe. It plays the
//! role of the game loop: it owns the board, applies the moves the engines
//! return and decides when a connection ends the game.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::BridgesApp;
pub use game_state::{GameMode, GameResult, GameState};
