//! Game rules for the connection game
//!
//! This module implements:
//! - Diagonal crossing (two players' links may never cross inside a 2x2 block)
//! - Win condition (an unbroken chain between the player's two edges)
//! - The move validator used as the engine's final legality gate

pub mod crossing;
pub mod validator;
pub mod win;

// Re-exports for convenient access
pub use crossing::{
    cross_corners, is_diagonal_crossed, is_legal_move, would_cross_opponent_diagonal,
    would_cross_own_diagonal,
};
pub use validator::{MoveRejection, MoveValidator, ValidationPriority};
pub use win::{find_winning_path, has_connection};
