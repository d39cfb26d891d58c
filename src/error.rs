//! Error types for configuration loading and move application

use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Pos, Stone};
use crate::rules::MoveRejection;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to read personality file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid personality JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("illegal move for {player:?} at {pos}: {reason}")]
    IllegalMove {
        pos: Pos,
        player: Stone,
        #[source]
        reason: MoveRejection,
    },

    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Stone),

    #[error("game is already over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, EngineError>;
