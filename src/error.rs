//! Error kinds surfaced to callers of the engine

use thiserror::Error;

/// Recoverable errors reported by the engine
///
/// None of these leave the board or the scorer in a modified state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },
    #[error("Invalid move, column {column} out of range. Columns must be between 0 and {}", .cols - 1)]
    InvalidColumn { column: usize, cols: usize },
    #[error("no legal moves remain")]
    NoLegalMove,
    #[error("the game is already over")]
    GameOver,
    #[error("could not parse '{0}' as a valid move")]
    UnparsableMove(char),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
