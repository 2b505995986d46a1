use std::path::PathBuf;

use crate::game::MoveError;

/// Errors raised by the policy network's loss and training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors that can occur when choosing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no legal moves: the board is full")]
    NoLegalMoves,
}

/// Rejected text from the move prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{0} is not a cell (expected 0-8)")]
    OutOfRange(i64),

    #[error("cell {0} is already taken")]
    Occupied(usize),
}

/// Errors that can occur while playing or training.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("agent selected illegal move {cell}: {source}")]
    IllegalMove { cell: usize, source: MoveError },

    #[error("game should be terminal but has no outcome")]
    MissingOutcome,

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
