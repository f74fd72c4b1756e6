//! Error types used across the crate.
//!
//! `RuleViolation` explains why the engine refused an input. The boolean
//! engine operations swallow it; the `try_*` variants hand it back so front
//! ends can report a reason. `BoardError`, `PositionParseError` and
//! `ConfigError` cover the data formats read by the crate.

use thiserror::Error;

use crate::game_state::checkers_types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("no piece on {0}")]
    EmptySquare(Position),

    #[error("piece on {0} does not belong to the side to move")]
    NotYourPiece(Position),

    #[error("no piece is selected")]
    NoSelection,

    #[error("{0} is not a legal destination for the selected piece")]
    IllegalDestination(Position),

    #[error("destination {0} is occupied")]
    OccupiedDestination(Position),

    #[error("the piece on {0} must keep jumping")]
    ContinuationRequired(Position),

    #[error("the game is over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("piece on light square {0}")]
    PieceOnLightSquare(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParseError {
    #[error("position is missing the {0} field")]
    MissingField(&'static str),

    #[error("position has extra trailing fields")]
    TrailingFields,

    #[error("invalid side to move: {0:?}")]
    InvalidTurn(String),

    #[error("expected piece list prefixed with {expected:?}, found {found:?}")]
    InvalidPrefix { expected: char, found: String },

    #[error("invalid square token: {0:?}")]
    InvalidSquare(String),

    #[error("square {0} listed more than once")]
    DuplicateSquare(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid start position in config: {0}")]
    StartPosition(#[from] PositionParseError),
}

/// Failures that end a console session.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
