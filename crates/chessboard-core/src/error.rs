//! Errors raised by square addressing and piece lookup.

use thiserror::Error;

/// Errors that can occur when addressing squares or resolving piece tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The square designator is not a file letter A-H followed by a rank digit 1-8.
    #[error("invalid square name: '{0}'")]
    InvalidSquareName(String),

    /// A zero-based grid index fell outside 0-7.
    #[error("invalid coordinate: ({x}, {y})")]
    InvalidCoordinate { x: u8, y: u8 },

    /// A non-empty piece type token matched no catalog entry.
    #[error("unknown piece type: '{0}'")]
    UnknownPieceType(String),

    /// A color designator was neither white nor black.
    #[error("unknown color: '{0}'")]
    UnknownColor(String),
}
