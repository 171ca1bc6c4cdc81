//! Serializable view of the board state.

use serde::Serialize;

use chessboard_core::{Piece, Square};

/// One square as captured by [`crate::Board::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub x: u8,
    pub y: u8,
    pub occupant: Option<Piece>,
    /// Short piece code, e.g. "BKN".
    pub code: Option<String>,
    pub highlighted: bool,
}

/// The whole board in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub fields: Vec<FieldSnapshot>,
    pub highlighted: Vec<Square>,
}

impl BoardSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
