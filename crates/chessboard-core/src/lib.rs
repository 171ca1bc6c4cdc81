//! Core types for the chessboard widget.
//!
//! This crate provides the addressing and piece vocabulary shared by the
//! widget and its bindings:
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Piece`], [`PieceKind`], and [`Color`] for piece representation
//! - Piece type token parsing ("BLACK_KNIGHT", "B_KNIGHT", "BKN", ...)
//! - [`BoardError`], the error taxonomy for addressing and lookup failures

mod color;
mod error;
mod piece;
mod square;

pub use color::Color;
pub use error::BoardError;
pub use piece::{parse_piece_type, Piece, PieceKind};
pub use square::{parse_square, square_name, File, Rank, Square};
