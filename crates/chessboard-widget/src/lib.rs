//! Chessboard widget model.
//!
//! The widget owns an 8x8 grid of [`Field`]s and drives a host rendering
//! [`Surface`] through a set of paint hooks:
//! - [`Board`] places, removes and highlights pieces
//! - [`BoardHooks`] customizes how squares and pieces are painted
//! - [`BoardOptions`] and [`BoardConfig`] hold the theme and piece tokens
//! - [`HtmlSurface`] renders the board as an HTML table
//!
//! # Example
//!
//! ```
//! use chessboard_widget::{Board, Color, HtmlSurface};
//!
//! let mut board = Board::new(HtmlSurface::new());
//! board
//!     .place(["E4", "E5"], "WHITE_PAWN")?
//!     .place_king("e1", Color::White)?
//!     .remove("E4")?;
//! assert!(board.occupant("E4")?.is_none());
//! # Ok::<(), chessboard_widget::BoardError>(())
//! ```

mod board;
mod config;
mod hooks;
mod html;
mod presets;
mod request;
mod snapshot;
mod style;

pub use board::{Board, BoardBuilder, Field};
pub use chessboard_core::{
    parse_piece_type, parse_square, square_name, BoardError, Color, File, Piece, PieceKind, Rank,
    Square,
};
pub use config::{
    BoardConfig, BoardOptions, ColorOverrides, ConfigError, PawnLayout, PieceCatalog,
    PieceOverrides, PieceRenderer, PieceToken, StartPositionOptions,
};
pub use hooks::{
    disacknowledge_field, highlight_field, paint_field, paint_piece, resize_field, BoardHooks,
    DefaultHooks, FieldContext, PieceContext, PieceSlot, Surface,
};
pub use html::{Cell, HtmlSurface, RenderError};
pub use request::{
    IntoColor, IntoPieceType, IntoSquare, IntoSquares, PlaceRequest, PlacementOptions, SquareSpec,
};
pub use snapshot::{BoardSnapshot, FieldSnapshot};
pub use style::Style;
