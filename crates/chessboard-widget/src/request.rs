//! Normalization of placement call shapes.
//!
//! Board operations accept a single square or a collection of squares, and a
//! piece type as a token string or a structured value. The traits here turn
//! every accepted shape into one canonical, fully validated request before
//! the board is touched.

use serde::{Deserialize, Serialize};

use chessboard_core::{parse_piece_type, BoardError, Color, Piece, PieceKind, Square};

/// A single square designator.
pub trait IntoSquare {
    fn into_square(self) -> Result<Square, BoardError>;
}

impl IntoSquare for Square {
    fn into_square(self) -> Result<Square, BoardError> {
        Ok(self)
    }
}

impl IntoSquare for &Square {
    fn into_square(self) -> Result<Square, BoardError> {
        Ok(*self)
    }
}

impl IntoSquare for &str {
    fn into_square(self) -> Result<Square, BoardError> {
        self.parse()
    }
}

impl IntoSquare for String {
    fn into_square(self) -> Result<Square, BoardError> {
        self.parse()
    }
}

impl IntoSquare for &String {
    fn into_square(self) -> Result<Square, BoardError> {
        self.parse()
    }
}

/// One or more square designators.
///
/// Every designator is parsed before any square is returned, so a batch with
/// a single bad name fails as a whole.
pub trait IntoSquares {
    fn into_squares(self) -> Result<Vec<Square>, BoardError>;
}

impl IntoSquares for Square {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        Ok(vec![self])
    }
}

impl IntoSquares for &str {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        Ok(vec![self.into_square()?])
    }
}

impl IntoSquares for String {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        Ok(vec![self.into_square()?])
    }
}

impl IntoSquares for &String {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        Ok(vec![self.into_square()?])
    }
}

impl<T: IntoSquare> IntoSquares for Vec<T> {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        self.into_iter().map(IntoSquare::into_square).collect()
    }
}

impl<T: IntoSquare, const N: usize> IntoSquares for [T; N] {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        self.into_iter().map(IntoSquare::into_square).collect()
    }
}

impl<'a, T> IntoSquares for &'a [T]
where
    &'a T: IntoSquare,
{
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        self.iter().map(IntoSquare::into_square).collect()
    }
}

/// A square designator as it arrives from a dynamic host: one name or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SquareSpec {
    One(String),
    Many(Vec<String>),
}

impl IntoSquares for SquareSpec {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        match self {
            SquareSpec::One(name) => name.into_squares(),
            SquareSpec::Many(names) => names.into_squares(),
        }
    }
}

impl IntoSquares for &SquareSpec {
    fn into_squares(self) -> Result<Vec<Square>, BoardError> {
        match self {
            SquareSpec::One(name) => name.into_squares(),
            SquareSpec::Many(names) => names.as_slice().into_squares(),
        }
    }
}

/// A piece type designator. `None` means an empty square.
pub trait IntoPieceType {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError>;
}

impl IntoPieceType for &str {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        parse_piece_type(self)
    }
}

impl IntoPieceType for String {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        parse_piece_type(&self)
    }
}

impl IntoPieceType for &String {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        parse_piece_type(self)
    }
}

impl IntoPieceType for Piece {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        Ok(Some(self))
    }
}

impl IntoPieceType for Option<Piece> {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        Ok(self)
    }
}

impl IntoPieceType for (PieceKind, Color) {
    fn into_piece_type(self) -> Result<Option<Piece>, BoardError> {
        Ok(Some(Piece::new(self.0, self.1)))
    }
}

/// A color designator.
pub trait IntoColor {
    fn into_color(self) -> Result<Color, BoardError>;
}

impl IntoColor for Color {
    fn into_color(self) -> Result<Color, BoardError> {
        Ok(self)
    }
}

impl IntoColor for &str {
    fn into_color(self) -> Result<Color, BoardError> {
        self.parse()
    }
}

impl IntoColor for String {
    fn into_color(self) -> Result<Color, BoardError> {
        self.parse()
    }
}

impl IntoColor for &String {
    fn into_color(self) -> Result<Color, BoardError> {
        self.parse()
    }
}

/// The canonical form of a placement: validated squares and a resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRequest {
    pub squares: Vec<Square>,
    pub piece: Option<Piece>,
}

impl PlaceRequest {
    /// Resolves the piece type and every square, failing before anything is applied.
    pub fn new(squares: impl IntoSquares, piece: impl IntoPieceType) -> Result<Self, BoardError> {
        let piece = piece.into_piece_type()?;
        let squares = squares.into_squares()?;
        Ok(PlaceRequest { squares, piece })
    }

    /// Builds a request for a piece kind from a square designator and a color.
    pub fn colored(
        kind: PieceKind,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<Self, BoardError> {
        let color = color.into_color()?;
        Self::new(squares, Piece::new(kind, color))
    }
}

/// The option-record form of a per-kind placement: `{ square, color }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementOptions {
    #[serde(alias = "field")]
    pub square: SquareSpec,
    pub color: String,
}

impl PlacementOptions {
    pub fn new(square: impl Into<String>, color: impl Into<String>) -> Self {
        PlacementOptions {
            square: SquareSpec::One(square.into()),
            color: color.into(),
        }
    }

    /// Converts the record into a request for the given piece kind.
    pub fn into_request(self, kind: PieceKind) -> Result<PlaceRequest, BoardError> {
        PlaceRequest::colored(kind, self.square, self.color)
    }
}
