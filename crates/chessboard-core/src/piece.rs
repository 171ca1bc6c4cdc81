//! Chess piece representation and the piece type token catalog.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BoardError, Color};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the capitalized name, e.g. "Knight".
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Returns the upper-case name used in piece type tokens.
    pub const fn token(self) -> &'static str {
        match self {
            PieceKind::Pawn => "PAWN",
            PieceKind::Knight => "KNIGHT",
            PieceKind::Bishop => "BISHOP",
            PieceKind::Rook => "ROOK",
            PieceKind::Queen => "QUEEN",
            PieceKind::King => "KING",
        }
    }

    /// Returns the short code used after the color letter ("BKN", "WQ").
    pub const fn code(self) -> &'static str {
        match self {
            PieceKind::Pawn => "P",
            PieceKind::Knight => "KN",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "PAWN" => Some(PieceKind::Pawn),
            "KNIGHT" => Some(PieceKind::Knight),
            "BISHOP" => Some(PieceKind::Bishop),
            // "ROCK" is the legacy spelling still found in saved layouts.
            "ROOK" | "ROCK" => Some(PieceKind::Rook),
            "QUEEN" => Some(PieceKind::Queen),
            "KING" => Some(PieceKind::King),
            _ => None,
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A piece of a given kind and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// Creates a new piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Returns the canonical type token, e.g. "BLACK_KNIGHT".
    pub fn token(self) -> String {
        format!("{}_{}", self.color.token(), self.kind.token())
    }

    /// Returns the short code, e.g. "BKN".
    pub fn code(self) -> String {
        let color = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        format!("{}{}", color, self.kind.code())
    }

    /// Returns the default Unicode glyph for this piece.
    ///
    /// Pawns use U+2659 for white and U+265F for black. Earlier releases of
    /// the widget drew the two pawn glyphs swapped; pages relying on that can
    /// override them through the piece options.
    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '\u{2654}',
            (Color::White, PieceKind::Queen) => '\u{2655}',
            (Color::White, PieceKind::Rook) => '\u{2656}',
            (Color::White, PieceKind::Bishop) => '\u{2657}',
            (Color::White, PieceKind::Knight) => '\u{2658}',
            (Color::White, PieceKind::Pawn) => '\u{2659}',
            (Color::Black, PieceKind::King) => '\u{265A}',
            (Color::Black, PieceKind::Queen) => '\u{265B}',
            (Color::Black, PieceKind::Rook) => '\u{265C}',
            (Color::Black, PieceKind::Bishop) => '\u{265D}',
            (Color::Black, PieceKind::Knight) => '\u{265E}',
            (Color::Black, PieceKind::Pawn) => '\u{265F}',
        }
    }

    /// Returns the classification tags a host uses to style this piece:
    /// one for the kind and one for the colored kind.
    pub fn classes(self) -> [String; 2] {
        [
            format!("cbPiece{}", self.kind),
            format!("cbPiece{}{}", self.color, self.kind),
        ]
    }
}

impl FromStr for Piece {
    type Err = BoardError;

    /// Parses a non-empty piece type token. See [`parse_piece_type`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_piece_type(s)?.ok_or_else(|| BoardError::UnknownPieceType(s.to_string()))
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

/// Resolves a piece type token.
///
/// Tokens are case-insensitive and trimmed. Each piece has three spellings:
/// the full name ("BLACK_KNIGHT"), the color-prefixed short form ("B_KNIGHT")
/// and the code ("BKN"). A blank token denotes an empty square and yields
/// `Ok(None)`.
pub fn parse_piece_type(token: &str) -> Result<Option<Piece>, BoardError> {
    let normalized = token.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Ok(None);
    }

    let unknown = || BoardError::UnknownPieceType(token.to_string());

    if let Some((color, kind)) = normalized.split_once('_') {
        let color: Color = color.parse().map_err(|_| unknown())?;
        let kind = PieceKind::from_token(kind).ok_or_else(unknown)?;
        return Ok(Some(Piece::new(kind, color)));
    }

    let mut chars = normalized.chars();
    let color: Color = chars
        .next()
        .ok_or_else(unknown)?
        .to_string()
        .parse()
        .map_err(|_| unknown())?;
    let kind = PieceKind::from_code(chars.as_str()).ok_or_else(unknown)?;
    Ok(Some(Piece::new(kind, color)))
}
