//! Board square representation and the coordinate scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BoardError;

/// A file (column) on the chess board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a character ('a'-'h' or 'A'-'H').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A'..='H' => Self::from_index(c.to_ascii_uppercase() as u8 - b'A'),
            _ => None,
        }
    }

    /// Returns the index (0-7), which is also the x coordinate.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the upper-case letter for this file.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the chess board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7, rank 1 first).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_index(c as u8 - b'1'),
            _ => None,
        }
    }

    /// Returns the index (0-7, rank 1 first).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the display row of this rank: rank 8 is row 0, rank 1 is row 7.
    #[inline]
    pub const fn row(self) -> u8 {
        7 - self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the chess board, indexed 0-63 in traversal order.
///
/// Squares are indexed row-major as the board is drawn, top row first:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a7 = 8, ..., h1 = 63
///
/// The zero-based column `x` counts from the A file, the zero-based row `y`
/// counts down from rank 8.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.row() * 8 + file.index())
    }

    /// Creates a square from zero-based grid coordinates.
    pub const fn from_xy(x: u8, y: u8) -> Result<Self, BoardError> {
        if x < 8 && y < 8 {
            Ok(Square(y * 8 + x))
        } else {
            Err(BoardError::InvalidCoordinate { x, y })
        }
    }

    /// Creates a square from its traversal index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// All 64 squares in traversal order.
    pub const ALL: [Square; 64] = {
        let mut squares = [Square(0); 64];
        let mut i = 0;
        while i < 64 {
            squares[i] = Square(i as u8);
            i += 1;
        }
        squares
    };

    /// Iterates over all 64 squares in traversal order.
    pub fn all() -> impl Iterator<Item = Square> {
        Self::ALL.into_iter()
    }

    /// Returns the traversal index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the zero-based column (A = 0).
    #[inline]
    pub const fn x(self) -> u8 {
        self.0 % 8
    }

    /// Returns the zero-based row (rank 8 = 0).
    #[inline]
    pub const fn y(self) -> u8 {
        self.0 / 8
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[self.x() as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[7 - self.y() as usize]
    }

    /// Returns true if the square is drawn with the dark background.
    ///
    /// The top-left corner (A8) is light, so A1 and H8 come out dark.
    #[inline]
    pub const fn is_dark(self) -> bool {
        (self.x() + self.y()) % 2 == 1
    }

    /// Returns the canonical name, e.g. "E4".
    pub fn name(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    // Corner squares
    pub const A8: Square = Square(0);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const H1: Square = Square(63);
}

impl FromStr for Square {
    type Err = BoardError;

    /// Parses a square name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::InvalidSquareName(s.to_string());
        let mut chars = s.trim().chars();
        let file = chars.next().and_then(File::from_char).ok_or_else(invalid)?;
        let rank = chars.next().and_then(Rank::from_char).ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Square::new(file, rank))
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.name()
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.name())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Returns the canonical name for grid coordinates `(x, y)`.
pub fn square_name(x: u8, y: u8) -> Result<String, BoardError> {
    Square::from_xy(x, y).map(Square::name)
}

/// Parses a square name into grid coordinates `(x, y)`.
pub fn parse_square(name: &str) -> Result<(u8, u8), BoardError> {
    let square: Square = name.parse()?;
    Ok((square.x(), square.y()))
}
