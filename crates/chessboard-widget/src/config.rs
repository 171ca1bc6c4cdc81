//! Widget configuration.
//!
//! [`BoardOptions`] is what a caller supplies: every field is optional and
//! can come from code, a TOML file or a JSON document. [`BoardOptions::resolve`]
//! merges it over the built-in defaults into a [`BoardConfig`], which the board
//! keeps read-only for its whole lifetime and hands to every hook.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use chessboard_core::{Color, Piece, PieceKind, Rank, Square};

use crate::hooks::PieceSlot;

const DEFAULT_DARK_COLOR: &str = "#d18b47";
const DEFAULT_LIGHT_COLOR: &str = "#ffce9e";
const DEFAULT_HIGHLIGHT_COLOR: &str = "#4cff4c";
const DEFAULT_FIELD_WIDTH: &str = "64px";
const DEFAULT_PIECE_FONT_SIZE: &str = "48px";

/// Errors that can occur when loading options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the options file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the options file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Failed to parse options given as JSON.
    #[error("Failed to parse JSON options: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Which rank each side's pawns start on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PawnLayout {
    /// White pawns on rank 7, black pawns on rank 2.
    ///
    /// This is the layout the widget has always produced, kept as the
    /// default so existing pages render unchanged. It is the reverse of a
    /// real game.
    #[default]
    Mirrored,
    /// White pawns on rank 2, black pawns on rank 7.
    Standard,
}

impl PawnLayout {
    /// Returns the pawn rank for a color.
    pub const fn pawn_rank(self, color: Color) -> Rank {
        match (self, color) {
            (PawnLayout::Mirrored, Color::White) | (PawnLayout::Standard, Color::Black) => {
                Rank::R7
            }
            (PawnLayout::Mirrored, Color::Black) | (PawnLayout::Standard, Color::White) => {
                Rank::R2
            }
        }
    }
}

/// Options for the start position preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPositionOptions {
    #[serde(alias = "pawnLayout")]
    pub pawn_layout: Option<PawnLayout>,
}

/// Glyph overrides for the six pieces of one color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub pawn: Option<String>,
    pub knight: Option<String>,
    pub bishop: Option<String>,
    #[serde(alias = "rock")]
    pub rook: Option<String>,
    pub queen: Option<String>,
    pub king: Option<String>,
}

impl ColorOverrides {
    fn get(&self, kind: PieceKind) -> Option<&String> {
        match kind {
            PieceKind::Pawn => self.pawn.as_ref(),
            PieceKind::Knight => self.knight.as_ref(),
            PieceKind::Bishop => self.bishop.as_ref(),
            PieceKind::Rook => self.rook.as_ref(),
            PieceKind::Queen => self.queen.as_ref(),
            PieceKind::King => self.king.as_ref(),
        }
    }
}

/// Display token overrides, per color and for the empty square.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceOverrides {
    pub white: ColorOverrides,
    pub black: ColorOverrides,
    pub none: Option<String>,
}

/// Caller-supplied widget options. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    #[serde(alias = "darkColor")]
    pub dark_color: Option<String>,
    #[serde(alias = "lightColor")]
    pub light_color: Option<String>,
    #[serde(alias = "highlightColor")]
    pub highlight_color: Option<String>,
    #[serde(alias = "fieldWidth")]
    pub field_width: Option<String>,
    /// Fixed square height. Without it squares keep a square aspect.
    #[serde(alias = "fieldHeight")]
    pub field_height: Option<String>,
    #[serde(alias = "pieceFontSize")]
    pub piece_font_size: Option<String>,
    /// Extra style properties applied verbatim to every square.
    #[serde(alias = "fieldCss")]
    pub field_css: BTreeMap<String, String>,
    /// Style properties applied to the board element.
    pub css: BTreeMap<String, String>,
    pub pieces: PieceOverrides,
    #[serde(alias = "startPosition")]
    pub start_position: StartPositionOptions,
}

impl BoardOptions {
    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// or [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parses options from a JSON document using the same keys.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Merges these options over the defaults.
    pub fn resolve(self) -> BoardConfig {
        let mut pieces = PieceCatalog::default();
        for color in Color::ALL {
            let overrides = match color {
                Color::White => &self.pieces.white,
                Color::Black => &self.pieces.black,
            };
            for kind in PieceKind::ALL {
                if let Some(glyph) = overrides.get(kind) {
                    pieces.set(Piece::new(kind, color), PieceToken::Glyph(glyph.clone()));
                }
            }
        }
        if let Some(none) = self.pieces.none {
            pieces.set_none(PieceToken::Glyph(none));
        }

        BoardConfig {
            dark_color: self
                .dark_color
                .unwrap_or_else(|| DEFAULT_DARK_COLOR.to_string()),
            light_color: self
                .light_color
                .unwrap_or_else(|| DEFAULT_LIGHT_COLOR.to_string()),
            highlight_color: self
                .highlight_color
                .unwrap_or_else(|| DEFAULT_HIGHLIGHT_COLOR.to_string()),
            field_width: self
                .field_width
                .unwrap_or_else(|| DEFAULT_FIELD_WIDTH.to_string()),
            field_height: self.field_height,
            piece_font_size: self
                .piece_font_size
                .unwrap_or_else(|| DEFAULT_PIECE_FONT_SIZE.to_string()),
            field_css: self.field_css,
            css: self.css,
            pieces,
            pawn_layout: self.start_position.pawn_layout.unwrap_or_default(),
        }
    }
}

/// Renders piece markup from the piece slot and the piece it will hold.
pub type PieceRenderer = Rc<dyn Fn(&PieceSlot, Option<Piece>) -> String>;

/// What a piece looks like: fixed markup or a renderer function.
#[derive(Clone)]
pub enum PieceToken {
    Glyph(String),
    Renderer(PieceRenderer),
}

impl PieceToken {
    pub fn renderer(f: impl Fn(&PieceSlot, Option<Piece>) -> String + 'static) -> Self {
        PieceToken::Renderer(Rc::new(f))
    }

    /// Produces the markup for a slot.
    pub fn render(&self, slot: &PieceSlot, piece: Option<Piece>) -> String {
        match self {
            PieceToken::Glyph(glyph) => glyph.clone(),
            PieceToken::Renderer(render) => render(slot, piece),
        }
    }
}

impl fmt::Debug for PieceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceToken::Glyph(glyph) => f.debug_tuple("Glyph").field(glyph).finish(),
            PieceToken::Renderer(_) => f.write_str("Renderer(..)"),
        }
    }
}

/// Display tokens for all twelve pieces and the empty square.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    tokens: [[PieceToken; 6]; 2],
    none: PieceToken,
}

impl Default for PieceCatalog {
    fn default() -> Self {
        let glyphs = |color: Color| {
            PieceKind::ALL
                .map(|kind| PieceToken::Glyph(Piece::new(kind, color).glyph().to_string()))
        };
        PieceCatalog {
            tokens: [glyphs(Color::White), glyphs(Color::Black)],
            none: PieceToken::Glyph(String::new()),
        }
    }
}

impl PieceCatalog {
    /// Returns the token for a piece, or the empty-square token for `None`.
    pub fn token(&self, piece: Option<Piece>) -> &PieceToken {
        match piece {
            Some(piece) => &self.tokens[piece.color.index()][piece.kind.index()],
            None => &self.none,
        }
    }

    pub fn set(&mut self, piece: Piece, token: PieceToken) {
        self.tokens[piece.color.index()][piece.kind.index()] = token;
    }

    pub fn set_none(&mut self, token: PieceToken) {
        self.none = token;
    }
}

/// Resolved, read-only widget configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub dark_color: String,
    pub light_color: String,
    pub highlight_color: String,
    pub field_width: String,
    pub field_height: Option<String>,
    pub piece_font_size: String,
    pub field_css: BTreeMap<String, String>,
    pub css: BTreeMap<String, String>,
    pub pieces: PieceCatalog,
    pub pawn_layout: PawnLayout,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardOptions::default().resolve()
    }
}

impl BoardConfig {
    /// Returns the un-highlighted background color of a square.
    pub fn field_background(&self, square: Square) -> &str {
        if square.is_dark() {
            &self.dark_color
        } else {
            &self.light_color
        }
    }
}
