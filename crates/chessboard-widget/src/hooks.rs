//! Paint hooks and the host rendering surface.
//!
//! The board never draws anything itself. It calls a [`BoardHooks`]
//! implementation at fixed lifecycle points, and the hooks write styles,
//! classes and markup into a [`Surface`] owned by the host.

use chessboard_core::{Piece, Square};

use crate::board::Field;
use crate::config::BoardConfig;
use crate::style::Style;

/// Class added to a square while it is highlighted.
pub(crate) const HIGHLIGHTED_CLASS: &str = "cbFieldHighlighted";

/// The host side of the widget: one styleable element per square.
pub trait Surface {
    /// Sets an inline style property on a square.
    fn set_style(&mut self, square: Square, property: &str, value: &str);

    /// Replaces the markup inside a square.
    fn set_content(&mut self, square: Square, markup: &str);

    /// Adds a classification tag to a square.
    fn add_class(&mut self, square: Square, class: &str);

    /// Removes a classification tag from a square.
    fn remove_class(&mut self, square: Square, class: &str);

    /// Sets an inline style property on the board element.
    fn set_board_style(&mut self, _property: &str, _value: &str) {}

    /// Returns the rendered width of a square if the host can measure it.
    fn measured_width(&self, _square: Square) -> Option<String> {
        None
    }
}

/// Context handed to the square-level hooks.
pub struct FieldContext<'a> {
    pub field: Field,
    pub config: &'a BoardConfig,
    pub surface: &'a mut dyn Surface,
}

impl FieldContext<'_> {
    pub fn square(&self) -> Square {
        self.field.square()
    }

    /// Returns the zero-based `(x, y)` position of the square.
    pub fn position(&self) -> (u8, u8) {
        self.field.position()
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        let square = self.square();
        self.surface.set_style(square, property, value);
    }
}

/// The element a piece is painted into before it lands on its square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceSlot {
    classes: Vec<String>,
    style: Style,
    content: String,
}

impl PieceSlot {
    /// Creates a slot carrying the classification tags of `piece`.
    pub fn for_piece(piece: Option<Piece>) -> Self {
        let mut slot = PieceSlot::default();
        slot.add_class("cbPiece");
        match piece {
            Some(piece) => {
                for class in piece.classes() {
                    slot.add_class(&class);
                }
            }
            None => slot.add_class("cbPieceNone"),
        }
        slot
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.set(property, value);
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_content(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Serializes the slot as a `span` element.
    pub fn to_markup(&self) -> String {
        let mut markup = format!("<span class=\"{}\"", escape_attr(&self.classes.join(" ")));
        if !self.style.is_empty() {
            markup.push_str(&format!(" style=\"{}\"", escape_attr(&self.style.to_string())));
        }
        markup.push('>');
        markup.push_str(&self.content);
        markup.push_str("</span>");
        markup
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Context handed to the piece paint hook.
pub struct PieceContext<'a> {
    pub square: Square,
    /// Classification of the painted piece; `None` for an empty square.
    pub piece: Option<Piece>,
    pub slot: &'a mut PieceSlot,
    pub config: &'a BoardConfig,
}

/// Lifecycle hooks invoked by the board.
///
/// Every method has a default. An implementation that overrides a method
/// replaces the default behavior entirely; the free functions in this module
/// ([`paint_field`], [`paint_piece`], ...) can be called to reuse it.
pub trait BoardHooks {
    /// Called once per square when the board is built.
    fn on_paint_field(&mut self, ctx: &mut FieldContext<'_>) {
        paint_field(ctx);
    }

    /// Called once per square a piece (or the empty token) is placed on.
    fn on_paint_piece(&mut self, ctx: &mut PieceContext<'_>) {
        paint_piece(ctx);
    }

    fn on_highlight_field(&mut self, ctx: &mut FieldContext<'_>) {
        highlight_field(ctx);
    }

    fn on_disacknowledge_field(&mut self, ctx: &mut FieldContext<'_>) {
        disacknowledge_field(ctx);
    }

    /// Called when the board is built and whenever the host reports a resize.
    fn on_resize_field(&mut self, ctx: &mut FieldContext<'_>) {
        resize_field(ctx);
    }

    /// Called when the user activates a square.
    fn on_click(&mut self, _field: &Field) {}
}

/// The built-in hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl BoardHooks for DefaultHooks {}

/// Alternating background, fixed width, no overflow or padding, then the
/// configured extra square styles.
pub fn paint_field(ctx: &mut FieldContext<'_>) {
    let config = ctx.config;
    let background = config.field_background(ctx.square());
    ctx.set_style("background-color", background);
    ctx.set_style("width", &config.field_width);
    ctx.set_style("overflow", "hidden");
    ctx.set_style("padding", "0px");
    for (property, value) in &config.field_css {
        ctx.set_style(property, value);
    }
}

/// Block display, fixed font size, centered glyph.
pub fn paint_piece(ctx: &mut PieceContext<'_>) {
    ctx.slot.set_style("display", "block");
    ctx.slot.set_style("font-size", &ctx.config.piece_font_size);
    ctx.slot.set_style("text-align", "center");
    ctx.slot.set_style("vertical-align", "middle");
}

pub fn highlight_field(ctx: &mut FieldContext<'_>) {
    let config = ctx.config;
    ctx.set_style("background-color", &config.highlight_color);
}

/// Restores the square's regular background.
pub fn disacknowledge_field(ctx: &mut FieldContext<'_>) {
    let config = ctx.config;
    ctx.set_style("background-color", config.field_background(ctx.square()));
}

/// Uses the configured height, or keeps the square as tall as it is wide.
pub fn resize_field(ctx: &mut FieldContext<'_>) {
    let height = match &ctx.config.field_height {
        Some(height) => height.clone(),
        None => ctx
            .surface
            .measured_width(ctx.square())
            .unwrap_or_else(|| ctx.config.field_width.clone()),
    };
    ctx.set_style("height", &height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_core::{Color, PieceKind};

    #[test]
    fn slot_classes() {
        let slot = PieceSlot::for_piece(Some(Piece::new(PieceKind::Bishop, Color::Black)));
        assert_eq!(
            slot.classes(),
            ["cbPiece", "cbPieceBishop", "cbPieceBlackBishop"]
        );
        assert_eq!(PieceSlot::for_piece(None).classes(), ["cbPiece", "cbPieceNone"]);
    }

    #[test]
    fn slot_markup() {
        let mut slot = PieceSlot::for_piece(None);
        assert_eq!(slot.to_markup(), "<span class=\"cbPiece cbPieceNone\"></span>");

        slot.set_style("font-family", "\"Chess\"");
        slot.set_content("&#9812;");
        assert_eq!(
            slot.to_markup(),
            "<span class=\"cbPiece cbPieceNone\" style=\"font-family: &quot;Chess&quot;;\">&#9812;</span>"
        );
    }

    #[test]
    fn default_piece_paint() {
        let config = BoardConfig::default();
        let mut slot = PieceSlot::default();
        let mut ctx = PieceContext {
            square: Square::A1,
            piece: None,
            slot: &mut slot,
            config: &config,
        };
        paint_piece(&mut ctx);
        assert_eq!(
            slot.style().to_string(),
            "display: block; font-size: 48px; text-align: center; vertical-align: middle;"
        );
    }
}
