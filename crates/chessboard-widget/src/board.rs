//! The board model.

use tracing::{debug, trace};

use chessboard_core::{BoardError, Color, Piece, PieceKind, Square};

use crate::config::{BoardConfig, BoardOptions};
use crate::hooks::{
    BoardHooks, DefaultHooks, FieldContext, PieceContext, PieceSlot, Surface, HIGHLIGHTED_CLASS,
};
use crate::request::{
    IntoColor, IntoPieceType, IntoSquare, IntoSquares, PlaceRequest, PlacementOptions,
};
use crate::snapshot::{BoardSnapshot, FieldSnapshot};

/// The state of one square: its occupant and highlight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    square: Square,
    occupant: Option<Piece>,
    highlighted: bool,
}

impl Field {
    const fn empty(square: Square) -> Self {
        Field {
            square,
            occupant: None,
            highlighted: false,
        }
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Returns the zero-based `(x, y)` position.
    #[inline]
    pub const fn position(&self) -> (u8, u8) {
        (self.square.x(), self.square.y())
    }

    pub fn name(&self) -> String {
        self.square.name()
    }

    #[inline]
    pub const fn occupant(&self) -> Option<Piece> {
        self.occupant
    }

    #[inline]
    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Builder for a [`Board`].
pub struct BoardBuilder<S: Surface> {
    surface: S,
    config: BoardConfig,
    hooks: Box<dyn BoardHooks>,
}

impl<S: Surface> BoardBuilder<S> {
    /// Resolves `options` over the defaults and uses the result.
    pub fn options(mut self, options: BoardOptions) -> Self {
        self.config = options.resolve();
        self
    }

    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hooks(mut self, hooks: impl BoardHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Paints every square and returns the ready board.
    pub fn build(self) -> Board<S> {
        let mut board = Board {
            fields: Square::ALL.map(Field::empty),
            config: self.config,
            hooks: self.hooks,
            surface: self.surface,
        };
        board.paint();
        board
    }
}

/// An 8x8 chessboard widget.
///
/// The board is the only owner of piece placement and highlight state. Every
/// operation validates its arguments first, then mutates, then calls the
/// relevant hooks in traversal order.
pub struct Board<S: Surface> {
    fields: [Field; 64],
    config: BoardConfig,
    hooks: Box<dyn BoardHooks>,
    surface: S,
}

impl<S: Surface> Board<S> {
    /// Creates a board with the default configuration and hooks.
    pub fn new(surface: S) -> Self {
        Self::builder(surface).build()
    }

    pub fn builder(surface: S) -> BoardBuilder<S> {
        BoardBuilder {
            surface,
            config: BoardConfig::default(),
            hooks: Box::new(DefaultHooks),
        }
    }

    fn paint(&mut self) {
        for (property, value) in &self.config.css {
            self.surface.set_board_style(property, value);
        }

        for index in 0..self.fields.len() {
            let field = self.fields[index];
            let square = field.square();
            let parity = if square.x() % 2 == 0 { "Odd" } else { "Even" };
            self.surface.add_class(square, "cbField");
            self.surface.add_class(square, &format!("cbField{parity}"));
            self.surface.add_class(square, &format!("cbField{}", square.file()));
            self.surface.add_class(square, &format!("cbField{square}"));

            trace!(square = %square, "on_paint_field");
            self.hooks.on_paint_field(&mut FieldContext {
                field,
                config: &self.config,
                surface: &mut self.surface,
            });
            self.resize_field(field);
        }
        debug!("board painted");
    }

    fn resize_field(&mut self, field: Field) {
        trace!(square = %field.square(), "on_resize_field");
        self.hooks.on_resize_field(&mut FieldContext {
            field,
            config: &self.config,
            surface: &mut self.surface,
        });
    }

    /// Re-fires the resize hook for every square. Hosts call this from their
    /// resize notification.
    pub fn notify_resize(&mut self) {
        for index in 0..self.fields.len() {
            self.resize_field(self.fields[index]);
        }
    }

    /// Places a piece type on one or more squares, replacing their occupants.
    ///
    /// The type and every square are validated before anything changes.
    pub fn place(
        &mut self,
        squares: impl IntoSquares,
        piece: impl IntoPieceType,
    ) -> Result<&mut Self, BoardError> {
        let request = PlaceRequest::new(squares, piece)?;
        Ok(self.apply(request))
    }

    /// Applies an already validated placement.
    pub fn apply(&mut self, request: PlaceRequest) -> &mut Self {
        debug!(
            count = request.squares.len(),
            piece = %request.piece.map(Piece::token).unwrap_or_default(),
            "placing"
        );
        for square in request.squares {
            self.assign(square, request.piece);
        }
        self
    }

    fn assign(&mut self, square: Square, piece: Option<Piece>) {
        self.fields[square.index() as usize].occupant = piece;

        let mut slot = PieceSlot::for_piece(piece);
        let markup = self.config.pieces.token(piece).render(&slot, piece);
        slot.set_content(markup);

        trace!(square = %square, "on_paint_piece");
        self.hooks.on_paint_piece(&mut PieceContext {
            square,
            piece,
            slot: &mut slot,
            config: &self.config,
        });
        self.surface.set_content(square, &slot.to_markup());
    }

    fn place_kind(
        &mut self,
        kind: PieceKind,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        let request = PlaceRequest::colored(kind, squares, color)?;
        Ok(self.apply(request))
    }

    pub fn place_pawn(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::Pawn, squares, color)
    }

    pub fn place_knight(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::Knight, squares, color)
    }

    pub fn place_bishop(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::Bishop, squares, color)
    }

    pub fn place_rook(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::Rook, squares, color)
    }

    pub fn place_queen(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::Queen, squares, color)
    }

    pub fn place_king(
        &mut self,
        squares: impl IntoSquares,
        color: impl IntoColor,
    ) -> Result<&mut Self, BoardError> {
        self.place_kind(PieceKind::King, squares, color)
    }

    /// Places a piece kind from a `{ square, color }` record.
    pub fn place_with(
        &mut self,
        kind: PieceKind,
        options: PlacementOptions,
    ) -> Result<&mut Self, BoardError> {
        let request = options.into_request(kind)?;
        Ok(self.apply(request))
    }

    /// Empties one or more squares.
    pub fn remove(&mut self, squares: impl IntoSquares) -> Result<&mut Self, BoardError> {
        self.place(squares, None::<Piece>)
    }

    /// Empties every square, in traversal order.
    pub fn clear(&mut self) -> &mut Self {
        debug!("clearing board");
        for square in Square::all() {
            self.assign(square, None);
        }
        self
    }

    /// Highlights one or more squares.
    pub fn highlight(&mut self, squares: impl IntoSquares) -> Result<&mut Self, BoardError> {
        for square in squares.into_squares()? {
            self.set_highlight(square, true);
        }
        Ok(self)
    }

    /// Removes the highlight from one or more squares.
    pub fn unhighlight(&mut self, squares: impl IntoSquares) -> Result<&mut Self, BoardError> {
        for square in squares.into_squares()? {
            self.set_highlight(square, false);
        }
        Ok(self)
    }

    /// Flips the highlight of one or more squares.
    pub fn toggle_highlight(&mut self, squares: impl IntoSquares) -> Result<&mut Self, BoardError> {
        for square in squares.into_squares()? {
            let highlighted = self.fields[square.index() as usize].highlighted;
            self.set_highlight(square, !highlighted);
        }
        Ok(self)
    }

    fn set_highlight(&mut self, square: Square, highlighted: bool) {
        let field = &mut self.fields[square.index() as usize];
        field.highlighted = highlighted;
        let field = *field;
        debug!(square = %square, highlighted, "highlight changed");

        if highlighted {
            self.surface.add_class(square, HIGHLIGHTED_CLASS);
        }
        let mut ctx = FieldContext {
            field,
            config: &self.config,
            surface: &mut self.surface,
        };
        if highlighted {
            trace!(square = %square, "on_highlight_field");
            self.hooks.on_highlight_field(&mut ctx);
        } else {
            trace!(square = %square, "on_disacknowledge_field");
            self.hooks.on_disacknowledge_field(&mut ctx);
            self.surface.remove_class(square, HIGHLIGHTED_CLASS);
        }
    }

    /// Returns every highlighted square in traversal order.
    pub fn get_highlighted(&self) -> Vec<Square> {
        self.fields
            .iter()
            .filter(|f| f.highlighted)
            .map(Field::square)
            .collect()
    }

    /// Dispatches a user activation of a square to the click hook.
    pub fn click(&mut self, square: impl IntoSquare) -> Result<&mut Self, BoardError> {
        let square = square.into_square()?;
        let field = self.fields[square.index() as usize];
        trace!(square = %square, "on_click");
        self.hooks.on_click(&field);
        Ok(self)
    }

    pub fn field(&self, square: impl IntoSquare) -> Result<&Field, BoardError> {
        let square = square.into_square()?;
        Ok(&self.fields[square.index() as usize])
    }

    pub fn occupant(&self, square: impl IntoSquare) -> Result<Option<Piece>, BoardError> {
        self.field(square).map(Field::occupant)
    }

    /// All squares in traversal order.
    pub fn fields(&self) -> &[Field; 64] {
        &self.fields
    }

    /// Returns the occupied squares of one color, in traversal order.
    pub fn pieces_of(&self, color: Color) -> Vec<(Square, Piece)> {
        self.fields
            .iter()
            .filter_map(|f| f.occupant.map(|p| (f.square, p)))
            .filter(|(_, p)| p.color == color)
            .collect()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Captures the board state in a serializable form.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            fields: self
                .fields
                .iter()
                .map(|f| FieldSnapshot {
                    name: f.name(),
                    x: f.square.x(),
                    y: f.square.y(),
                    occupant: f.occupant,
                    code: f.occupant.map(Piece::code),
                    highlighted: f.highlighted,
                })
                .collect(),
            highlighted: self.get_highlighted(),
        }
    }
}
