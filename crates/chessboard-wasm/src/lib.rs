//! WebAssembly bindings for the chessboard widget.
//!
//! This crate exposes the board to JavaScript. The host page inserts the
//! markup from `toHtml()` and forwards DOM events back to the board:
//! square clicks through `click()`, window resizes through `resize()`.
//!
//! # Usage
//!
//! ```javascript
//! import init, { ChessBoard } from 'chessboard-wasm';
//!
//! await init();
//!
//! const board = new ChessBoard({ darkColor: '#b58863', lightColor: '#f0d9b5' });
//! board.setStartPosition();
//! board.placeMany(['E4', 'D4'], 'WHITE_QUEEN');
//! board.highlight('E4');
//!
//! // The callback runs inside `click()` and must not call back into the board.
//! let selected = null;
//! board.setOnClick((square) => { selected = square; });
//!
//! const root = document.getElementById('board');
//! root.innerHTML = board.toHtml();
//! root.addEventListener('click', (e) => {
//!     const td = e.target.closest('td[data-square]');
//!     if (td) board.click(td.dataset.square);
//! });
//! ```

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use chessboard_widget::{
    Board, BoardHooks, BoardOptions, Color, Field, HtmlSurface, PawnLayout, PieceKind,
    PlacementOptions, SquareSpec,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;

fn js_error(e: impl Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Splits a comma separated square list such as "a1,h1".
///
/// Blank entries are kept so that the board rejects them as invalid names.
fn square_list(squares: &str) -> Vec<&str> {
    squares.split(',').map(str::trim).collect()
}

/// State shared between [`ChessBoard`] and the hooks installed on its board.
#[derive(Default)]
struct ClickState {
    callback: Option<Function>,
    /// Exception thrown by the callback during the last dispatch.
    error: Option<JsValue>,
}

/// Default paint hooks plus a JavaScript click callback.
struct ClickHooks {
    state: Rc<RefCell<ClickState>>,
}

impl BoardHooks for ClickHooks {
    fn on_click(&mut self, field: &Field) {
        let mut state = self.state.borrow_mut();
        let Some(callback) = state.callback.clone() else {
            return;
        };
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&field.name())) {
            state.error = Some(e);
        }
    }
}

fn parse_kind(kind: &str) -> Option<PieceKind> {
    let kind = kind.trim().to_ascii_uppercase();
    PieceKind::ALL
        .into_iter()
        .find(|k| k.token() == kind || (kind == "ROCK" && *k == PieceKind::Rook))
}

/// A chessboard widget that can be driven from JavaScript.
#[wasm_bindgen]
pub struct ChessBoard {
    board: Board<HtmlSurface>,
    clicks: Rc<RefCell<ClickState>>,
}

#[wasm_bindgen]
impl ChessBoard {
    /// Creates a board. `options` may be undefined or an options object
    /// using the widget's option names (`darkColor`, `pieces`, ...).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<ChessBoard, JsError> {
        let options = if options.is_undefined() || options.is_null() {
            BoardOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(js_error)?
        };
        Ok(Self::with_options(options))
    }

    /// Creates a board from options serialized as JSON.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<ChessBoard, JsError> {
        let options = BoardOptions::from_json_str(json).map_err(js_error)?;
        Ok(Self::with_options(options))
    }

    /// Places a piece type on a comma separated list of squares.
    pub fn place(&mut self, squares: &str, piece_type: &str) -> Result<(), JsError> {
        self.board
            .place(square_list(squares), piece_type)
            .map_err(js_error)?;
        Ok(())
    }

    /// Places a piece type on a square name or an array of square names.
    #[wasm_bindgen(js_name = placeMany)]
    pub fn place_many(&mut self, squares: JsValue, piece_type: &str) -> Result<(), JsError> {
        let squares: SquareSpec = serde_wasm_bindgen::from_value(squares).map_err(js_error)?;
        self.board.place(squares, piece_type).map_err(js_error)?;
        Ok(())
    }

    /// Places a piece kind from a `{ square, color }` object.
    #[wasm_bindgen(js_name = placeWith)]
    pub fn place_with(&mut self, kind: &str, options: JsValue) -> Result<(), JsError> {
        let kind = parse_kind(kind).ok_or_else(|| js_error(format!("unknown piece kind: {kind}")))?;
        let options: PlacementOptions =
            serde_wasm_bindgen::from_value(options).map_err(js_error)?;
        self.board.place_with(kind, options).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = placePawn)]
    pub fn place_pawn(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::Pawn, squares, color)
    }

    #[wasm_bindgen(js_name = placeKnight)]
    pub fn place_knight(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::Knight, squares, color)
    }

    #[wasm_bindgen(js_name = placeBishop)]
    pub fn place_bishop(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::Bishop, squares, color)
    }

    #[wasm_bindgen(js_name = placeRook)]
    pub fn place_rook(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::Rook, squares, color)
    }

    #[wasm_bindgen(js_name = placeQueen)]
    pub fn place_queen(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::Queen, squares, color)
    }

    #[wasm_bindgen(js_name = placeKing)]
    pub fn place_king(&mut self, squares: &str, color: &str) -> Result<(), JsError> {
        self.place_kind(PieceKind::King, squares, color)
    }

    /// Empties a comma separated list of squares.
    pub fn remove(&mut self, squares: &str) -> Result<(), JsError> {
        self.board.remove(square_list(squares)).map_err(js_error)?;
        Ok(())
    }

    /// Empties every square.
    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Sets up the initial position. `layout` is "mirrored" or "standard";
    /// when omitted the configured layout is used.
    #[wasm_bindgen(js_name = setStartPosition)]
    pub fn set_start_position(&mut self, layout: Option<String>) -> Result<(), JsError> {
        let layout = match layout.as_deref().map(str::trim) {
            None | Some("") => self.board.config().pawn_layout,
            Some(l) if l.eq_ignore_ascii_case("mirrored") => PawnLayout::Mirrored,
            Some(l) if l.eq_ignore_ascii_case("standard") => PawnLayout::Standard,
            Some(other) => return Err(js_error(format!("unknown pawn layout: {other}"))),
        };
        self.board
            .set_start_position_with(layout)
            .map_err(js_error)?;
        Ok(())
    }

    pub fn highlight(&mut self, squares: &str) -> Result<(), JsError> {
        self.board
            .highlight(square_list(squares))
            .map_err(js_error)?;
        Ok(())
    }

    pub fn unhighlight(&mut self, squares: &str) -> Result<(), JsError> {
        self.board
            .unhighlight(square_list(squares))
            .map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = toggleHighlight)]
    pub fn toggle_highlight(&mut self, squares: &str) -> Result<(), JsError> {
        self.board
            .toggle_highlight(square_list(squares))
            .map_err(js_error)?;
        Ok(())
    }

    /// Returns the names of all highlighted squares, top row first.
    #[wasm_bindgen(js_name = getHighlighted)]
    pub fn get_highlighted(&self) -> Vec<String> {
        self.board
            .get_highlighted()
            .into_iter()
            .map(|sq| sq.name())
            .collect()
    }

    /// Returns the piece code on a square ("WK", "BKN", ...), or null if empty.
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, square: &str) -> Result<Option<String>, JsError> {
        let piece = self.board.occupant(square).map_err(js_error)?;
        Ok(piece.map(|p| p.code()))
    }

    /// Sets the function called with the square name ("E4") whenever a
    /// square is clicked. Pass `undefined` to remove it.
    #[wasm_bindgen(js_name = setOnClick)]
    pub fn set_on_click(&mut self, callback: Option<Function>) {
        self.clicks.borrow_mut().callback = callback;
    }

    /// Reports a click on a square. Call from the page's click handler.
    ///
    /// An exception thrown by the click callback is rethrown to the caller.
    pub fn click(&mut self, square: &str) -> Result<(), JsValue> {
        self.board.click(square).map_err(js_error)?;
        match self.clicks.borrow_mut().error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Re-applies square sizing. Call from the page's resize handler.
    pub fn resize(&mut self) {
        self.board.notify_resize();
    }

    /// Returns the board markup.
    #[wasm_bindgen(js_name = toHtml)]
    pub fn to_html(&self) -> Result<String, JsError> {
        self.board.surface().render().map_err(js_error)
    }

    /// Returns the board state as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.board.snapshot()).map_err(js_error)
    }
}

impl ChessBoard {
    fn with_options(options: BoardOptions) -> Self {
        let clicks = Rc::new(RefCell::new(ClickState::default()));
        let board = Board::builder(HtmlSurface::new())
            .options(options)
            .hooks(ClickHooks {
                state: Rc::clone(&clicks),
            })
            .build();
        ChessBoard { board, clicks }
    }

    fn place_kind(&mut self, kind: PieceKind, squares: &str, color: &str) -> Result<(), JsError> {
        let color: Color = color.parse().map_err(js_error)?;
        match kind {
            PieceKind::Pawn => self.board.place_pawn(square_list(squares), color),
            PieceKind::Knight => self.board.place_knight(square_list(squares), color),
            PieceKind::Bishop => self.board.place_bishop(square_list(squares), color),
            PieceKind::Rook => self.board.place_rook(square_list(squares), color),
            PieceKind::Queen => self.board.place_queen(square_list(squares), color),
            PieceKind::King => self.board.place_king(square_list(squares), color),
        }
        .map_err(js_error)?;
        Ok(())
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::with_options(BoardOptions::default())
    }
}

/// Initialization function called when WASM module loads.
#[wasm_bindgen(start)]
pub fn init() {}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard_widget::BoardError;

    #[test]
    fn square_lists() {
        assert_eq!(square_list("a1, h1"), ["a1", "h1"]);
        assert_eq!(square_list("e4,,e5"), ["e4", "", "e5"]);
        assert_eq!(square_list(""), [""]);
    }

    #[test]
    fn blank_squares_are_rejected() {
        let mut board = ChessBoard::default();
        for squares in ["", "e4,,e5", " , ", "e4,"] {
            let list = square_list(squares);
            assert_eq!(
                board.board.place(list.clone(), "WQ").map(|_| ()),
                Err(BoardError::InvalidSquareName(String::new()))
            );
            assert!(board.board.highlight(list).is_err());
        }
        assert_eq!(board.piece_at("e4").unwrap(), None);
        assert!(board.get_highlighted().is_empty());
    }

    #[test]
    fn click_without_callback() {
        let mut board = ChessBoard::default();
        board.click("e4").unwrap();
        board.set_on_click(None);
        board.click("A1").unwrap();
    }

    #[test]
    fn piece_kinds() {
        assert_eq!(parse_kind("knight"), Some(PieceKind::Knight));
        assert_eq!(parse_kind("Rock"), Some(PieceKind::Rook));
        assert_eq!(parse_kind("dragon"), None);
    }

    #[test]
    fn start_position() {
        let mut board = ChessBoard::default();
        board.set_start_position(None).unwrap();
        assert_eq!(board.piece_at("e1").unwrap(), Some("WK".to_string()));
        assert_eq!(board.piece_at("e8").unwrap(), Some("BK".to_string()));
        assert_eq!(board.piece_at("a7").unwrap(), Some("WP".to_string()));
        assert_eq!(board.piece_at("e4").unwrap(), None);

        board.set_start_position(Some("standard".to_string())).unwrap();
        assert_eq!(board.piece_at("a2").unwrap(), Some("WP".to_string()));
    }

    #[test]
    fn place_and_highlight() {
        let mut board = ChessBoard::from_json(r#"{ "highlightColor": "yellow" }"#).unwrap();
        board.place("c3,d4", "BB").unwrap();
        board.place_rook("a1", "white").unwrap();
        board.remove("d4").unwrap();
        board.toggle_highlight("c3,a1").unwrap();
        board.unhighlight("a1").unwrap();

        assert_eq!(board.piece_at("c3").unwrap(), Some("BB".to_string()));
        assert_eq!(board.piece_at("d4").unwrap(), None);
        assert_eq!(board.piece_at("a1").unwrap(), Some("WR".to_string()));
        assert_eq!(board.get_highlighted(), ["C3"]);
        assert!(board.to_html().unwrap().contains("background-color: yellow;"));
    }
}
