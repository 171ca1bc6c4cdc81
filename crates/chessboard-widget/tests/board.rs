//! Integration tests for the board model and its hooks.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use chessboard_widget::{
    Board, BoardError, BoardHooks, BoardOptions, Color, Field, FieldContext, HtmlSurface,
    PawnLayout, Piece, PieceContext, PieceKind, PlacementOptions, Square,
};

fn board() -> Board<HtmlSurface> {
    Board::new(HtmlSurface::new())
}

fn piece(kind: PieceKind, color: Color) -> Option<Piece> {
    Some(Piece::new(kind, color))
}

/// Records every hook call as "hook:SQUARE".
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn push(&self, hook: &str, square: Square) {
        self.calls.borrow_mut().push(format!("{hook}:{square}"));
    }
}

impl BoardHooks for Recorder {
    fn on_paint_field(&mut self, ctx: &mut FieldContext<'_>) {
        self.push("paint_field", ctx.square());
    }

    fn on_paint_piece(&mut self, ctx: &mut PieceContext<'_>) {
        self.push("paint_piece", ctx.square);
    }

    fn on_highlight_field(&mut self, ctx: &mut FieldContext<'_>) {
        assert!(ctx.field.is_highlighted());
        self.push("highlight", ctx.square());
    }

    fn on_disacknowledge_field(&mut self, ctx: &mut FieldContext<'_>) {
        assert!(!ctx.field.is_highlighted());
        self.push("disacknowledge", ctx.square());
    }

    fn on_resize_field(&mut self, ctx: &mut FieldContext<'_>) {
        self.push("resize", ctx.square());
    }

    fn on_click(&mut self, field: &Field) {
        self.push("click", field.square());
    }
}

fn recorded_board() -> (Board<HtmlSurface>, Recorder) {
    let recorder = Recorder::default();
    let board = Board::builder(HtmlSurface::new())
        .hooks(recorder.clone())
        .build();
    (board, recorder)
}

#[test]
fn new_board_is_empty() {
    let board = board();
    assert!(board.fields().iter().all(|f| f.occupant().is_none()));
    assert!(board.get_highlighted().is_empty());
}

#[test]
fn place_then_remove() {
    let mut board = board();
    board
        .place(["E4", "E5"], "WHITE_PAWN")
        .unwrap()
        .remove("E4")
        .unwrap();

    assert_eq!(board.occupant("E4").unwrap(), None);
    assert_eq!(
        board.occupant("E5").unwrap(),
        piece(PieceKind::Pawn, Color::White)
    );
}

#[test]
fn place_overwrites() {
    let mut board = board();
    board.place("d4", "BQ").unwrap().place("d4", "w_knight").unwrap();
    assert_eq!(
        board.occupant("D4").unwrap(),
        piece(PieceKind::Knight, Color::White)
    );
}

#[test]
fn per_kind_wrappers() {
    let mut board = board();
    board
        .place_pawn("a2", "white")
        .unwrap()
        .place_knight(["b1", "g1"], "W")
        .unwrap()
        .place_bishop("c8", Color::Black)
        .unwrap()
        .place_rook("h8", "b")
        .unwrap()
        .place_queen("d8", "BLACK")
        .unwrap()
        .place_king("e1", Color::White)
        .unwrap();

    assert_eq!(board.occupant("A2").unwrap(), piece(PieceKind::Pawn, Color::White));
    assert_eq!(board.occupant("G1").unwrap(), piece(PieceKind::Knight, Color::White));
    assert_eq!(board.occupant("C8").unwrap(), piece(PieceKind::Bishop, Color::Black));
    assert_eq!(board.occupant("H8").unwrap(), piece(PieceKind::Rook, Color::Black));
    assert_eq!(board.occupant("D8").unwrap(), piece(PieceKind::Queen, Color::Black));
    assert_eq!(board.occupant("E1").unwrap(), piece(PieceKind::King, Color::White));
}

#[test]
fn option_record_placement() {
    let mut board = board();
    board
        .place_with(PieceKind::Queen, PlacementOptions::new("d1", "white"))
        .unwrap();
    assert_eq!(board.occupant("D1").unwrap(), piece(PieceKind::Queen, Color::White));
}

#[test]
fn structured_piece_type() {
    let mut board = board();
    board.place("f3", (PieceKind::Bishop, Color::Black)).unwrap();
    assert_eq!(board.occupant("F3").unwrap(), piece(PieceKind::Bishop, Color::Black));
}

#[test]
fn clear_empties_everything() {
    let mut board = board();
    board.set_start_position().unwrap();
    board.clear();
    assert!(board.fields().iter().all(|f| f.occupant().is_none()));
    assert!(board.get_highlighted().is_empty());

    let html = board.surface().render().unwrap();
    assert_eq!(html.matches("cbPieceNone").count(), 64);
}

#[test]
fn clear_is_idempotent() {
    let mut board = board();
    board.place("a1", "WR").unwrap();
    board.clear();
    let once = board.snapshot();
    board.clear();
    assert_eq!(board.snapshot(), once);
}

#[test]
fn start_position_layout() {
    let mut board = board();
    board.set_start_position().unwrap();

    let expected: Vec<(&str, PieceKind, Color)> = vec![
        ("A1", PieceKind::Rook, Color::White),
        ("H1", PieceKind::Rook, Color::White),
        ("B1", PieceKind::Knight, Color::White),
        ("G1", PieceKind::Knight, Color::White),
        ("C1", PieceKind::Bishop, Color::White),
        ("F1", PieceKind::Bishop, Color::White),
        ("D1", PieceKind::Queen, Color::White),
        ("E1", PieceKind::King, Color::White),
        ("A8", PieceKind::Rook, Color::Black),
        ("H8", PieceKind::Rook, Color::Black),
        ("B8", PieceKind::Knight, Color::Black),
        ("G8", PieceKind::Knight, Color::Black),
        ("C8", PieceKind::Bishop, Color::Black),
        ("F8", PieceKind::Bishop, Color::Black),
        ("D8", PieceKind::Queen, Color::Black),
        ("E8", PieceKind::King, Color::Black),
    ];
    let mut occupied: Vec<Square> = Vec::new();
    for (name, kind, color) in expected {
        assert_eq!(board.occupant(name).unwrap(), piece(kind, color), "{name}");
        occupied.push(name.parse().unwrap());
    }
    for file in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        let white = format!("{file}7");
        let black = format!("{file}2");
        assert_eq!(board.occupant(&white).unwrap(), piece(PieceKind::Pawn, Color::White));
        assert_eq!(board.occupant(&black).unwrap(), piece(PieceKind::Pawn, Color::Black));
        occupied.push(white.parse().unwrap());
        occupied.push(black.parse().unwrap());
    }

    assert_eq!(occupied.len(), 32);
    for field in board.fields() {
        if !occupied.contains(&field.square()) {
            assert_eq!(field.occupant(), None, "{}", field.name());
        }
    }
}

#[test]
fn start_position_layout_from_options() {
    let options =
        BoardOptions::from_toml_str("[start_position]\npawn_layout = \"standard\"").unwrap();
    let mut board = Board::builder(HtmlSurface::new()).options(options).build();
    board.set_start_position().unwrap();
    assert_eq!(board.config().pawn_layout, PawnLayout::Standard);
    assert_eq!(board.pieces_of(Color::White).len(), 16);
    assert_eq!(board.occupant("C2").unwrap(), piece(PieceKind::Pawn, Color::White));
}

#[test]
fn toggle_highlight_twice_restores() {
    let mut board = board();
    board.toggle_highlight("D4").unwrap();
    assert_eq!(board.get_highlighted(), vec!["D4".parse::<Square>().unwrap()]);
    assert!(board.field("D4").unwrap().is_highlighted());

    board.toggle_highlight("d4").unwrap();
    assert!(board.get_highlighted().is_empty());
    assert!(!board.field("D4").unwrap().is_highlighted());
}

#[test]
fn highlight_styles_and_classes() {
    let mut board = board();
    let d4: Square = "D4".parse().unwrap();
    let original = board
        .surface()
        .cell(d4)
        .style()
        .get("background-color")
        .map(str::to_string);

    board.highlight(d4).unwrap();
    let cell = board.surface().cell(d4);
    assert!(cell.has_class("cbFieldHighlighted"));
    assert_eq!(cell.style().get("background-color"), Some("#4cff4c"));

    board.unhighlight(d4).unwrap();
    let cell = board.surface().cell(d4);
    assert!(!cell.has_class("cbFieldHighlighted"));
    assert_eq!(
        cell.style().get("background-color").map(str::to_string),
        original
    );
}

#[test]
fn highlight_is_independent_of_occupancy() {
    let mut board = board();
    board.highlight(["A1", "B2"]).unwrap();
    board.place("A1", "WK").unwrap().remove("A1").unwrap();
    board.clear();
    assert_eq!(board.get_highlighted().len(), 2);
}

#[test]
fn invalid_square_leaves_board_unchanged() {
    for bad in ["I9", "A0", "ZZ"] {
        let mut board = board();
        board.place("E4", "WQ").unwrap().highlight("C3").unwrap();
        let before = board.snapshot();
        let html_before = board.surface().render().unwrap();

        let expected = Err(BoardError::InvalidSquareName(bad.to_string()));
        assert_eq!(board.place(["E5", bad], "BP").map(|_| ()), expected);
        assert_eq!(board.remove(["E4", bad]).map(|_| ()), expected);
        assert_eq!(board.place_rook(bad, Color::White).map(|_| ()), expected);
        assert_eq!(board.highlight(["D4", bad]).map(|_| ()), expected);
        assert_eq!(board.unhighlight(["C3", bad]).map(|_| ()), expected);
        assert_eq!(board.toggle_highlight(["C3", bad]).map(|_| ()), expected);

        assert_eq!(board.snapshot(), before);
        assert_eq!(board.surface().render().unwrap(), html_before);
    }
}

#[test]
fn unknown_piece_type_leaves_board_unchanged() {
    let mut board = board();
    let before = board.snapshot();
    assert_eq!(
        board.place("E4", "WHITE_DRAGON").map(|_| ()),
        Err(BoardError::UnknownPieceType("WHITE_DRAGON".to_string()))
    );
    assert_eq!(
        board.place_pawn("E4", "purple").map(|_| ()),
        Err(BoardError::UnknownColor("purple".to_string()))
    );
    assert_eq!(board.snapshot(), before);
}

#[test]
fn construction_paints_then_resizes_each_square() {
    let (_board, recorder) = recorded_board();
    let calls = recorder.take();
    assert_eq!(calls.len(), 128);
    assert_eq!(
        &calls[..4],
        ["paint_field:A8", "resize:A8", "paint_field:B8", "resize:B8"]
    );
    assert_eq!(&calls[126..], ["paint_field:H1", "resize:H1"]);
}

#[test]
fn piece_hook_runs_once_per_placed_square() {
    let (mut board, recorder) = recorded_board();
    recorder.take();
    board.place(["C3", "A1", "H8"], "BB").unwrap();
    assert_eq!(
        recorder.take(),
        ["paint_piece:C3", "paint_piece:A1", "paint_piece:H8"]
    );
}

#[test]
fn start_position_hook_order() {
    let (mut board, recorder) = recorded_board();
    recorder.take();
    board.set_start_position().unwrap();
    let calls = recorder.take();

    // 64 removals, then 16 pieces, then 16 pawns.
    assert_eq!(calls.len(), 96);
    assert_eq!(calls[0], "paint_piece:A8");
    assert_eq!(calls[63], "paint_piece:H1");
    assert_eq!(
        &calls[64..72],
        [
            "paint_piece:A1",
            "paint_piece:H1",
            "paint_piece:B1",
            "paint_piece:G1",
            "paint_piece:C1",
            "paint_piece:F1",
            "paint_piece:D1",
            "paint_piece:E1",
        ]
    );
    assert_eq!(
        &calls[80..84],
        [
            "paint_piece:A7",
            "paint_piece:A2",
            "paint_piece:B7",
            "paint_piece:B2",
        ]
    );
}

#[test]
fn highlight_hooks() {
    let (mut board, recorder) = recorded_board();
    recorder.take();
    board.highlight("E4").unwrap();
    board.toggle_highlight(["E4", "F5"]).unwrap();
    assert_eq!(
        recorder.take(),
        ["highlight:E4", "disacknowledge:E4", "highlight:F5"]
    );
}

#[test]
fn click_and_resize_notifications() {
    let (mut board, recorder) = recorded_board();
    recorder.take();
    board.click("g7").unwrap();
    assert_eq!(recorder.take(), ["click:G7"]);
    assert_eq!(
        board.click("g9").map(|_| ()),
        Err(BoardError::InvalidSquareName("g9".to_string()))
    );

    board.notify_resize();
    let calls = recorder.take();
    assert_eq!(calls.len(), 64);
    assert!(calls.iter().all(|c| c.starts_with("resize:")));
}

#[test]
fn custom_hook_replaces_default() {
    struct Plain;
    impl BoardHooks for Plain {
        fn on_paint_field(&mut self, ctx: &mut FieldContext<'_>) {
            ctx.set_style("background-color", "gray");
        }
    }

    let board = Board::builder(HtmlSurface::new()).hooks(Plain).build();
    let cell = board.surface().cell(Square::A1);
    assert_eq!(cell.style().get("background-color"), Some("gray"));
    assert_eq!(cell.style().get("width"), None);
    // The resize hook was not replaced and still runs.
    assert_eq!(cell.style().get("height"), Some("64px"));
}

#[test]
fn fixed_field_height() {
    let options = BoardOptions {
        field_height: Some("50px".to_string()),
        ..BoardOptions::default()
    };
    let board = Board::builder(HtmlSurface::new()).options(options).build();
    assert_eq!(
        board.surface().cell(Square::H1).style().get("height"),
        Some("50px")
    );
}

fn batch_with_bad_name() -> impl Strategy<Value = (Vec<String>, usize)> {
    let good = proptest::collection::vec(0usize..64, 0..6)
        .prop_map(|idx| idx.into_iter().map(|i| Square::ALL[i].name()).collect::<Vec<_>>());
    let bad = "[I-Zi-z][0-9]|[A-Ha-h][09]|[A-H]{2}| ";
    (good, bad).prop_flat_map(|(names, bad)| {
        let len = names.len();
        (Just(names), Just(bad), 0..=len).prop_map(|(mut names, bad, at)| {
            names.insert(at, bad);
            (names, at)
        })
    })
}

proptest! {
    #[test]
    fn batch_with_one_bad_name_changes_nothing(
        (names, at) in batch_with_bad_name(),
        occupied in proptest::collection::vec(0usize..64, 0..8),
        lit in proptest::collection::vec(0usize..64, 0..8),
    ) {
        let mut board = board();
        for i in occupied {
            board.place(Square::ALL[i], "BQ").unwrap();
        }
        for i in lit {
            board.highlight(Square::ALL[i]).unwrap();
        }
        let before = board.snapshot();
        let html_before = board.surface().render().unwrap();
        let expected = Err(BoardError::InvalidSquareName(names[at].clone()));

        prop_assert_eq!(board.place(names.clone(), "WN").map(|_| ()), expected.clone());
        prop_assert_eq!(board.remove(names.clone()).map(|_| ()), expected.clone());
        prop_assert_eq!(board.highlight(names.clone()).map(|_| ()), expected.clone());
        prop_assert_eq!(board.unhighlight(names.clone()).map(|_| ()), expected.clone());
        prop_assert_eq!(board.toggle_highlight(names).map(|_| ()), expected);

        prop_assert_eq!(board.snapshot(), before);
        prop_assert_eq!(board.surface().render().unwrap(), html_before);
    }
}
