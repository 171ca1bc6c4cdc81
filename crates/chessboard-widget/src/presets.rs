//! Position presets built from ordinary placement calls.

use chessboard_core::{BoardError, Color, File, Square};

use crate::board::Board;
use crate::config::PawnLayout;
use crate::hooks::Surface;

impl<S: Surface> Board<S> {
    /// Clears the board and sets up the initial position, using the pawn
    /// layout from the board configuration.
    pub fn set_start_position(&mut self) -> Result<&mut Self, BoardError> {
        let layout = self.config().pawn_layout;
        self.set_start_position_with(layout)
    }

    /// Clears the board and sets up the initial position with an explicit
    /// pawn layout.
    ///
    /// Pieces are placed in a fixed order: white back rank, black back rank,
    /// then the pawns file by file, white before black.
    pub fn set_start_position_with(&mut self, layout: PawnLayout) -> Result<&mut Self, BoardError> {
        tracing::debug!(?layout, "setting start position");
        self.clear()
            .place_rook(["A1", "H1"], Color::White)?
            .place_knight(["B1", "G1"], Color::White)?
            .place_bishop(["C1", "F1"], Color::White)?
            .place_queen("D1", Color::White)?
            .place_king("E1", Color::White)?
            .place_rook(["A8", "H8"], Color::Black)?
            .place_knight(["B8", "G8"], Color::Black)?
            .place_bishop(["C8", "F8"], Color::Black)?
            .place_queen("D8", Color::Black)?
            .place_king("E8", Color::Black)?;

        let white_rank = layout.pawn_rank(Color::White);
        let black_rank = layout.pawn_rank(Color::Black);
        for file in File::ALL {
            self.place_pawn(Square::new(file, white_rank), Color::White)?
                .place_pawn(Square::new(file, black_rank), Color::Black)?;
        }
        Ok(self)
    }
}
