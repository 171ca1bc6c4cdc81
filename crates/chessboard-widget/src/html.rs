//! In-memory HTML rendering surface.
//!
//! [`HtmlSurface`] records everything the hooks write and renders it as the
//! `table.chessBoard` markup a page can embed directly.

use askama::Template;
use thiserror::Error;

use chessboard_core::{Rank, Square};

use crate::hooks::Surface;
use crate::style::Style;

/// Errors that can occur while rendering the board markup.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to render board template: {0}")]
    Template(#[from] askama::Error),
}

/// The recorded state of one rendered square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    classes: Vec<String>,
    style: Style,
    content: String,
}

impl Cell {
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A [`Surface`] that keeps the board as data and renders it to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlSurface {
    cells: Vec<Cell>,
    board_style: Style,
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlSurface {
    pub fn new() -> Self {
        HtmlSurface {
            cells: vec![Cell::default(); 64],
            board_style: Style::new(),
        }
    }

    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[square.index() as usize]
    }

    pub fn board_style(&self) -> &Style {
        &self.board_style
    }

    /// Renders the board as an HTML table, top row first.
    pub fn render(&self) -> Result<String, RenderError> {
        let rows = self
            .cells
            .chunks(8)
            .enumerate()
            .map(|(y, cells)| {
                let rank = Rank::ALL[7 - y];
                let parity = if y % 2 == 0 { "Odd" } else { "Even" };
                RowView {
                    classes: format!("cbRow cbRow{parity} cbRow{rank}"),
                    cells: cells
                        .iter()
                        .zip(Square::ALL[y * 8..].iter())
                        .map(|(cell, square)| CellView {
                            name: square.name(),
                            classes: cell.classes.join(" "),
                            style: cell.style.to_string(),
                            content: cell.content.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        let template = BoardTemplate {
            style: self.board_style.to_string(),
            rows,
        };
        Ok(template.render()?)
    }

    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.index() as usize]
    }
}

impl Surface for HtmlSurface {
    fn set_style(&mut self, square: Square, property: &str, value: &str) {
        self.cell_mut(square).style.set(property, value);
    }

    fn set_content(&mut self, square: Square, markup: &str) {
        self.cell_mut(square).content = markup.to_string();
    }

    fn add_class(&mut self, square: Square, class: &str) {
        let cell = self.cell_mut(square);
        if !cell.has_class(class) {
            cell.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, square: Square, class: &str) {
        self.cell_mut(square).classes.retain(|c| c != class);
    }

    fn set_board_style(&mut self, property: &str, value: &str) {
        self.board_style.set(property, value);
    }
}

struct CellView {
    name: String,
    classes: String,
    style: String,
    content: String,
}

struct RowView {
    classes: String,
    cells: Vec<CellView>,
}

#[derive(Template)]
#[template(path = "board.html")]
struct BoardTemplate {
    style: String,
    rows: Vec<RowView>,
}
