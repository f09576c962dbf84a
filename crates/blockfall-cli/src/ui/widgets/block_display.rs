use blockfall_engine::{Block, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// What a single grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Ghost(PieceKind),
    Piece(PieceKind),
}

impl From<Block> for CellView {
    fn from(block: Block) -> Self {
        match block {
            Block::Empty => Self::Empty,
            Block::Piece(kind) => Self::Piece(kind),
        }
    }
}

/// Draws one grid cell, `cell_size` columns wide and one row high.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: CellView, cell_size: u16) -> Self {
        match cell {
            CellView::Empty => Self::new(style::EMPTY_DOT, "."),
            CellView::Ghost(kind) => {
                let symbol = if cell_size >= 2 { "[]" } else { "+" };
                Self::new(style::ghost(kind.color()), symbol)
            }
            CellView::Piece(kind) => Self::new(style::piece(kind.color()), ""),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area with the style, not just the symbol cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
