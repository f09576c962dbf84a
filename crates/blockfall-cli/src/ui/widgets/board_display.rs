use blockfall_engine::{Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Clear, Widget},
};

use crate::ui::widgets::{BlockDisplay, CellView, style};

/// Message drawn over the middle of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOverlay {
    Paused,
    GameOver,
}

impl BoardOverlay {
    fn lines(self) -> [&'static str; 2] {
        match self {
            Self::Paused => ["PAUSED", "Press P to resume"],
            Self::GameOver => ["GAME OVER", "Press R to restart"],
        }
    }
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    cell_size: u16,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    overlay: Option<BoardOverlay>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board, cell_size: u16) -> Self {
        Self {
            board,
            cell_size,
            ghost: None,
            falling_piece: None,
            overlay: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn overlay(self, overlay: Option<BoardOverlay>) -> Self {
        Self { overlay, ..self }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn columns(&self) -> u16 {
        u16::try_from(self.board.width()).unwrap_or(u16::MAX)
    }

    fn rows(&self) -> u16 {
        u16::try_from(self.board.height()).unwrap_or(u16::MAX)
    }

    pub fn width(&self) -> u16 {
        self.columns().saturating_mul(self.cell_size)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.rows().saturating_mul(BlockDisplay::height())
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Board cells with the ghost and the falling piece drawn on top.
    ///
    /// Piece cells above the top row are not shown.
    fn cell_views(&self) -> Vec<Vec<CellView>> {
        let mut cells: Vec<Vec<CellView>> = self
            .board
            .rows()
            .map(|row| row.iter().copied().map(CellView::from).collect())
            .collect();

        let layers = [
            self.ghost.map(|piece| (piece, CellView::Ghost(piece.kind()))),
            self.falling_piece
                .map(|piece| (piece, CellView::Piece(piece.kind()))),
        ];
        for (piece, view) in layers.into_iter().flatten() {
            for pos in piece.occupied_positions() {
                let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
                    continue;
                };
                if let Some(cell) = cells.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = view;
                }
            }
        }
        cells
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (y, row) in (0..).zip(self.cell_views()) {
            for (x, cell) in (0..).zip(row) {
                let cell_area = Rect::new(
                    area.x.saturating_add(x * self.cell_size),
                    area.y.saturating_add(y * BlockDisplay::height()),
                    self.cell_size,
                    BlockDisplay::height(),
                )
                .intersection(area);
                if cell_area.is_empty() {
                    continue;
                }
                BlockDisplay::from_cell(cell, self.cell_size).render(cell_area, buf);
            }
        }

        if let Some(overlay) = self.overlay {
            let [title, hint] = overlay.lines();
            let text = Text::from(vec![
                Line::styled(title, style::OVERLAY_TITLE),
                Line::styled(hint, style::DEFAULT),
            ])
            .centered();
            let [overlay_area] = Layout::vertical([Constraint::Length(4)])
                .flex(Flex::Center)
                .areas(area);
            let [text_area] = Layout::vertical([Constraint::Length(2)])
                .flex(Flex::Center)
                .areas(overlay_area);
            Clear.render(overlay_area, buf);
            BlockWidget::new()
                .style(style::DEFAULT)
                .render(overlay_area, buf);
            text.render(text_area, buf);
        }
    }
}
