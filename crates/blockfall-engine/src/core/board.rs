use super::piece::{Piece, PieceColor, PieceKind, PiecePosition, Shape};

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Locked block of a specific piece type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Block::Empty => None,
            Block::Piece(kind) => Some(kind.color()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoardRow {
    cells: Box<[Block]>,
}

impl BoardRow {
    fn empty(width: u16) -> Self {
        Self {
            cells: vec![Block::Empty; usize::from(width)].into_boxed_slice(),
        }
    }

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }

    fn clear(&mut self) {
        self.cells.fill(Block::Empty);
    }
}

/// The grid of locked blocks.
///
/// Row 0 is the top of the grid, column 0 the left edge. The dimensions are
/// fixed at construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Block, Board, PieceKind};
///
/// let mut board = Board::new(4, 3);
/// for x in 0..4 {
///     board.set_cell(x, 2, Block::Piece(PieceKind::I));
/// }
/// board.set_cell(1, 1, Block::Piece(PieceKind::T));
///
/// assert_eq!(board.clear_lines(), 1);
/// assert_eq!(board.cell(1, 2), Some(Block::Piece(PieceKind::T)));
/// assert!(board.rows().take(2).flatten().all(|b| b.is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    rows: Vec<BoardRow>,
}

impl Board {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            rows: (0..height).map(|_| BoardRow::empty(width)).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.height)
    }

    pub(crate) fn columns(&self) -> u16 {
        self.width
    }

    /// Returns the cell at (`x`, `y`), or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if (`x`, `y`) is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y].cells[x] = block;
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.rows.iter().map(|row| &row.cells[..])
    }

    /// Returns whether every cell of row `y` is occupied.
    ///
    /// Query helper for callers inspecting a board; rows outside the grid are
    /// never filled.
    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.rows.get(y).is_some_and(BoardRow::is_filled)
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(BoardRow::clear);
    }

    /// Checks whether `shape` placed with its top-left corner at `position`
    /// is a legal placement.
    ///
    /// A placement is illegal when an occupied cell lies left of column 0,
    /// at or right of `width`, at or below `height`, or on a non-empty cell.
    /// Cells above the grid (negative rows) are always free.
    #[must_use]
    pub fn fits(&self, shape: &Shape, position: PiecePosition) -> bool {
        // Offsets are never negative, so an overflowing sum lies past the
        // right or bottom edge.
        shape.occupied_offsets().all(|(dx, dy)| {
            let (Some(x), Some(y)) = (position.x.checked_add(dx), position.y.checked_add(dy))
            else {
                return false;
            };
            let Ok(x) = usize::try_from(x) else {
                return false;
            };
            if x >= self.width() {
                return false;
            }
            match usize::try_from(y) {
                Err(_) => true,
                Ok(y) if y >= self.height() => false,
                Ok(y) => self.rows[y].cells[x].is_empty(),
            }
        })
    }

    /// Writes the piece's kind into every occupied cell inside the grid.
    ///
    /// Cells above the top row are discarded. Returns the number of cells
    /// written.
    pub fn fill_piece(&mut self, piece: &Piece) -> usize {
        let block = Block::Piece(piece.kind());
        let mut written = 0;
        for pos in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
                continue;
            };
            if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x)) {
                *cell = block;
                written += 1;
            }
        }
        written
    }

    /// Removes filled rows and returns how many were removed.
    ///
    /// Rows above a removed row shift down; empty rows appear at the top.
    /// Any number of rows, adjacent or not, is handled in one call.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..self.rows.len()).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows.swap(y, y + count);
            }
        }
        self.rows[..count].iter_mut().for_each(BoardRow::clear);
        count
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// `.` is an empty cell; a piece letter (`I`, `O`, `T`, `S`, `Z`, `J`,
    /// `L`) or `#` is an occupied cell (`#` is stored as an I block).
    /// The art describes the bottom rows of the board; rows above it are
    /// empty.
    ///
    /// # Panics
    ///
    /// Panics if a row is not `width` cells wide, if the art has more rows
    /// than `height`, or on an unknown character.
    #[must_use]
    pub fn from_ascii(width: u16, height: u16, art: &str) -> Self {
        let mut board = Self::new(width, height);
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= board.height(),
            "art has {} rows, board has {}",
            lines.len(),
            height
        );

        let top = board.height() - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            let blocks: Vec<Block> = line
                .chars()
                .map(|ch| match ch {
                    '.' => Block::Empty,
                    '#' => Block::Piece(PieceKind::I),
                    _ => Block::Piece(
                        PieceKind::from_char(ch)
                            .unwrap_or_else(|| panic!("unknown cell character {ch:?}")),
                    ),
                })
                .collect();
            assert_eq!(
                blocks.len(),
                board.width(),
                "Each row must have exactly {} cells, got {} at row {}",
                board.width(),
                blocks.len(),
                dy
            );
            board.rows[top + dy].cells.copy_from_slice(&blocks);
        }
        board
    }
}
