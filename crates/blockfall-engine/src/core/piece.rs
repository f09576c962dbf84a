use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::board::Board;

/// Maximum side length of a piece's occupancy matrix.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Maximum number of occupied cells in a piece.
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// The falling piece: a shape at a position on the board.
///
/// `position` is the grid coordinate of the top-left corner of the shape's
/// occupancy matrix. `y` may be negative while the piece is still partially
/// above the visible grid.
///
/// Movement and rotation come in two forms: [`Piece::moved`] and
/// [`Piece::rotated`] return a new value (used for trial moves that may be
/// discarded), [`Piece::rotate`] mutates in place.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind};
///
/// let board = Board::new(10, 20);
/// let piece = Piece::spawn(PieceKind::T, &board);
/// assert_eq!((piece.position().x, piece.position().y), (4, 0));
///
/// let trial = piece.moved(-1, 0).unwrap().rotated();
/// assert_eq!(trial.position().x, 3);
/// assert_eq!((trial.shape().width(), trial.shape().height()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position,
        }
    }

    /// Creates a piece at the spawn position of `board`.
    ///
    /// The spawn position centers the shape horizontally
    /// (`board_width / 2 - shape_width / 2`, rounded down) on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind, board: &Board) -> Self {
        let shape = kind.shape();
        let x = i32::from(board.columns() / 2) - i32::from(shape.width / 2);
        Self {
            kind,
            shape,
            position: PiecePosition::new(x, 0),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Returns the absolute grid positions of the occupied cells.
    #[must_use]
    pub fn occupied_positions(&self) -> ArrayVec<PiecePosition, MAX_PIECE_CELLS> {
        self.shape
            .occupied_offsets()
            .map(|(dx, dy)| {
                PiecePosition::new(
                    self.position.x.saturating_add(dx),
                    self.position.y.saturating_add(dy),
                )
            })
            .collect()
    }

    /// Returns the piece shifted by (`dx`, `dy`), or `None` if the position
    /// would overflow.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.position.x.checked_add(dx)?;
        let y = self.position.y.checked_add(dy)?;
        Some(Self {
            position: PiecePosition::new(x, y),
            ..*self
        })
    }

    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    /// Rotates the shape 90° clockwise in place, keeping the position.
    ///
    /// No board validation happens here.
    pub fn rotate(&mut self) {
        self.shape = self.shape.rotated_right();
    }
}

/// Grid position of a piece's top-left matrix corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangular occupancy matrix of a piece, at most 4×4.
///
/// Rows are indexed top to bottom, columns left to right.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|&cell| if cell { '#' } else { '.' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        f.debug_tuple("Shape").field(&rows.join("/")).finish()
    }
}

impl Shape {
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
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

    /// Returns whether the matrix cell at (`col`, `row`) is occupied.
    ///
    /// Query helper for inspecting a shape; cells outside the matrix are
    /// never occupied.
    #[must_use]
    pub fn is_occupied(&self, col: usize, row: usize) -> bool {
        col < self.width() && row < self.height() && self.cells[row][col]
    }

    /// Iterates over the rows of the matrix, each exactly `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Iterates over `(dx, dy)` offsets of the occupied cells, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |dy| {
            (0..self.width)
                .filter(move |&dx| self.cells[usize::from(dy)][usize::from(dx)])
                .map(move |dx| (i32::from(dx), i32::from(dy)))
        })
    }

    /// Returns the matrix rotated 90° clockwise.
    ///
    /// Cell (`row`, `col`) of the result is cell (`height - 1 - col`, `row`)
    /// of `self`; width and height swap.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let (width, height) = (self.height, self.width);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, cells_row) in cells.iter_mut().enumerate().take(usize::from(height)) {
            for (col, cell) in cells_row.iter_mut().enumerate().take(usize::from(width)) {
                *cell = self.cells[self.height() - 1 - col][row];
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }
}

/// RGB display color of a piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the canonical (spawn orientation) shape.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('I'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_rows([[1, 1, 1, 1]]),
    // O-piece
    Shape::from_rows([[1, 1], [1, 1]]),
    // T-piece
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
];

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor::new(0, 255, 255),   // cyan
    PieceColor::new(255, 255, 0),   // yellow
    PieceColor::new(128, 0, 128),   // purple
    PieceColor::new(0, 255, 0),     // green
    PieceColor::new(255, 0, 0),     // red
    PieceColor::new(0, 0, 255),     // blue
    PieceColor::new(255, 165, 0),   // orange
];
