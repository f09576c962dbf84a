use std::time::Duration;

use log::{debug, info, trace};

use crate::{
    ConfigError,
    core::{Board, Piece, PiecePosition},
};

use super::{
    config::GameConfig,
    game_stats::GameStats,
    piece_source::{PieceSource, RandomPieceSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Playing,
    GameOver,
}

/// Result of locking a piece into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    /// Cells written into the grid (cells above the top row are dropped).
    pub placed_cells: usize,
    pub cleared_lines: usize,
    /// Whether the piece spawned after the lock did not fit.
    pub game_over: bool,
}

/// Result of one [`Game::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The game is over; nothing happened.
    Ignored,
    /// Accumulated time is still below the fall interval.
    Waiting,
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
}

/// The falling-block simulation.
///
/// `Game` exclusively owns the board and the falling piece. The presentation
/// layer drives it with commands ([`Game::move_left`], [`Game::rotate_piece`],
/// [`Game::drop_piece`], ...) and [`Game::tick`], and reads the state back
/// through the query methods.
///
/// While the game is over, movement, rotation, hard drop and ticks are
/// ignored until [`Game::reset`].
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    current_piece: Piece,
    state: GameState,
    stats: GameStats,
    fall_time: Duration,
    piece_source: Box<dyn PieceSource>,
}

impl Game {
    /// Creates a game whose pieces are chosen by a randomly seeded
    /// [`RandomPieceSource`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_piece_source(config, RandomPieceSource::new())
    }

    pub fn with_piece_source<S>(config: GameConfig, piece_source: S) -> Result<Self, ConfigError>
    where
        S: PieceSource + 'static,
    {
        config.validate()?;
        let board = Board::new(config.grid_width, config.grid_height);
        let mut piece_source: Box<dyn PieceSource> = Box::new(piece_source);
        // The first piece always fits an empty board that passed validation.
        let current_piece = Piece::spawn(piece_source.next_kind(), &board);
        Ok(Self {
            config,
            board,
            current_piece,
            state: GameState::Playing,
            stats: GameStats::new(),
            fall_time: Duration::ZERO,
            piece_source,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Time accumulated toward the next gravity step.
    #[must_use]
    pub fn fall_time(&self) -> Duration {
        self.fall_time
    }

    /// Returns whether `piece`'s shape fits the board with its top-left
    /// corner at (`x`, `y`).
    ///
    /// This is the single legality check behind movement, rotation, hard
    /// drop and the post-lock spawn check.
    #[must_use]
    pub fn valid_move(&self, piece: &Piece, x: i32, y: i32) -> bool {
        self.board.fits(piece.shape(), PiecePosition::new(x, y))
    }

    /// Moves the falling piece by (`dx`, `dy`) if the target is legal.
    ///
    /// Returns `false` and leaves the piece unchanged otherwise.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let Some(candidate) = self.current_piece.moved(dx, dy) else {
            return false;
        };
        let pos = candidate.position();
        if !self.valid_move(&candidate, pos.x, pos.y) {
            return false;
        }
        self.current_piece = candidate;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Moves the falling piece down one row without locking it.
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Rotates the falling piece clockwise in place.
    ///
    /// The rotation is rejected (and the piece left untouched) when the
    /// rotated shape does not fit at the current position. No wall kicks.
    pub fn rotate_piece(&mut self) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let trial = self.current_piece.rotated();
        let pos = trial.position();
        if !self.valid_move(&trial, pos.x, pos.y) {
            return false;
        }
        self.current_piece = trial;
        true
    }

    /// Drops the falling piece to its lowest legal row and locks it.
    ///
    /// Returns `None` while the game is over.
    pub fn drop_piece(&mut self) -> Option<LockOutcome> {
        if self.state.is_game_over() {
            return None;
        }
        while self.try_move(0, 1) {}
        Some(self.lock_piece())
    }

    /// Where the falling piece would land on a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.current_piece;
        loop {
            let Some(below) = ghost.moved(0, 1) else {
                return ghost;
            };
            let pos = below.position();
            if !self.valid_move(&below, pos.x, pos.y) {
                return ghost;
            }
            ghost = below;
        }
    }

    /// Locks the falling piece into the board.
    ///
    /// Writes the piece's cells that are inside the grid, clears full lines,
    /// spawns the next piece and ends the game if that piece does not fit at
    /// its spawn position.
    pub fn lock_piece(&mut self) -> LockOutcome {
        let placed_cells = self.board.fill_piece(&self.current_piece);
        let cleared_lines = self.clear_lines();
        self.stats.record_lock(cleared_lines);
        debug!(
            "locked {} at {:?}: {placed_cells} cells placed, {cleared_lines} lines cleared",
            self.current_piece.kind().as_char(),
            self.current_piece.position(),
        );

        self.current_piece = self.spawn_piece();
        let pos = self.current_piece.position();
        let game_over = !self.valid_move(&self.current_piece, pos.x, pos.y);
        if game_over {
            self.state = GameState::GameOver;
            info!(
                "game over: {} does not fit at spawn, final score {}",
                self.current_piece.kind().as_char(),
                self.stats.score()
            );
        }

        LockOutcome {
            placed_cells,
            cleared_lines,
            game_over,
        }
    }

    /// Removes full rows and scores them.
    ///
    /// Clearing `n` rows at once adds `100 × n²` points. Returns `n`.
    pub fn clear_lines(&mut self) -> usize {
        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.stats.add_cleared_lines(cleared);
            debug!("cleared {cleared} lines, score {}", self.stats.score());
        }
        cleared
    }

    /// Advances gravity by `elapsed` time.
    ///
    /// Once the accumulated time reaches the configured fall interval the
    /// piece moves down one row, or locks if it cannot. The accumulator then
    /// restarts from zero, so any excess time is discarded and at most one
    /// row is dropped per tick.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        if self.state.is_game_over() {
            return TickOutcome::Ignored;
        }
        self.fall_time = self.fall_time.saturating_add(elapsed);
        if self.fall_time < self.config.fall_interval {
            return TickOutcome::Waiting;
        }
        self.fall_time = Duration::ZERO;
        if self.try_move(0, 1) {
            trace!("gravity: piece at {:?}", self.current_piece.position());
            TickOutcome::Fell
        } else {
            TickOutcome::Locked(self.lock_piece())
        }
    }

    /// Starts a new game on the same configuration and piece source.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_piece = self.spawn_piece();
        self.state = GameState::Playing;
        self.stats = GameStats::new();
        self.fall_time = Duration::ZERO;
        info!("game reset");
    }

    fn spawn_piece(&mut self) -> Piece {
        Piece::spawn(self.piece_source.next_kind(), &self.board)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, FixedPieceSource, PieceKind, PieceSeed, RandomPieceSource};

    use super::*;

    fn game_with(kinds: &[PieceKind]) -> Game {
        Game::with_piece_source(
            GameConfig::default(),
            FixedPieceSource::new(kinds.iter().copied()),
        )
        .unwrap()
    }

    fn filled_cells(game: &Game) -> usize {
        game.board().rows().flatten().filter(|b| !b.is_empty()).count()
    }

    #[test]
    fn test_new_game() {
        let game = game_with(&[PieceKind::T]);
        assert!(game.state().is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.fall_time(), Duration::ZERO);
        assert_eq!(game.current_piece().kind(), PieceKind::T);
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 0));
        assert_eq!(filled_cells(&game), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            grid_width: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(config),
            Err(ConfigError::GridTooNarrow { .. })
        ));
    }

    #[test]
    fn test_o_piece_falls_eighteen_rows() {
        let mut game = game_with(&[PieceKind::O]);
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 0));

        for _ in 0..18 {
            assert!(game.try_move(0, 1));
        }
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 18));
        assert!(!game.try_move(0, 1));
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 18));

        let outcome = game.drop_piece().unwrap();
        assert_eq!(outcome.placed_cells, 4);
        assert!(!outcome.game_over);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(game.board().cell(x, y), Some(Block::Piece(PieceKind::O)));
        }
        assert_eq!(filled_cells(&game), 4);
    }

    #[test]
    fn test_move_rejected_at_walls() {
        let mut game = game_with(&[PieceKind::I]);
        // I spawns at x = 3 on a 10-wide grid.
        for _ in 0..3 {
            assert!(game.move_left());
        }
        assert!(!game.move_left());
        assert_eq!(game.current_piece().position().x, 0);

        for _ in 0..6 {
            assert!(game.move_right());
        }
        assert!(!game.move_right());
        assert_eq!(game.current_piece().position().x, 6);
    }

    #[test]
    fn test_move_rejected_by_locked_blocks() {
        let mut game = game_with(&[PieceKind::O]);
        game.board = Board::from_ascii(10, 20, "...#......");
        // The block at (3, 19) stops the resting O from sliding left.
        for _ in 0..17 {
            assert!(game.soft_drop());
        }
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 17));
        assert!(game.soft_drop());
        assert!(!game.move_left());
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 18));
    }

    #[test]
    fn test_extreme_moves_are_rejected() {
        let mut game = game_with(&[PieceKind::I]);
        let start = game.current_piece().position();
        for (dx, dy) in [
            (i32::MAX, 0),
            (i32::MIN, 0),
            (0, i32::MAX),
            (0, i32::MIN),
            (i32::MAX, i32::MAX),
        ] {
            assert!(!game.try_move(dx, dy), "({dx}, {dy})");
            assert_eq!(game.current_piece().position(), start);
        }
        assert!(!game.is_game_over());

        let t = Piece::new(PieceKind::T, PiecePosition::new(0, 0));
        assert!(!game.valid_move(&t, i32::MAX, 0));
        assert!(!game.valid_move(&t, 0, i32::MAX));
        assert!(!game.valid_move(&t, i32::MIN, i32::MIN));
    }

    #[test]
    fn test_rotate_piece() {
        let mut game = game_with(&[PieceKind::T]);
        game.soft_drop();
        let before = *game.current_piece();
        assert!(game.rotate_piece());
        assert_eq!(game.current_piece().position(), before.position());
        assert_eq!(game.current_piece().shape(), &before.shape().rotated_right());
    }

    #[test]
    fn test_rotate_rolls_back_when_blocked() {
        let mut game = game_with(&[PieceKind::I]);
        // Horizontal I resting on the floor: rotating to vertical would
        // extend below the grid.
        while game.soft_drop() {}
        let before = *game.current_piece();
        assert_eq!(before.position().y, 19);
        assert!(!game.rotate_piece());
        assert_eq!(game.current_piece(), &before);
    }

    #[test]
    fn test_rotate_rejected_at_wall_without_kick() {
        let mut game = game_with(&[PieceKind::I]);
        // Vertical I at the right wall cannot rotate back to horizontal.
        assert!(game.rotate_piece());
        while game.move_right() {}
        let before = *game.current_piece();
        assert_eq!(before.position().x, 9);
        assert!(!game.rotate_piece());
        assert_eq!(game.current_piece(), &before);
    }

    #[test]
    fn test_four_rotations_restore_piece() {
        for kind in PieceKind::ALL {
            let mut game = game_with(&[kind]);
            game.soft_drop();
            game.soft_drop();
            let before = *game.current_piece();
            for _ in 0..4 {
                assert!(game.rotate_piece(), "{kind:?}");
            }
            assert_eq!(game.current_piece(), &before, "{kind:?}");
        }
    }

    #[test]
    fn test_drop_stops_on_obstruction() {
        let mut game = game_with(&[PieceKind::O, PieceKind::T]);
        game.board = Board::from_ascii(
            10,
            20,
            "
            ....#.....
            ..........
            ..........
            ",
        );
        let outcome = game.drop_piece().unwrap();
        assert_eq!(outcome.cleared_lines, 0);
        for (x, y) in [(4, 15), (5, 15), (4, 16), (5, 16)] {
            assert_eq!(game.board().cell(x, y), Some(Block::Piece(PieceKind::O)));
        }
        // The locked piece is gone; the next one is at its spawn position.
        assert_eq!(game.current_piece().kind(), PieceKind::T);
        assert_eq!(game.current_piece().position(), PiecePosition::new(4, 0));
    }

    #[test]
    fn test_ghost_piece_matches_drop() {
        let mut game = game_with(&[PieceKind::L]);
        game.board = Board::from_ascii(10, 20, "....##....\n....##....");
        let ghost = game.ghost_piece();
        assert_eq!(ghost.position(), PiecePosition::new(4, 16));
        assert_eq!(game.current_piece().position().y, 0);

        game.drop_piece();
        for pos in ghost.occupied_positions() {
            let (x, y) = (usize::try_from(pos.x).unwrap(), usize::try_from(pos.y).unwrap());
            assert_eq!(game.board().cell(x, y), Some(Block::Piece(PieceKind::L)));
        }
    }

    #[test]
    fn test_clear_lines_rows_three_and_five() {
        let mut game = game_with(&[PieceKind::T]);
        let mut board = Board::new(10, 20);
        let fill = |board: &mut Board, y: usize, cols: &[usize], kind: PieceKind| {
            for &x in cols {
                board.set_cell(x, y, Block::Piece(kind));
            }
        };
        let all: Vec<usize> = (0..10).collect();
        fill(&mut board, 1, &[0], PieceKind::J);
        fill(&mut board, 2, &[1, 2], PieceKind::L);
        fill(&mut board, 3, &all, PieceKind::I);
        fill(&mut board, 4, &[3], PieceKind::S);
        fill(&mut board, 5, &all, PieceKind::I);
        fill(&mut board, 6, &[9], PieceKind::Z);
        game.board = board;

        assert_eq!(game.clear_lines(), 2);
        assert_eq!(game.score(), 400);

        let board = game.board();
        // Two empty rows were inserted at the top.
        assert!(board.rows().take(3).flatten().all(|b| b.is_empty()));
        // Rows above row 3 moved down by two, row 4 by one.
        assert_eq!(board.cell(0, 3), Some(Block::Piece(PieceKind::J)));
        assert_eq!(board.cell(1, 4), Some(Block::Piece(PieceKind::L)));
        assert_eq!(board.cell(2, 4), Some(Block::Piece(PieceKind::L)));
        assert_eq!(board.cell(3, 5), Some(Block::Piece(PieceKind::S)));
        // Rows below row 5 did not move.
        assert_eq!(board.cell(9, 6), Some(Block::Piece(PieceKind::Z)));
        assert_eq!(filled_cells(&game), 5);
    }

    #[test]
    fn test_clear_lines_without_full_rows_keeps_score() {
        let mut game = game_with(&[PieceKind::T]);
        game.board = Board::from_ascii(10, 20, "#########.");
        assert_eq!(game.clear_lines(), 0);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_lock_clears_and_scores() {
        let mut game = game_with(&[PieceKind::I, PieceKind::O]);
        game.board = Board::from_ascii(
            10,
            20,
            "
            ###....###
            ###....###
            ",
        );
        // The horizontal I drops into the bottom row's gap and completes it.
        game.current_piece = Piece::new(PieceKind::I, PiecePosition::new(3, 0));
        let outcome = game.drop_piece().unwrap();
        assert_eq!(outcome.placed_cells, 4);
        assert_eq!(outcome.cleared_lines, 1);
        assert_eq!(game.score(), 100);
        assert_eq!(game.stats().total_cleared_lines(), 1);
        assert_eq!(game.stats().line_cleared_counter()[1], 1);
        assert_eq!(filled_cells(&game), 6);
    }

    #[test]
    fn test_lock_above_grid_writes_nothing() {
        let mut game = game_with(&[PieceKind::O, PieceKind::O]);
        game.current_piece = Piece::new(PieceKind::O, PiecePosition::new(0, -2));
        let outcome = game.lock_piece();
        assert_eq!(outcome.placed_cells, 0);
        assert!(!outcome.game_over);
        assert_eq!(filled_cells(&game), 0);
        assert!(game.state().is_playing());
    }

    #[test]
    fn test_game_over_when_spawn_overlaps() {
        let mut game = game_with(&[PieceKind::T]);
        // Everything but the top row is filled, with one hole per row so no
        // line clears.
        let row = "#########.";
        let art = vec![row; 19].join("\n");
        game.board = Board::from_ascii(10, 20, &art);
        game.current_piece = Piece::new(PieceKind::T, PiecePosition::new(0, -2));

        let outcome = game.lock_piece();
        assert!(outcome.game_over);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_game_over_after_stacking() {
        let mut game = game_with(&[PieceKind::O]);
        let mut locks = 0;
        while !game.is_game_over() {
            let outcome = game.drop_piece().unwrap();
            locks += 1;
            assert_eq!(outcome.cleared_lines, 0);
        }
        // Ten O pieces stack to the top of a 20-row grid; the eleventh
        // spawn collides.
        assert_eq!(locks, 10);
        assert_eq!(game.stats().completed_pieces(), 10);
    }

    #[test]
    fn test_commands_ignored_after_game_over() {
        let mut game = game_with(&[PieceKind::O]);
        while !game.is_game_over() {
            game.drop_piece();
        }
        let board = game.board().clone();
        let piece = *game.current_piece();

        assert!(!game.move_left());
        assert!(!game.move_right());
        assert!(!game.soft_drop());
        assert!(!game.rotate_piece());
        assert_eq!(game.drop_piece(), None);
        assert_eq!(game.tick(Duration::from_secs(10)), TickOutcome::Ignored);
        assert_eq!(game.board(), &board);
        assert_eq!(game.current_piece(), &piece);
        assert_eq!(game.fall_time(), Duration::ZERO);
    }

    #[test]
    fn test_tick_accumulates_until_interval() {
        let mut game = game_with(&[PieceKind::T]);
        assert_eq!(game.tick(Duration::from_millis(200)), TickOutcome::Waiting);
        assert_eq!(game.tick(Duration::from_millis(299)), TickOutcome::Waiting);
        assert_eq!(game.fall_time(), Duration::from_millis(499));
        assert_eq!(game.current_piece().position().y, 0);

        assert_eq!(game.tick(Duration::from_millis(1)), TickOutcome::Fell);
        assert_eq!(game.current_piece().position().y, 1);
        assert_eq!(game.fall_time(), Duration::ZERO);
    }

    #[test]
    fn test_tick_discards_excess_time() {
        let mut game = game_with(&[PieceKind::T]);
        assert_eq!(game.tick(Duration::from_secs(5)), TickOutcome::Fell);
        assert_eq!(game.current_piece().position().y, 1);
        assert_eq!(game.fall_time(), Duration::ZERO);
        assert_eq!(game.tick(Duration::from_millis(1)), TickOutcome::Waiting);
    }

    #[test]
    fn test_tick_locks_resting_piece() {
        let mut game = game_with(&[PieceKind::O, PieceKind::I]);
        while game.soft_drop() {}
        game.tick(Duration::from_millis(100));
        let outcome = game.tick(Duration::from_millis(400));
        assert!(outcome.is_locked());
        assert_eq!(game.fall_time(), Duration::ZERO);
        assert_eq!(game.current_piece().kind(), PieceKind::I);
        assert_eq!(filled_cells(&game), 4);
    }

    #[test]
    fn test_tick_uses_configured_interval() {
        let config = GameConfig {
            fall_interval: Duration::from_millis(100),
            ..GameConfig::default()
        };
        let mut game =
            Game::with_piece_source(config, FixedPieceSource::new([PieceKind::Z])).unwrap();
        assert!(game.tick(Duration::from_millis(100)).is_fell());
        assert!(game.tick(Duration::from_millis(99)).is_waiting());
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut game = game_with(&[PieceKind::O, PieceKind::I]);
        game.board = Board::from_ascii(10, 20, "##########\n#########.");
        game.drop_piece();
        assert_eq!(game.score(), 100);
        while !game.is_game_over() {
            game.drop_piece();
        }
        game.tick(Duration::from_millis(300));

        game.reset();
        assert!(game.state().is_playing());
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats(), &GameStats::new());
        assert_eq!(game.fall_time(), Duration::ZERO);
        assert_eq!(filled_cells(&game), 0);
        let piece = game.current_piece();
        let pos = piece.position();
        assert!(game.valid_move(piece, pos.x, pos.y));
        assert_eq!(pos.y, 0);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let seed = PieceSeed::from_bytes([42; 16]);
        let play = || {
            let mut game = Game::with_piece_source(
                GameConfig::default(),
                RandomPieceSource::with_seed(seed),
            )
            .unwrap();
            let mut kinds = vec![];
            for _ in 0..8 {
                kinds.push(game.current_piece().kind());
                game.drop_piece();
            }
            (kinds, game.board().clone())
        };
        assert_eq!(play(), play());
    }
}
