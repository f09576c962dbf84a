//! Game engine logic and state management.
//!
//! This module builds gameplay on top of the core data structures:
//!
//! - [`Game`] - The simulation: board, falling piece, score, gravity, game over
//! - [`GameConfig`] - Grid size, cell size and fall interval
//! - [`GameStats`] - Score and line clear statistics
//! - [`PieceSource`] - Pluggable choice of the next piece kind
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] from a [`GameConfig`] (optionally with a seeded piece source)
//! 2. The presentation layer forwards player commands (move, rotate, drop)
//! 3. Once per frame it calls [`Game::tick`] with the elapsed time
//! 4. Locked pieces clear lines and spawn the next piece
//! 5. Repeat until a freshly spawned piece does not fit, then [`Game::reset`]
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{FixedPieceSource, Game, GameConfig, PieceKind};
//!
//! let mut game =
//!     Game::with_piece_source(GameConfig::default(), FixedPieceSource::new([PieceKind::O]))?;
//!
//! game.move_left();
//! game.rotate_piece();
//! game.tick(Duration::from_millis(500));
//! assert_eq!(game.current_piece().position().y, 1);
//!
//! game.drop_piece();
//! assert_eq!(game.stats().completed_pieces(), 1);
//! assert!(!game.is_game_over());
//! # Ok::<(), blockfall_engine::ConfigError>(())
//! ```

pub use self::{config::*, game::*, game_stats::*, piece_source::*};

mod config;
mod game;
mod game_stats;
mod piece_source;
