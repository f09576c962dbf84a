use std::path::PathBuf;

use blockfall_engine::{Game, PieceSeed, RandomPieceSource};
use log::info;
use rand::Rng as _;
use ratatui_runtime::Runtime;

use crate::{command::config::ConfigArg, logging};

use self::{app::PlayApp, screen::PlayScreen};

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) config: ConfigArg,
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long, value_name = "HEX")]
    pub(crate) seed: Option<PieceSeed>,
    /// Write log records to this file
    #[clap(long, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        seed,
        log_file,
    } = arg;

    if let Some(path) = log_file {
        logging::init_file_logger(path)?;
    }

    let config = config.resolve()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("starting game with seed {seed} and config {config:?}");

    let game = Game::with_piece_source(config, RandomPieceSource::with_seed(seed))?;
    let mut app = PlayApp::new(PlayScreen::new(game));
    Runtime::new().run(&mut app)?;

    let stats = app.screen().game().stats();
    info!(
        "session ended: score {}, {} lines, {} pieces",
        stats.score(),
        stats.total_cleared_lines(),
        stats.completed_pieces()
    );
    Ok(())
}
