use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use blockfall_engine::GameConfig;

use crate::util;

/// Game settings taken from a config file and command-line overrides.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Load game settings from a JSON file
    #[clap(long = "config", value_name = "FILE")]
    pub(crate) config_file: Option<PathBuf>,
    /// Number of grid columns
    #[clap(long, value_name = "N")]
    pub(crate) width: Option<u16>,
    /// Number of grid rows
    #[clap(long, value_name = "N")]
    pub(crate) height: Option<u16>,
    /// Terminal columns used to draw one grid cell
    #[clap(long, value_name = "N")]
    pub(crate) cell_size: Option<u16>,
    /// Time between gravity steps in milliseconds
    #[clap(long, value_name = "N")]
    pub(crate) fall_interval_ms: Option<u64>,
}

impl ConfigArg {
    /// Builds the effective configuration.
    ///
    /// Flags override the config file, which overrides the defaults.
    pub(crate) fn resolve(&self) -> anyhow::Result<GameConfig> {
        let base = match &self.config_file {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        let config = self.apply_overrides(base);
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, config: GameConfig) -> GameConfig {
        GameConfig {
            grid_width: self.width.unwrap_or(config.grid_width),
            grid_height: self.height.unwrap_or(config.grid_height),
            cell_size: self.cell_size.unwrap_or(config.cell_size),
            fall_interval: self
                .fall_interval_ms
                .map_or(config.fall_interval, Duration::from_millis),
        }
    }
}
