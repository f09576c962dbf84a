use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, core::MAX_SHAPE_SIZE};

/// Tunable game constants.
///
/// Every field can be substituted independently; the engine only reads the
/// grid size and the fall interval. `cell_size` is the number of terminal
/// columns used to draw one grid cell.
///
/// Deserializing fills missing fields from [`GameConfig::default`], and the
/// fall interval is written as integer milliseconds:
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{"fall_interval": 250}"#).unwrap();
/// assert_eq!(config.fall_interval, Duration::from_millis(250));
/// assert_eq!(config.grid_width, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub cell_size: u16,
    #[serde(with = "duration_millis")]
    pub fall_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
            cell_size: Self::DEFAULT_CELL_SIZE,
            fall_interval: Self::DEFAULT_FALL_INTERVAL,
        }
    }
}

impl GameConfig {
    pub const DEFAULT_GRID_WIDTH: u16 = 10;
    pub const DEFAULT_GRID_HEIGHT: u16 = 20;
    pub const DEFAULT_CELL_SIZE: u16 = 2;
    pub const DEFAULT_FALL_INTERVAL: Duration = Duration::from_millis(500);

    /// Smallest grid side that fits every piece in every orientation.
    #[expect(clippy::cast_possible_truncation)]
    pub const MIN_GRID_SIZE: u16 = MAX_SHAPE_SIZE as u16;
    pub const MAX_GRID_SIZE: u16 = 256;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            grid_width: width,
            grid_height: height,
            cell_size,
            fall_interval,
        } = *self;

        if width < Self::MIN_GRID_SIZE {
            return Err(ConfigError::GridTooNarrow {
                width,
                min: Self::MIN_GRID_SIZE,
            });
        }
        if height < Self::MIN_GRID_SIZE {
            return Err(ConfigError::GridTooShort {
                height,
                min: Self::MIN_GRID_SIZE,
            });
        }
        if width > Self::MAX_GRID_SIZE || height > Self::MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: Self::MAX_GRID_SIZE,
            });
        }
        if cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if fall_interval.is_zero() {
            return Err(ConfigError::ZeroFallInterval);
        }
        Ok(())
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
