pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected [`GameConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid width {width} is narrower than the widest piece ({min} cells)")]
    GridTooNarrow { width: u16, min: u16 },
    #[display("grid height {height} is lower than the tallest piece ({min} cells)")]
    GridTooShort { height: u16, min: u16 },
    #[display("grid {width}x{height} exceeds the maximum of {max}x{max} cells")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[display("cell size must be at least 1")]
    ZeroCellSize,
    #[display("fall interval must be longer than zero")]
    ZeroFallInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    input: String,
}
