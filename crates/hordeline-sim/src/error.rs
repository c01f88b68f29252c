//! Errors raised while constructing a combat engine.

use thiserror::Error;

use hordeline_core::level::ConfigError;

#[derive(Debug, Error)]
pub enum CombatError {
    #[error("unknown level id {0}")]
    UnknownLevel(u32),
    #[error("invalid field bounds {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
