//! Error types for session setup.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or unreadable configuration. Raised once, at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("world size must be positive and finite, got {0}")]
    WorldSize(f32),
    #[error("{field} must be a positive timestep, got {value}")]
    Timestep { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("planet score range is inverted ({min} > {max})")]
    ScoreRange { min: u32, max: u32 },
}
