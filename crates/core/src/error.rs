//! Error types of the simulation core.

use thiserror::Error;

/// A coordinate outside the field was passed to a checked accessor.
///
/// Valid piece geometry never produces this; it marks a broken caller and is
/// never clamped away.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cell ({x}, {y}) is outside the field")]
pub struct OutOfBounds {
    pub x: i32,
    pub y: i32,
}

/// Rejected [`GameConfig`](crate::config::GameConfig) values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field must be at least {min}x{min} cells, got {width}x{height}")]
    FieldTooSmall { width: i32, height: i32, min: i32 },
    #[error("field must be at most {max}x{max} cells, got {width}x{height}")]
    FieldTooLarge { width: i32, height: i32, max: i32 },
    #[error("{name} must be a positive duration, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },
    #[error("{name} is out of range: {value}")]
    InvalidFactor { name: &'static str, value: f64 },
}
