//! Error types for configuration loading and validation.
//!
//! The simulation itself is infallible once built; everything that can go
//! wrong happens while reading or checking a [`SimConfig`](crate::SimConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a simulation config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("config io error at {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `SimConfig`.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Sensor angle step must be non-zero and divide 360 evenly.
    #[error("invalid sensor angle step {0}: must be > 0 and divide 360")]
    InvalidAngleStep(u32),

    /// A length-like value (arena size, range, body size) was not positive.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// Committed turn length must be at least one frame.
    #[error("avoidance turn must last at least one frame")]
    ZeroTurnFrames,
}

impl ConfigError {
    /// Creates a non-positive value error.
    pub fn non_positive(name: &'static str, value: f32) -> Self {
        Self::NonPositive { name, value }
    }
}
