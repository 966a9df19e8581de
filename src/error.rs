//! Error types for welltrace

use std::io;
use thiserror::Error;

/// Result type for welltrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in welltrace operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Survey data failed validation before any computation
    #[error("Invalid survey: {0}")]
    Validation(#[from] ValidationError),

    /// Survey holds no stations at all
    #[error("Survey contains no stations")]
    EmptySurvey,

    /// Delimited table could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input table cell or record with an unexpected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Configuration rejected
    #[error("Config error: {0}")]
    Config(String),

    /// TOML config could not be parsed
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Projection error
    #[error("Projection error: {0}")]
    Projection(String),

    /// Unsupported feature
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Survey validation failures, indexed by station position in the input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("station {index}: measured depth {depth} is negative")]
    NegativeDepth { index: usize, depth: f64 },

    #[error("station {index}: measured depth {depth} does not exceed previous depth {previous}")]
    NonIncreasingDepth { index: usize, previous: f64, depth: f64 },

    #[error("station {index}: inclination {value} outside [0, 180]")]
    InclinationOutOfRange { index: usize, value: f64 },

    #[error("station {index}: azimuth {value} outside [0, 360]")]
    AzimuthOutOfRange { index: usize, value: f64 },

    #[error("station {index}: {field} is not a finite number")]
    NonFinite { index: usize, field: &'static str },

    #[error("station {index}: Dx/Dy offset required in DxDy mode")]
    MissingOffset { index: usize },
}

impl ValidationError {
    /// Index of the offending station
    pub fn index(&self) -> usize {
        match self {
            ValidationError::NegativeDepth { index, .. }
            | ValidationError::NonIncreasingDepth { index, .. }
            | ValidationError::InclinationOutOfRange { index, .. }
            | ValidationError::AzimuthOutOfRange { index, .. }
            | ValidationError::NonFinite { index, .. }
            | ValidationError::MissingOffset { index } => *index,
        }
    }
}
