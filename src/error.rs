//! Error types for the lernmatrix library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Sequence length does not match the matrix dimension
    #[error("invalid length: sequence has {actual} elements but the matrix requires {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A binary-only sequence contains a value outside {0, 1}
    #[error("invalid value {value} at index {index}: sequence must be binary (composed of 0s and 1s)")]
    NonBinaryValue { index: usize, value: f64 },

    /// Input is not a usable numeric sequence
    #[error("invalid input: {0}")]
    InvalidType(String),

    /// Invalid engine configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// IO error while reading a pattern file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV in a pattern file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
