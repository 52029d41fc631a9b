//! Error types for cosmic-voyage

use thiserror::Error;

/// Main error type for cosmic-voyage operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Speech error: {0}")]
    Speech(String),
}

/// Result type alias for cosmic-voyage operations
pub type Result<T> = std::result::Result<T, Error>;
