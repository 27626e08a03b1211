//! Error types for the blink detection library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    Filter(String),

    /// Detection trace loading or parsing error
    #[error("Trace error: {0}")]
    Trace(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
