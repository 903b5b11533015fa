//! Error types for the fleet telemetry parser library.

use thiserror::Error;

/// Result type alias for telemetry parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing or writing telemetry files.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid binary file format (wrong magic bytes, unsupported version,
    /// or a truncated trailing record)
    #[error("Invalid FLET format: {0}")]
    InvalidFormat(String),

    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data parsing error (e.g., a strictly-decoded numeric field that is
    /// not a number)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// UTF-8 encoding/decoding error
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
