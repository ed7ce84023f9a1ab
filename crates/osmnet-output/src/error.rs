//! Error types for osmnet-output.

use thiserror::Error;

use crate::Format;

/// Errors that can occur when rendering a result.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{what} results cannot be rendered as {format}")]
    Unsupported { format: Format, what: &'static str },
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
