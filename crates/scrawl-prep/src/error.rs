//! Error types for scrawl-prep

use thiserror::Error;

/// Errors that can occur during preprocessing
#[derive(Debug, Error)]
pub enum PrepError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] scrawl_core::Error),

    /// Invalid preprocessing options
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for preprocessing operations
pub type PrepResult<T> = Result<T, PrepError>;
