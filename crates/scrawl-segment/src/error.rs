//! Error types for scrawl-segment

use thiserror::Error;

/// Errors that can occur during segmentation
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] scrawl_core::Error),

    /// Invalid segmentation options
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for segmentation operations
pub type SegmentResult<T> = Result<T, SegmentError>;
