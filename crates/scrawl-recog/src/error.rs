//! Error types for scrawl-recog
//!
//! A failed classifier initialization is its own variant so callers can
//! tell "recognition is unavailable" apart from the ordinary "nothing was
//! recognized" (`Ok(None)`) outcome.

use thiserror::Error;

/// Errors that can occur during recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// The classifier could not be initialized (missing or corrupt model,
    /// runtime setup failure). Distinct from a low-confidence `Ok(None)`.
    #[error("classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// An inference call failed after successful initialization
    #[error("inference failed: {0}")]
    Inference(String),

    /// Preprocessing error
    #[error("preprocess error: {0}")]
    Prep(#[from] scrawl_prep::PrepError),

    /// Segmentation error
    #[error("segment error: {0}")]
    Segment(#[from] scrawl_segment::SegmentError),

    /// Core container error
    #[error("core error: {0}")]
    Core(#[from] scrawl_core::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
