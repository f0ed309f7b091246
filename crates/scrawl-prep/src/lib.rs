//! scrawl-prep - Canvas preprocessing for digit recognition
//!
//! Turns a raw drawing surface into the normalized square grid the
//! classifiers consume:
//!
//! 1. Grayscale conversion with perceptual luminance weights
//! 2. Binary thresholding (fixed or Otsu's adaptive method)
//! 3. Speck removal
//! 4. Ink bounding box with padding
//! 5. Aspect-preserving scale and centering into the target grid
//!
//! # Examples
//!
//! ```
//! use scrawl_core::{Canvas, Rgba};
//! use scrawl_prep::{PreprocessOptions, preprocess};
//!
//! let canvas = Canvas::new(200, 200, Rgba::CHALKBOARD).unwrap();
//! // Nothing drawn: preprocessing reports an empty result, not an error
//! let result = preprocess(&canvas, &PreprocessOptions::default()).unwrap();
//! assert!(result.is_none());
//! ```

mod despeckle;
mod error;
mod grayscale;
mod normalize;
mod pipeline;
mod threshold;

pub use despeckle::{MIN_NEIGHBOR_SUPPORT, despeckle};
pub use error::{PrepError, PrepResult};
pub use grayscale::{LUMA_B, LUMA_G, LUMA_R, grayscale};
pub use normalize::{DEFAULT_BOUND_PADDING, DEFAULT_MARGIN, ink_bounds, normalize};
pub use pipeline::{PreprocessOptions, preprocess};
pub use threshold::{DEFAULT_FIXED_THRESHOLD, ThresholdPolicy, binarize, otsu_threshold};
