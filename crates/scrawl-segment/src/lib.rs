//! scrawl-segment - Multi-digit segmentation
//!
//! Splits a drawing into individual digit crops using connected-component
//! labeling over the binary ink mask:
//!
//! - **Flood fill** over an explicit work stack (4-way by default)
//! - **Noise floor**: components under a minimum pixel count are dropped
//! - **Reading order**: crops sorted by ascending horizontal center
//!
//! # Examples
//!
//! ```
//! use scrawl_core::{Canvas, Rgba};
//! use scrawl_segment::{SegmentOptions, segment};
//!
//! let canvas = Canvas::new(200, 100, Rgba::CHALKBOARD).unwrap();
//! let crops = segment(&canvas, &SegmentOptions::default()).unwrap();
//! assert!(crops.is_empty()); // nothing drawn
//! ```

mod conncomp;
mod crop;
mod error;

pub use conncomp::{Connectivity, InkComponent, find_components};
pub use crop::{DEFAULT_CROP_PADDING, DigitCrop, MIN_COMPONENT_PIXELS, SegmentOptions, segment};
pub use error::{SegmentError, SegmentResult};
