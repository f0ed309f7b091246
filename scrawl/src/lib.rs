//! Scrawl - Offline handwritten-digit recognition
//!
//! Takes a freehand canvas drawing and turns it into a recognized digit
//! or multi-digit number, entirely in-process:
//!
//! - Preprocessing: grayscale, thresholding, despeckling, and
//!   aspect-preserving normalization into a 28x28 grid
//! - Segmentation: connected-component splitting of multi-digit drawings,
//!   read left to right
//! - Classification: a pretrained ONNX network (feature `onnx`) or an
//!   artifact-free heuristic, interchangeable behind one trait
//!
//! # Example
//!
//! ```
//! use scrawl::{Canvas, Rgba};
//! use scrawl::recog::Recognizer;
//!
//! let recognizer = Recognizer::heuristic();
//! let canvas = Canvas::new(200, 200, Rgba::CHALKBOARD).unwrap();
//! assert_eq!(recognizer.recognize_number(&canvas).unwrap(), None);
//! ```

// Re-export core types (the containers used everywhere)
pub use scrawl_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use scrawl_prep as prep;
pub use scrawl_recog as recog;
pub use scrawl_segment as segment;
