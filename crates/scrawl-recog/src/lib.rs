//! scrawl-recog - Digit classification and the recognition orchestrator
//!
//! Two interchangeable classifier strategies behind one trait:
//!
//! - [`HeuristicClassifier`] - offline feature scoring, no artifact needed
//! - [`OnnxClassifier`] - pretrained 10-way network via ONNX Runtime
//!   (cargo feature `onnx`)
//!
//! [`Recognizer`] composes segmentation, preprocessing, and
//! classification, with lazy single-flight classifier initialization and
//! an observable `Uninitialized / Loading / Ready / Failed` lifecycle.
//!
//! # Examples
//!
//! ```
//! use scrawl_core::{Canvas, Rgba};
//! use scrawl_recog::Recognizer;
//!
//! let recognizer = Recognizer::heuristic();
//! let canvas = Canvas::new(200, 200, Rgba::CHALKBOARD).unwrap();
//! // An empty canvas is a normal "nothing recognized", not an error
//! assert_eq!(recognizer.recognize_number(&canvas).unwrap(), None);
//! ```

mod cell;
mod classifier;
mod error;
mod heuristic;
#[cfg(feature = "onnx")]
mod onnx;
mod recognizer;

pub use cell::{ClassifierCell, ClassifierState};
pub use classifier::{Classification, DigitClassifier};
pub use error::{RecogError, RecogResult};
pub use heuristic::{
    ACCEPT_SCORE, FALLBACK_HORIZONTAL_MAX, FALLBACK_HORIZONTAL_MIN, FALLBACK_VERTICAL_MAX,
    FALLBACK_VERTICAL_MIN, HeuristicClassifier, StrokeFeatures, fallback_digit,
};
#[cfg(feature = "onnx")]
pub use onnx::{ACCEPT_PROBABILITY, OnnxClassifier};
pub use recognizer::Recognizer;
