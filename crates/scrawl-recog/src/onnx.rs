//! Model-based classifier via ONNX Runtime
//!
//! Runs a pretrained 10-way digit network exported to ONNX. The input is
//! the normalized digit image as a `[1, 1, size, size]` float tensor; the
//! output's first ten values are taken as class probabilities (the
//! exported network ends in a probability layer; no activation is applied
//! here). The argmax is accepted only above [`ACCEPT_PROBABILITY`].

use crate::classifier::{Classification, DigitClassifier};
use crate::error::{RecogError, RecogResult};
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use scrawl_core::DigitImage;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Minimum output probability to accept the argmax digit
pub const ACCEPT_PROBABILITY: f32 = 0.5;

/// Number of output classes
const CLASS_COUNT: usize = 10;

/// A digit classifier backed by an ONNX inference session
///
/// Loading is expensive; construct once and share. The session sits
/// behind a mutex because inference takes exclusive access, so one
/// classifier serializes its inference calls.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxClassifier {
    /// Load a model from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::ClassifierUnavailable`] if the file is
    /// missing or corrupt, or the runtime fails to initialize - callers
    /// must be able to tell this apart from "recognized nothing".
    pub fn load(model_path: impl AsRef<Path>) -> RecogResult<Self> {
        let path = model_path.as_ref();
        info!(path = %path.display(), "loading digit model");

        let unavailable =
            |err: ort::Error| RecogError::ClassifierUnavailable(format!("{}: {err}", path.display()));

        let session = Session::builder()
            .map_err(unavailable)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(unavailable)?
            .with_intra_threads(2)
            .map_err(unavailable)?
            .commit_from_file(path)
            .map_err(unavailable)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| {
                RecogError::ClassifierUnavailable(format!(
                    "{}: model declares no inputs",
                    path.display()
                ))
            })?;

        info!(path = %path.display(), input = %input_name, "digit model ready");
        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

impl DigitClassifier for OnnxClassifier {
    fn classify(&self, image: &DigitImage) -> RecogResult<Option<Classification>> {
        let size = image.size();
        let shape: Vec<usize> = vec![1, 1, size, size];
        let input = Value::from_array((shape.as_slice(), image.as_slice().to_vec()))
            .map_err(|e| RecogError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input])
            .map_err(|e| RecogError::Inference(e.to_string()))?;

        let (_, probabilities) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| RecogError::Inference(e.to_string()))?;
        if probabilities.len() < CLASS_COUNT {
            return Err(RecogError::Inference(format!(
                "expected {CLASS_COUNT} class outputs, got {}",
                probabilities.len()
            )));
        }

        let mut best = 0usize;
        let mut max_probability = f32::MIN;
        for (digit, &p) in probabilities.iter().take(CLASS_COUNT).enumerate() {
            if p > max_probability {
                max_probability = p;
                best = digit;
            }
        }

        if max_probability > ACCEPT_PROBABILITY {
            debug!(digit = best, probability = max_probability, "model match");
            Ok(Some(Classification {
                digit: best as u8,
                confidence: max_probability,
            }))
        } else {
            debug!(probability = max_probability, "below acceptance probability");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_a_distinct_failure() {
        let err = OnnxClassifier::load("/nonexistent/digits.onnx").unwrap_err();
        assert!(matches!(err, RecogError::ClassifierUnavailable(_)));
        let message = err.to_string();
        assert!(message.contains("classifier unavailable"), "{message}");
    }
}
