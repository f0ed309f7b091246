//! The recognition orchestrator
//!
//! Composes segmentation, preprocessing, and classification into the two
//! public operations: whole-canvas single-digit recognition and
//! multi-digit number recognition. The classifier is chosen at
//! construction and initialized lazily on first use through a
//! single-flight cell; a failed initialization surfaces as an error on
//! every call until the caller explicitly asks for a retry.

use crate::cell::{ClassifierCell, ClassifierState};
use crate::classifier::{Classification, DigitClassifier};
use crate::error::RecogResult;
use crate::heuristic::HeuristicClassifier;
#[cfg(feature = "onnx")]
use crate::onnx::OnnxClassifier;
use scrawl_core::Canvas;
use scrawl_prep::{PreprocessOptions, preprocess};
use scrawl_segment::{SegmentOptions, segment};
use std::sync::Arc;
use tracing::{debug, warn};

#[cfg(feature = "onnx")]
use crate::error::RecogError;
#[cfg(feature = "onnx")]
use std::path::PathBuf;

enum ClassifierChoice {
    /// The classifier was handed in ready-made
    Injected,
    /// Load an ONNX model from this path on first use
    #[cfg(feature = "onnx")]
    Model(PathBuf),
}

/// Digit and number recognizer
///
/// Construct with [`heuristic`](Recognizer::heuristic),
/// [`with_model`](Recognizer::with_model) (feature `onnx`), or
/// [`with_classifier`](Recognizer::with_classifier) for a custom
/// strategy. The recognizer holds no per-call state; the only cross-call
/// state is the cached classifier handle.
pub struct Recognizer {
    cell: ClassifierCell,
    choice: ClassifierChoice,
    prep: PreprocessOptions,
    seg: SegmentOptions,
}

impl Recognizer {
    /// Recognizer backed by the offline feature-scoring classifier.
    pub fn heuristic() -> Self {
        Self::with_classifier(Arc::new(HeuristicClassifier::new()))
    }

    /// Recognizer backed by a caller-supplied classifier.
    pub fn with_classifier(classifier: Arc<dyn DigitClassifier>) -> Self {
        Self {
            cell: ClassifierCell::ready(classifier),
            choice: ClassifierChoice::Injected,
            prep: PreprocessOptions::default(),
            seg: SegmentOptions::default(),
        }
    }

    /// Recognizer backed by an ONNX digit model at `model_path`.
    ///
    /// The model is loaded lazily on first use and cached; call
    /// [`warm_up`](Self::warm_up) to front-load the cost.
    #[cfg(feature = "onnx")]
    pub fn with_model(model_path: impl Into<PathBuf>) -> Self {
        Self {
            cell: ClassifierCell::new(),
            choice: ClassifierChoice::Model(model_path.into()),
            prep: PreprocessOptions::default(),
            seg: SegmentOptions::default(),
        }
    }

    /// Replace the preprocessing options.
    pub fn with_preprocess_options(mut self, options: PreprocessOptions) -> Self {
        self.prep = options;
        self
    }

    /// Replace the segmentation options.
    pub fn with_segment_options(mut self, options: SegmentOptions) -> Self {
        self.seg = options;
        self
    }

    fn classifier(&self) -> RecogResult<Arc<dyn DigitClassifier>> {
        match &self.choice {
            ClassifierChoice::Injected => self.cell.get_or_init(|| {
                unreachable!("injected classifiers are ready at construction")
            }),
            #[cfg(feature = "onnx")]
            ClassifierChoice::Model(path) => self.cell.get_or_init(|| {
                OnnxClassifier::load(path)
                    .map(|classifier| Arc::new(classifier) as Arc<dyn DigitClassifier>)
                    .inspect_err(|err: &RecogError| {
                        warn!(path = %path.display(), error = %err, "model load failed");
                    })
            }),
        }
    }

    /// Current lifecycle state of the classifier handle.
    pub fn classifier_state(&self) -> ClassifierState {
        self.cell.state()
    }

    /// After a failed load, allow the next call to try again. There is no
    /// automatic retry.
    pub fn retry_load(&self) {
        self.cell.retry();
    }

    /// Initialize the classifier now instead of on the first recognition.
    pub fn warm_up(&self) -> RecogResult<()> {
        self.classifier().map(|_| ())
    }

    /// Recognize the whole canvas as one digit, with confidence.
    ///
    /// `Ok(None)` covers both "nothing drawn" and "no confident match".
    pub fn classify_digit(&self, canvas: &Canvas) -> RecogResult<Option<Classification>> {
        let classifier = self.classifier()?;
        self.classify_with(&*classifier, canvas)
    }

    /// Recognize the whole canvas as one digit.
    pub fn recognize_digit(&self, canvas: &Canvas) -> RecogResult<Option<u8>> {
        Ok(self.classify_digit(canvas)?.map(|c| c.digit))
    }

    /// Recognize a possibly multi-digit number, left to right.
    ///
    /// Segmentation first; each crop is preprocessed and classified on
    /// its own, and a crop that fails either step is skipped rather than
    /// aborting the call - two good digits out of three still produce a
    /// result. With no usable segments the whole canvas is treated as a
    /// single digit. Digits join in spatial order, never completion order.
    pub fn recognize_number(&self, canvas: &Canvas) -> RecogResult<Option<String>> {
        let classifier = self.classifier()?;

        let crops = segment(canvas, &self.seg)?;
        if crops.is_empty() {
            debug!("no segments; treating canvas as a single digit");
            return Ok(self
                .classify_with(&*classifier, canvas)?
                .map(|c| c.as_char().to_string()));
        }

        let mut digits = String::new();
        for (index, crop) in crops.iter().enumerate() {
            match preprocess(&crop.canvas, &self.prep) {
                Ok(Some(image)) => match classifier.classify(&image) {
                    Ok(Some(result)) => digits.push(result.as_char()),
                    Ok(None) => debug!(crop = index, "no confident match, skipping"),
                    Err(err) => warn!(crop = index, error = %err, "classification failed, skipping"),
                },
                Ok(None) => debug!(crop = index, "no ink after preprocessing, skipping"),
                Err(err) => warn!(crop = index, error = %err, "preprocessing failed, skipping"),
            }
        }

        if digits.is_empty() {
            Ok(None)
        } else {
            Ok(Some(digits))
        }
    }

    fn classify_with(
        &self,
        classifier: &dyn DigitClassifier,
        canvas: &Canvas,
    ) -> RecogResult<Option<Classification>> {
        let Some(image) = preprocess(canvas, &self.prep)? else {
            debug!("nothing drawn");
            return Ok(None);
        };
        let result = classifier.classify(&image)?;
        if result.is_none() {
            debug!("no confident match");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecogError;
    use scrawl_core::{Bound, CanvasMut, DigitImage, Rgba};

    struct FixedDigit(u8);

    impl DigitClassifier for FixedDigit {
        fn classify(&self, _image: &DigitImage) -> RecogResult<Option<Classification>> {
            Ok(Some(Classification {
                digit: self.0,
                confidence: 1.0,
            }))
        }
    }

    struct NeverConfident;

    impl DigitClassifier for NeverConfident {
        fn classify(&self, _image: &DigitImage) -> RecogResult<Option<Classification>> {
            Ok(None)
        }
    }

    struct Broken;

    impl DigitClassifier for Broken {
        fn classify(&self, _image: &DigitImage) -> RecogResult<Option<Classification>> {
            Err(RecogError::Inference("broken".into()))
        }
    }

    fn paint_rect(cm: &mut CanvasMut, b: Bound) {
        for y in b.y..b.bottom() {
            for x in b.x..b.right() {
                cm.set_pixel(x as u32, y as u32, Rgba::WHITE).unwrap();
            }
        }
    }

    fn three_blob_canvas() -> Canvas {
        let mut cm = CanvasMut::new(300, 100, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(20, 30, 10, 40));
        paint_rect(&mut cm, Bound::new_unchecked(120, 30, 10, 40));
        paint_rect(&mut cm, Bound::new_unchecked(220, 30, 10, 40));
        cm.into()
    }

    #[test]
    fn test_empty_canvas_recognizes_nothing() {
        let recognizer = Recognizer::heuristic();
        let canvas = Canvas::new(100, 100, Rgba::CHALKBOARD).unwrap();
        assert_eq!(recognizer.recognize_digit(&canvas).unwrap(), None);
        assert_eq!(recognizer.recognize_number(&canvas).unwrap(), None);
    }

    #[test]
    fn test_injected_classifier_is_ready_immediately() {
        let recognizer = Recognizer::with_classifier(Arc::new(FixedDigit(4)));
        assert_eq!(recognizer.classifier_state(), ClassifierState::Ready);
        recognizer.warm_up().unwrap();
    }

    #[test]
    fn test_number_joins_all_segments() {
        let recognizer = Recognizer::with_classifier(Arc::new(FixedDigit(5)));
        let result = recognizer.recognize_number(&three_blob_canvas()).unwrap();
        assert_eq!(result.as_deref(), Some("555"));
    }

    #[test]
    fn test_number_with_no_confident_segment_is_none() {
        let recognizer = Recognizer::with_classifier(Arc::new(NeverConfident));
        assert_eq!(recognizer.recognize_number(&three_blob_canvas()).unwrap(), None);
    }

    #[test]
    fn test_broken_classifier_skips_crops_instead_of_aborting() {
        let recognizer = Recognizer::with_classifier(Arc::new(Broken));
        // Every crop fails to classify; the call itself still succeeds
        assert_eq!(recognizer.recognize_number(&three_blob_canvas()).unwrap(), None);
    }

    #[test]
    fn test_broken_classifier_propagates_on_single_digit_path() {
        let recognizer = Recognizer::with_classifier(Arc::new(Broken));
        let mut cm = CanvasMut::new(100, 100, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(40, 30, 10, 40));
        let err = recognizer.recognize_digit(&cm.into()).unwrap_err();
        assert!(matches!(err, RecogError::Inference(_)));
    }

    #[test]
    fn test_recognition_is_idempotent() {
        let recognizer = Recognizer::heuristic();
        let mut cm = CanvasMut::new(200, 200, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(98, 25, 4, 150));
        let canvas: Canvas = cm.into();

        let first = recognizer.recognize_digit(&canvas).unwrap();
        let second = recognizer.recognize_digit(&canvas).unwrap();
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_single_segment_uses_crop_path() {
        let recognizer = Recognizer::with_classifier(Arc::new(FixedDigit(8)));
        let mut cm = CanvasMut::new(200, 100, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(90, 30, 12, 40));
        let result = recognizer.recognize_number(&cm.into()).unwrap();
        assert_eq!(result.as_deref(), Some("8"));
    }

    #[test]
    fn test_number_falls_back_to_whole_canvas() {
        // 3x3 blob: below the segmenter's noise floor, still a drawing
        let recognizer = Recognizer::with_classifier(Arc::new(FixedDigit(2)));
        let mut cm = CanvasMut::new(100, 100, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(30, 30, 3, 3));
        let result = recognizer.recognize_number(&cm.into()).unwrap();
        assert_eq!(result.as_deref(), Some("2"));
    }
}
