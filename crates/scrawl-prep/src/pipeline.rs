//! The composed preprocessing pipeline
//!
//! Canvas in, normalized digit image out (or `None` when nothing is
//! drawn). Stages run in a fixed order: grayscale, binarize, despeckle,
//! bounding box, normalize. Each stage is also usable on its own.

use crate::despeckle::despeckle;
use crate::error::{PrepError, PrepResult};
use crate::grayscale::grayscale;
use crate::normalize::{DEFAULT_BOUND_PADDING, DEFAULT_MARGIN, ink_bounds, normalize};
use crate::threshold::{ThresholdPolicy, binarize};
use scrawl_core::{Canvas, DIGIT_IMAGE_SIZE, DigitImage};

/// Options for the preprocessing pipeline
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// Threshold selection policy
    pub threshold: ThresholdPolicy,
    /// Whether to drop isolated ink specks before the bounding box
    pub despeckle: bool,
    /// Padding added around the ink bounding box, in source pixels
    pub padding: i32,
    /// Side length of the normalized output grid
    pub target_size: usize,
    /// Empty border kept around the scaled glyph inside the target grid
    pub margin: usize,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            threshold: ThresholdPolicy::Otsu,
            despeckle: true,
            padding: DEFAULT_BOUND_PADDING,
            target_size: DIGIT_IMAGE_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

impl PreprocessOptions {
    fn validate(&self) -> PrepResult<()> {
        if self.target_size == 0 {
            return Err(PrepError::InvalidOptions(
                "target size must be positive".into(),
            ));
        }
        if self.margin >= self.target_size {
            return Err(PrepError::InvalidOptions(format!(
                "margin {} must be smaller than target size {}",
                self.margin, self.target_size
            )));
        }
        if self.padding < 0 {
            return Err(PrepError::InvalidOptions(format!(
                "padding must be non-negative, got {}",
                self.padding
            )));
        }
        Ok(())
    }
}

/// Run the full preprocessing pipeline on a canvas.
///
/// Returns `Ok(None)` when no ink survives thresholding and despeckling -
/// an empty drawing is a normal outcome, not an error.
///
/// # Errors
///
/// Returns [`PrepError::InvalidOptions`] for inconsistent options.
/// Malformed canvases (zero size, wrong buffer length) cannot reach this
/// function; [`Canvas`] construction rejects them.
pub fn preprocess(canvas: &Canvas, options: &PreprocessOptions) -> PrepResult<Option<DigitImage>> {
    options.validate()?;

    let gray = grayscale(canvas);
    let mask = binarize(&gray, options.threshold);
    let mask = if options.despeckle {
        despeckle(&mask)
    } else {
        mask
    };

    let Some(bound) = ink_bounds(&mask, options.padding) else {
        return Ok(None);
    };

    normalize(&mask, &bound, options.target_size, options.margin).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_core::{CanvasMut, Rgba};

    #[test]
    fn test_empty_canvas_yields_none() {
        let canvas = Canvas::new(100, 100, Rgba::CHALKBOARD).unwrap();
        let result = preprocess(&canvas, &PreprocessOptions::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_lone_speck_yields_none() {
        let mut cm = CanvasMut::new(100, 100, Rgba::CHALKBOARD).unwrap();
        cm.set_pixel(50, 50, Rgba::WHITE).unwrap();
        let result = preprocess(&cm.into(), &PreprocessOptions::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_stroke_yields_normalized_image() {
        let mut cm = CanvasMut::new(100, 100, Rgba::CHALKBOARD).unwrap();
        for y in 20..80 {
            for x in 48..52 {
                cm.set_pixel(x, y, Rgba::WHITE).unwrap();
            }
        }
        let img = preprocess(&cm.into(), &PreprocessOptions::default())
            .unwrap()
            .expect("stroke should survive preprocessing");
        assert_eq!(img.size(), DIGIT_IMAGE_SIZE);
        assert!(img.ink_count() > 0);
    }

    #[test]
    fn test_despeckle_can_be_disabled() {
        let mut cm = CanvasMut::new(100, 100, Rgba::CHALKBOARD).unwrap();
        cm.set_pixel(50, 50, Rgba::WHITE).unwrap();
        let options = PreprocessOptions {
            despeckle: false,
            ..Default::default()
        };
        let result = preprocess(&cm.into(), &options).unwrap();
        assert!(result.is_some());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let canvas = Canvas::new(10, 10, Rgba::CHALKBOARD).unwrap();
        let options = PreprocessOptions {
            margin: 40,
            ..Default::default()
        };
        assert!(preprocess(&canvas, &options).is_err());

        let options = PreprocessOptions {
            padding: -1,
            ..Default::default()
        };
        assert!(preprocess(&canvas, &options).is_err());
    }
}
