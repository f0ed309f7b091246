//! Heuristic feature-scoring classifier
//!
//! The offline fallback strategy: no trained artifact, just region
//! densities measured over the ink mask and a hand-tuned rule table. The
//! thresholds were fixed by inspection against real drawings and are kept
//! as-is; treat them as a baseline, not an optimum. The table is isolated
//! behind [`DigitClassifier`] so it can be replaced without touching any
//! caller.

use crate::classifier::{Classification, DigitClassifier};
use crate::error::RecogResult;
use scrawl_core::DigitImage;
use tracing::debug;

/// Minimum accumulated rule score to accept the winning digit
pub const ACCEPT_SCORE: i32 = 3;

/// Vertical-run fraction above which a low-scoring image falls back to "1"
pub const FALLBACK_VERTICAL_MIN: f32 = 0.15;

/// Horizontal-run fraction a "1" fallback must stay under
pub const FALLBACK_HORIZONTAL_MAX: f32 = 0.05;

/// Horizontal-run fraction above which a low-scoring image falls back to "0"
pub const FALLBACK_HORIZONTAL_MIN: f32 = 0.15;

/// Vertical-run fraction a "0" fallback must stay under
pub const FALLBACK_VERTICAL_MAX: f32 = 0.05;

/// Region-density features measured over a digit image's ink mask
///
/// All fractions are relative to the total ink count; center coordinates
/// are normalized to [0, 1] over the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeFeatures {
    /// Total ink pixel count
    pub ink: usize,
    /// Normalized center of mass, horizontal
    pub center_x: f32,
    /// Normalized center of mass, vertical
    pub center_y: f32,
    /// Ink fraction in the top half
    pub top: f32,
    /// Ink fraction in the bottom half
    pub bottom: f32,
    /// Ink fraction in the left half
    pub left: f32,
    /// Ink fraction in the right half
    pub right: f32,
    /// Ink fraction in the top-left quadrant
    pub top_left: f32,
    /// Ink fraction in the top-right quadrant
    pub top_right: f32,
    /// Ink fraction in the bottom-left quadrant
    pub bottom_left: f32,
    /// Ink fraction in the bottom-right quadrant
    pub bottom_right: f32,
    /// Fraction of ink pixels with ink directly above and below
    pub vertical: f32,
    /// Fraction of ink pixels with ink directly left and right
    pub horizontal: f32,
}

impl StrokeFeatures {
    /// Measure features over an image's ink mask.
    ///
    /// Returns `None` when the image holds no ink at all.
    pub fn measure(image: &DigitImage) -> Option<Self> {
        let size = image.size();
        let half_w = size as f32 / 2.0;
        let half_h = size as f32 / 2.0;

        let mut ink = 0usize;
        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        let mut top = 0usize;
        let mut bottom = 0usize;
        let mut left = 0usize;
        let mut right = 0usize;
        let mut quads = [0usize; 4]; // tl, tr, bl, br

        for y in 0..size {
            for x in 0..size {
                if !image.is_ink(x, y) {
                    continue;
                }
                ink += 1;
                sum_x += x as f32;
                sum_y += y as f32;

                let in_top = (y as f32) < half_h;
                let in_left = (x as f32) < half_w;
                if in_top {
                    top += 1;
                } else {
                    bottom += 1;
                }
                if in_left {
                    left += 1;
                } else {
                    right += 1;
                }
                match (in_top, in_left) {
                    (true, true) => quads[0] += 1,
                    (true, false) => quads[1] += 1,
                    (false, true) => quads[2] += 1,
                    (false, false) => quads[3] += 1,
                }
            }
        }

        if ink == 0 {
            return None;
        }

        // Locally-vertical and locally-horizontal ink runs over the
        // interior (edge pixels can never have both neighbors)
        let mut vertical = 0usize;
        let mut horizontal = 0usize;
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                if !image.is_ink(x, y) {
                    continue;
                }
                if image.is_ink(x, y - 1) && image.is_ink(x, y + 1) {
                    vertical += 1;
                }
                if image.is_ink(x - 1, y) && image.is_ink(x + 1, y) {
                    horizontal += 1;
                }
            }
        }

        let total = ink as f32;
        Some(Self {
            ink,
            center_x: sum_x / total / size as f32,
            center_y: sum_y / total / size as f32,
            top: top as f32 / total,
            bottom: bottom as f32 / total,
            left: left as f32 / total,
            right: right as f32 / total,
            top_left: quads[0] as f32 / total,
            top_right: quads[1] as f32 / total,
            bottom_left: quads[2] as f32 / total,
            bottom_right: quads[3] as f32 / total,
            vertical: vertical as f32 / total,
            horizontal: horizontal as f32 / total,
        })
    }
}

/// Score every digit against the rule table.
///
/// Each rule rewards a density pattern typical for its digit; scores
/// accumulate and the caller takes the argmax. Thresholds are the tuned
/// originals.
fn score_table(f: &StrokeFeatures) -> [i32; 10] {
    let mut scores = [0i32; 10];

    // 0: circular, balanced, centered
    if (0.35..0.65).contains(&f.center_x) && (0.35..0.65).contains(&f.center_y) {
        scores[0] += 3;
        if f.top > 0.25 && f.bottom > 0.25 && f.left > 0.25 && f.right > 0.25 {
            scores[0] += 2;
        }
        if f.horizontal > 0.1 {
            scores[0] += 1;
        }
    }

    // 1: primarily vertical, minimal horizontal
    if f.vertical > 0.12 && f.horizontal < 0.08 {
        scores[1] += 4;
        if (0.3..0.7).contains(&f.center_x) {
            scores[1] += 1;
        }
    }
    if f.top > 0.2 && f.bottom > 0.2 && f.left < 0.15 && f.right < 0.15 {
        scores[1] += 2;
    }

    // 2: top curve, middle horizontal, bottom sweep
    if f.top > 0.2 && f.bottom > 0.2 && f.horizontal > 0.08 {
        scores[2] += 3;
        if f.top_right > 0.15 {
            scores[2] += 1;
        }
        if f.bottom_left > 0.15 {
            scores[2] += 1;
        }
    }
    if (0.4..0.6).contains(&f.center_y) {
        scores[2] += 1;
    }

    // 3: two similar curves, top and bottom
    if (f.top - f.bottom).abs() < 0.1 && f.top > 0.2 {
        scores[3] += 3;
        if f.right > f.left * 1.2 {
            scores[3] += 2;
        }
    }
    if f.horizontal > 0.1 {
        scores[3] += 1;
    }

    // 4: vertical stroke crossed by a horizontal one
    if f.vertical > 0.08 && f.horizontal > 0.08 {
        scores[4] += 2;
        if f.top_left + f.top_right > 0.25 {
            scores[4] += 2;
        }
        if f.bottom_left < 0.1 {
            scores[4] += 1;
        }
    }
    if f.left > 0.2 && f.right > 0.2 {
        scores[4] += 1;
    }

    // 5: top horizontal, then a bottom curve
    if f.top > 0.22 && f.horizontal > 0.1 {
        scores[5] += 3;
        if f.center_y > 0.45 {
            scores[5] += 1;
        }
        if f.bottom_left > 0.12 {
            scores[5] += 1;
        }
    }

    // 6: bottom-heavy with a closing curve
    if f.bottom > f.top * 1.15 {
        scores[6] += 3;
        if f.bottom_left > 0.15 {
            scores[6] += 2;
        }
        if f.left > 0.2 {
            scores[6] += 1;
        }
        if f.horizontal > 0.08 {
            scores[6] += 1;
        }
    }

    // 7: top-heavy, minimal bottom
    if f.top > 0.25 && f.bottom < 0.15 {
        scores[7] += 4;
        if f.top_right > 0.15 {
            scores[7] += 1;
        }
    }
    if f.horizontal > 0.1 && f.center_y < 0.5 {
        scores[7] += 1;
    }

    // 8: two loops, balanced halves
    if f.top > 0.2 && f.bottom > 0.2 && f.left > 0.15 && f.right > 0.15 {
        scores[8] += 3;
        if (f.top - f.bottom).abs() < 0.1 {
            scores[8] += 2;
        }
        if f.horizontal > 0.1 {
            scores[8] += 1;
        }
    }

    // 9: top-heavy with a right-side curve
    if f.top > f.bottom * 1.15 {
        scores[9] += 3;
        if f.top_right > 0.15 {
            scores[9] += 2;
        }
        if f.right > 0.2 {
            scores[9] += 1;
        }
        if f.bottom > 0.15 && f.bottom_left > 0.1 {
            scores[9] += 1;
        }
    }

    scores
}

/// Narrow fallback rules applied when no digit reaches [`ACCEPT_SCORE`]:
/// a near-pure vertical stroke reads as "1", a near-pure horizontal one
/// as "0".
pub fn fallback_digit(f: &StrokeFeatures) -> Option<u8> {
    if f.vertical > FALLBACK_VERTICAL_MIN && f.horizontal < FALLBACK_HORIZONTAL_MAX {
        return Some(1);
    }
    if f.horizontal > FALLBACK_HORIZONTAL_MIN && f.vertical < FALLBACK_VERTICAL_MAX {
        return Some(0);
    }
    None
}

/// The feature-scoring classifier
///
/// Confidence on an accepted result is the winning accumulated score;
/// fallback matches carry a nominal confidence of 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    /// Create a new heuristic classifier.
    pub fn new() -> Self {
        Self
    }
}

impl DigitClassifier for HeuristicClassifier {
    fn classify(&self, image: &DigitImage) -> RecogResult<Option<Classification>> {
        let Some(features) = StrokeFeatures::measure(image) else {
            return Ok(None);
        };

        let scores = score_table(&features);
        let mut best: Option<u8> = None;
        let mut max_score = 0;
        for (digit, &score) in scores.iter().enumerate() {
            if score > max_score {
                max_score = score;
                best = Some(digit as u8);
            }
        }

        match best {
            Some(digit) if max_score >= ACCEPT_SCORE => {
                debug!(digit, score = max_score, "rule table match");
                return Ok(Some(Classification {
                    digit,
                    confidence: max_score as f32,
                }));
            }
            _ => {}
        }

        if let Some(digit) = fallback_digit(&features) {
            debug!(digit, "fallback rule match");
            return Ok(Some(Classification {
                digit,
                confidence: 1.0,
            }));
        }

        debug!(score = max_score, "no rule reached the acceptance floor");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_ink(pixels: &[(usize, usize)]) -> DigitImage {
        let mut img = DigitImage::new(28).unwrap();
        for &(x, y) in pixels {
            img.set_value(x, y, 1.0);
        }
        img
    }

    fn vertical_bar() -> DigitImage {
        image_with_ink(&(2..26).map(|y| (14, y)).collect::<Vec<_>>())
    }

    #[test]
    fn test_empty_image_measures_none() {
        let img = DigitImage::new(28).unwrap();
        assert!(StrokeFeatures::measure(&img).is_none());
    }

    #[test]
    fn test_features_of_vertical_bar() {
        let f = StrokeFeatures::measure(&vertical_bar()).unwrap();
        assert_eq!(f.ink, 24);
        assert!((f.top - 0.5).abs() < 1e-6);
        assert!((f.bottom - 0.5).abs() < 1e-6);
        // Column 14 sits in the right half of a 28-wide grid
        assert_eq!(f.left, 0.0);
        assert_eq!(f.right, 1.0);
        assert!(f.vertical > 0.9);
        assert_eq!(f.horizontal, 0.0);
    }

    #[test]
    fn test_classify_vertical_bar_as_one() {
        let result = HeuristicClassifier::new()
            .classify(&vertical_bar())
            .unwrap()
            .expect("a clean vertical bar must classify");
        assert_eq!(result.digit, 1);
        assert!(result.confidence >= ACCEPT_SCORE as f32);
    }

    #[test]
    fn test_classify_top_bar_with_tail_as_seven() {
        // Horizontal bar along the top plus a diagonal tail
        let mut pixels: Vec<(usize, usize)> = (2..26).map(|x| (x, 2)).collect();
        pixels.extend((0..11).map(|i| (20 - i, 3 + i)));
        let img = image_with_ink(&pixels);

        let result = HeuristicClassifier::new()
            .classify(&img)
            .unwrap()
            .expect("top-heavy glyph must classify");
        assert_eq!(result.digit, 7);
    }

    #[test]
    fn test_classify_bottom_bar_as_six() {
        // A bottom-heavy horizontal sweep matches the "6" rule
        let img = image_with_ink(&(2..26).map(|x| (x, 26)).collect::<Vec<_>>());
        let result = HeuristicClassifier::new().classify(&img).unwrap().unwrap();
        assert_eq!(result.digit, 6);
    }

    #[test]
    fn test_classify_empty_image_is_none() {
        let img = DigitImage::new(28).unwrap();
        assert!(HeuristicClassifier::new().classify(&img).unwrap().is_none());
    }

    #[test]
    fn test_fallback_vertical_reads_as_one() {
        let mut f = StrokeFeatures::measure(&vertical_bar()).unwrap();
        f.vertical = 0.2;
        f.horizontal = 0.01;
        assert_eq!(fallback_digit(&f), Some(1));
    }

    #[test]
    fn test_fallback_horizontal_reads_as_zero() {
        let mut f = StrokeFeatures::measure(&vertical_bar()).unwrap();
        f.vertical = 0.0;
        f.horizontal = 0.3;
        assert_eq!(fallback_digit(&f), Some(0));
    }

    #[test]
    fn test_fallback_rejects_mixed_runs() {
        let mut f = StrokeFeatures::measure(&vertical_bar()).unwrap();
        f.vertical = 0.3;
        f.horizontal = 0.3;
        assert_eq!(fallback_digit(&f), None);
    }
}
