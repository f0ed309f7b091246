//! Binary thresholding
//!
//! Converts a grayscale image into a 0/1 ink mask. Strokes are lighter
//! than the dark drawing surface, so ink is everything above the
//! threshold. Two policies:
//!
//! - [`ThresholdPolicy::Fixed`] - fast path against the known dark
//!   background fill
//! - [`ThresholdPolicy::Otsu`] - adaptive threshold maximizing
//!   between-class variance over the gray histogram, robust when the
//!   surface color or stroke brightness varies

use scrawl_core::{BitMask, GrayImage};

/// Fixed threshold used when no adaptive pass is wanted
pub const DEFAULT_FIXED_THRESHOLD: u8 = 128;

/// Threshold selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdPolicy {
    /// Gray values strictly above the given level are ink
    Fixed(u8),
    /// Pick the level per image by maximizing between-class variance
    #[default]
    Otsu,
}

/// Compute Otsu's threshold for a grayscale image.
///
/// Evaluates all 256 candidate levels and returns the one maximizing
/// `wB * wF * (mB - mF)^2`, where wB/wF are the background/foreground
/// pixel counts and mB/mF their mean gray values. Pixels at or below the
/// returned level form the background class.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let hist = gray.histogram();
    let total = gray.as_slice().len() as f64;

    let mut sum = 0.0f64;
    for (i, &count) in hist.iter().enumerate() {
        sum += i as f64 * count as f64;
    }

    let mut sum_b = 0.0f64;
    let mut w_b = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut threshold = DEFAULT_FIXED_THRESHOLD;

    for (t, &count) in hist.iter().enumerate() {
        w_b += count as f64;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }

        sum_b += t as f64 * count as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum - sum_b) / w_f;
        let variance = w_b * w_f * (m_b - m_f) * (m_b - m_f);

        if variance > max_variance {
            max_variance = variance;
            threshold = t as u8;
        }
    }

    threshold
}

/// Binarize a grayscale image into an ink mask.
///
/// Gray values strictly above the chosen threshold become ink (the stroke
/// is lighter than the surface).
pub fn binarize(gray: &GrayImage, policy: ThresholdPolicy) -> BitMask {
    let level = match policy {
        ThresholdPolicy::Fixed(t) => t,
        ThresholdPolicy::Otsu => otsu_threshold(gray),
    };

    let mut mask = BitMask::new(gray.width(), gray.height())
        .expect("gray image dimensions are validated at construction");
    for y in 0..gray.height() {
        for x in 0..gray.width() {
            if gray.value(x, y).unwrap_or(0) > level {
                mask.set_ink(x, y, true);
            }
        }
    }
    mask
}
