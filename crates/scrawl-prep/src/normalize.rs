//! Ink bounding box and digit normalization
//!
//! Finds the tight box around the drawn strokes and rescales the cropped
//! region into the fixed square grid classifiers consume: scaled with the
//! aspect ratio preserved so the longer side fits inside
//! `target_size - margin`, then pasted centered into a zero-filled buffer.

use crate::error::{PrepError, PrepResult};
use scrawl_core::{BitMask, Bound, DigitImage};

/// Padding added around the ink bounding box, in source pixels
pub const DEFAULT_BOUND_PADDING: i32 = 2;

/// Empty border kept around the scaled glyph inside the target grid
pub const DEFAULT_MARGIN: usize = 4;

/// Compute the padded bounding box of all ink pixels.
///
/// Returns `None` when the mask holds no ink at all: "nothing drawn" is a
/// missing box, never an empty one. The padded box is clamped to the mask.
pub fn ink_bounds(mask: &BitMask, padding: i32) -> Option<Bound> {
    let mut min_x = mask.width() as i32;
    let mut min_y = mask.height() as i32;
    let mut max_x = -1i32;
    let mut max_y = -1i32;

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.is_ink(x, y) {
                min_x = min_x.min(x as i32);
                min_y = min_y.min(y as i32);
                max_x = max_x.max(x as i32);
                max_y = max_y.max(y as i32);
            }
        }
    }

    if max_x < 0 {
        return None;
    }

    Some(
        Bound::from_min_max(min_x, min_y, max_x, max_y)
            .expand(padding)
            .clamp_to(mask.width(), mask.height()),
    )
}

/// Scale and center the bounded region of a mask into a square grid.
///
/// Nearest-neighbor sampling against the center of each source cell; ink
/// becomes 1.0, background 0.0. The scale factor is
/// `min((target - margin) / w, (target - margin) / h)`, so thin or flat
/// strokes keep their proportions instead of being stretched.
///
/// # Errors
///
/// Returns [`PrepError::InvalidOptions`] if `margin >= target_size`.
pub fn normalize(
    mask: &BitMask,
    bound: &Bound,
    target_size: usize,
    margin: usize,
) -> PrepResult<DigitImage> {
    if margin >= target_size {
        return Err(PrepError::InvalidOptions(format!(
            "margin {margin} must be smaller than target size {target_size}"
        )));
    }

    let fit = (target_size - margin) as f32;
    let scale = (fit / bound.w as f32).min(fit / bound.h as f32);

    let scaled_w = ((bound.w as f32 * scale).round() as usize).clamp(1, target_size);
    let scaled_h = ((bound.h as f32 * scale).round() as usize).clamp(1, target_size);
    let offset_x = (target_size - scaled_w) / 2;
    let offset_y = (target_size - scaled_h) / 2;

    let mut out = DigitImage::new(target_size)?;
    for ty in 0..scaled_h {
        for tx in 0..scaled_w {
            // Each target cell samples the source pixel under its center,
            // mapped per axis so rounding of the scaled size cannot drift
            // the sampling grid off the bound
            let src_x = (bound.x
                + ((tx as f32 + 0.5) * bound.w as f32 / scaled_w as f32) as i32)
                .min(bound.right() - 1);
            let src_y = (bound.y
                + ((ty as f32 + 0.5) * bound.h as f32 / scaled_h as f32) as i32)
                .min(bound.bottom() - 1);
            if src_x >= 0 && src_y >= 0 && mask.is_ink(src_x as u32, src_y as u32) {
                out.set_value(tx + offset_x, ty + offset_y, 1.0);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with_rect(w: u32, h: u32, b: Bound) -> BitMask {
        let mut mask = BitMask::new(w, h).unwrap();
        for y in b.y..b.bottom() {
            for x in b.x..b.right() {
                mask.set_ink(x as u32, y as u32, true);
            }
        }
        mask
    }

    #[test]
    fn test_ink_bounds_empty() {
        let mask = BitMask::new(20, 20).unwrap();
        assert_eq!(ink_bounds(&mask, 2), None);
    }

    #[test]
    fn test_ink_bounds_single_pixel() {
        let mut mask = BitMask::new(20, 20).unwrap();
        mask.set_ink(10, 10, true);
        let b = ink_bounds(&mask, 2).unwrap();
        assert_eq!(b, Bound::new_unchecked(8, 8, 5, 5));
    }

    #[test]
    fn test_ink_bounds_clamps_at_edges() {
        let mut mask = BitMask::new(20, 20).unwrap();
        mask.set_ink(0, 0, true);
        mask.set_ink(19, 19, true);
        let b = ink_bounds(&mask, 3).unwrap();
        assert_eq!(b, Bound::new_unchecked(0, 0, 20, 20));
    }

    #[test]
    fn test_normalize_square_fills_fit_region() {
        let mask = mask_with_rect(10, 10, Bound::new_unchecked(2, 2, 4, 4));
        let bound = Bound::new_unchecked(2, 2, 4, 4);
        let img = normalize(&mask, &bound, 28, 4).unwrap();

        assert_eq!(img.size(), 28);
        // 4x4 scales by 6 into a centered 24x24 block
        assert!(img.is_ink(2, 2));
        assert!(img.is_ink(25, 25));
        assert!(!img.is_ink(1, 1));
        assert!(!img.is_ink(26, 26));
        assert_eq!(img.ink_count(), 24 * 24);
    }

    #[test]
    fn test_normalize_preserves_aspect_ratio() {
        // 2x8 region: height drives the scale, width stays narrow
        let mask = mask_with_rect(20, 20, Bound::new_unchecked(5, 5, 2, 8));
        let bound = Bound::new_unchecked(5, 5, 2, 8);
        let img = normalize(&mask, &bound, 28, 4).unwrap();

        // scale = min(24/2, 24/8) = 3 -> 6x24 glyph centered at x=11
        let mut min_x = usize::MAX;
        let mut max_x = 0;
        let mut min_y = usize::MAX;
        let mut max_y = 0;
        for y in 0..28 {
            for x in 0..28 {
                if img.is_ink(x, y) {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }
        assert_eq!((max_x - min_x + 1, max_y - min_y + 1), (6, 24));
        assert_eq!(min_x, 11);
        assert_eq!(min_y, 2);
    }

    #[test]
    fn test_normalize_rejects_bad_margin() {
        let mask = BitMask::new(4, 4).unwrap();
        let bound = Bound::new_unchecked(0, 0, 4, 4);
        assert!(normalize(&mask, &bound, 28, 28).is_err());
    }

    #[test]
    fn test_normalize_upscales_small_input() {
        // A tiny 2x2 blob still fills the fit region
        let mask = mask_with_rect(10, 10, Bound::new_unchecked(4, 4, 2, 2));
        let bound = Bound::new_unchecked(4, 4, 2, 2);
        let img = normalize(&mask, &bound, 28, 4).unwrap();
        assert_eq!(img.ink_count(), 24 * 24);
    }
}
