//! Digit crop extraction
//!
//! Splits a canvas that may contain several digits into per-digit
//! sub-canvases, ordered left to right. Each connected ink component
//! above the noise floor becomes one crop; the crop keeps the source
//! canvas's background color so downstream preprocessing sees the same
//! contrast it would on the full surface.
//!
//! Touching or overlapping glyphs merge into a single component and are
//! not split apart.

use crate::conncomp::{Connectivity, find_components};
use crate::error::{SegmentError, SegmentResult};
use scrawl_core::{Bound, Canvas};
use scrawl_prep::{DEFAULT_FIXED_THRESHOLD, ThresholdPolicy, binarize, grayscale};

/// Components with fewer ink pixels than this are discarded as noise
pub const MIN_COMPONENT_PIXELS: usize = 20;

/// Padding added around each component when cropping, in source pixels
pub const DEFAULT_CROP_PADDING: i32 = 5;

/// Options for digit segmentation
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Minimum ink pixel count for a component to count as a digit
    pub min_pixels: usize,
    /// Padding added around each component crop
    pub padding: i32,
    /// Connectivity used when growing components
    pub connectivity: Connectivity,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            min_pixels: MIN_COMPONENT_PIXELS,
            padding: DEFAULT_CROP_PADDING,
            connectivity: Connectivity::FourWay,
        }
    }
}

/// One digit's sub-canvas, cut out of the source drawing
#[derive(Debug, Clone)]
pub struct DigitCrop {
    /// The cropped surface, background-filled like the source
    pub canvas: Canvas,
    /// The cropped region in source-canvas coordinates (padding included)
    pub region: Bound,
    /// Ink pixel count of the component this crop came from
    pub pixel_count: usize,
}

impl DigitCrop {
    /// Horizontal offset of the crop in the source canvas.
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.region.x as u32
    }

    /// Vertical offset of the crop in the source canvas.
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.region.y as u32
    }
}

/// Segment a canvas into per-digit crops, ordered left to right.
///
/// Binarizes with the fast fixed threshold (the known dark surface makes
/// an adaptive pass unnecessary here), labels connected components, drops
/// those below `min_pixels`, and crops each survivor with padding. An
/// empty result means the caller should treat the whole canvas as a
/// single digit.
///
/// # Errors
///
/// Returns [`SegmentError::InvalidOptions`] for a negative padding.
pub fn segment(canvas: &Canvas, options: &SegmentOptions) -> SegmentResult<Vec<DigitCrop>> {
    if options.padding < 0 {
        return Err(SegmentError::InvalidOptions(format!(
            "padding must be non-negative, got {}",
            options.padding
        )));
    }

    let gray = grayscale(canvas);
    let mask = binarize(&gray, ThresholdPolicy::Fixed(DEFAULT_FIXED_THRESHOLD));

    let mut components = find_components(&mask, options.connectivity);
    components.retain(|c| c.pixel_count >= options.min_pixels);

    // Left-to-right reading order by horizontal center
    components.sort_by_key(|c| c.bounds.center_x());

    let mut crops = Vec::with_capacity(components.len());
    for component in components {
        let region = component
            .bounds
            .expand(options.padding)
            .clamp_to(canvas.width(), canvas.height());
        let cropped = canvas.crop(&region)?;
        crops.push(DigitCrop {
            canvas: cropped,
            region,
            pixel_count: component.pixel_count,
        });
    }

    Ok(crops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrawl_core::{CanvasMut, Rgba};

    fn paint_rect(cm: &mut CanvasMut, b: Bound, color: Rgba) {
        for y in b.y..b.bottom() {
            for x in b.x..b.right() {
                cm.set_pixel(x as u32, y as u32, color).unwrap();
            }
        }
    }

    #[test]
    fn test_empty_canvas_yields_no_crops() {
        let canvas = Canvas::new(100, 60, Rgba::CHALKBOARD).unwrap();
        let crops = segment(&canvas, &SegmentOptions::default()).unwrap();
        assert!(crops.is_empty());
    }

    #[test]
    fn test_two_blobs_two_ordered_crops() {
        let mut cm = CanvasMut::new(100, 60, Rgba::CHALKBOARD).unwrap();
        // Right blob first in scan order (higher up) to prove the sort
        paint_rect(&mut cm, Bound::new_unchecked(60, 5, 8, 8), Rgba::WHITE);
        paint_rect(&mut cm, Bound::new_unchecked(10, 20, 8, 8), Rgba::WHITE);
        let crops = segment(&cm.into(), &SegmentOptions::default()).unwrap();

        assert_eq!(crops.len(), 2);
        assert!(crops[0].origin_x() < crops[1].origin_x());
        assert!(!crops[0].region.overlaps(&crops[1].region));
    }

    #[test]
    fn test_noise_component_filtered() {
        let mut cm = CanvasMut::new(100, 60, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(10, 10, 8, 8), Rgba::WHITE);
        // 3x3 = 9 pixels, below the 20 pixel noise floor
        paint_rect(&mut cm, Bound::new_unchecked(50, 10, 3, 3), Rgba::WHITE);
        let crops = segment(&cm.into(), &SegmentOptions::default()).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].pixel_count, 64);
    }

    #[test]
    fn test_crop_keeps_background_and_strokes() {
        let mut cm = CanvasMut::new(100, 60, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(40, 20, 10, 10), Rgba::WHITE);
        let crops = segment(&cm.into(), &SegmentOptions::default()).unwrap();

        assert_eq!(crops.len(), 1);
        let crop = &crops[0];
        assert_eq!(crop.canvas.background(), Rgba::CHALKBOARD);
        assert_eq!(crop.region, Bound::new_unchecked(35, 15, 20, 20));
        // Corner is padding (background), center is stroke
        assert_eq!(crop.canvas.pixel(0, 0), Some(Rgba::CHALKBOARD));
        assert_eq!(crop.canvas.pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_crop_clamped_at_canvas_edge() {
        let mut cm = CanvasMut::new(100, 60, Rgba::CHALKBOARD).unwrap();
        paint_rect(&mut cm, Bound::new_unchecked(0, 0, 8, 8), Rgba::WHITE);
        let crops = segment(&cm.into(), &SegmentOptions::default()).unwrap();
        assert_eq!(crops.len(), 1);
        assert_eq!(crops[0].region, Bound::new_unchecked(0, 0, 13, 13));
    }

    #[test]
    fn test_negative_padding_rejected() {
        let canvas = Canvas::new(10, 10, Rgba::CHALKBOARD).unwrap();
        let options = SegmentOptions {
            padding: -2,
            ..Default::default()
        };
        assert!(segment(&canvas, &options).is_err());
    }
}
