//! Speck removal
//!
//! Drops isolated ink pixels left behind by sensor or compression noise.
//! An ink pixel survives only if at least [`MIN_NEIGHBOR_SUPPORT`] of the
//! set {itself, its four 4-neighbors} are ink, which removes lone specks
//! while leaving deliberate thin strokes intact. Border rows and columns
//! pass through unchanged.

use scrawl_core::BitMask;

/// Minimum ink count among a pixel and its 4-neighbors for the pixel to
/// survive. Two means "itself plus at least one neighbor"; anything
/// stricter starts eating single-pixel-wide strokes.
pub const MIN_NEIGHBOR_SUPPORT: u32 = 2;

/// Remove isolated ink specks from a mask.
pub fn despeckle(mask: &BitMask) -> BitMask {
    let width = mask.width();
    let height = mask.height();
    let mut out = mask.clone();

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            if !mask.is_ink(x, y) {
                continue;
            }
            let support = [
                (x, y),
                (x, y - 1),
                (x, y + 1),
                (x - 1, y),
                (x + 1, y),
            ]
            .iter()
            .filter(|&&(nx, ny)| mask.is_ink(nx, ny))
            .count() as u32;

            if support < MIN_NEIGHBOR_SUPPORT {
                out.set_ink(x, y, false);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_speck_removed() {
        let mut mask = BitMask::new(9, 9).unwrap();
        mask.set_ink(4, 4, true);
        let cleaned = despeckle(&mask);
        assert_eq!(cleaned.ink_count(), 0);
    }

    #[test]
    fn test_thin_stroke_survives() {
        let mut mask = BitMask::new(9, 9).unwrap();
        for y in 1..8 {
            mask.set_ink(4, y, true);
        }
        let cleaned = despeckle(&mask);
        assert_eq!(cleaned.ink_count(), 7);
    }

    #[test]
    fn test_pair_survives() {
        // Two adjacent pixels support each other
        let mut mask = BitMask::new(9, 9).unwrap();
        mask.set_ink(3, 3, true);
        mask.set_ink(4, 3, true);
        let cleaned = despeckle(&mask);
        assert_eq!(cleaned.ink_count(), 2);
    }

    #[test]
    fn test_diagonal_neighbors_do_not_support() {
        // 4-connectivity only: a diagonal pair is two isolated specks
        let mut mask = BitMask::new(9, 9).unwrap();
        mask.set_ink(3, 3, true);
        mask.set_ink(4, 4, true);
        let cleaned = despeckle(&mask);
        assert_eq!(cleaned.ink_count(), 0);
    }

    #[test]
    fn test_border_pixels_untouched() {
        let mut mask = BitMask::new(9, 9).unwrap();
        mask.set_ink(0, 0, true);
        let cleaned = despeckle(&mask);
        assert!(cleaned.is_ink(0, 0));
    }
}
