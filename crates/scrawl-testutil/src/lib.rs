//! scrawl-testutil - Shared fixtures for the pipeline test suites
//!
//! Paints synthetic drawings the way the real widget would: chalk-colored
//! strokes on the dark board fill. Glyph shapes are rough polyline
//! approximations of a child's printing - good enough to exercise the
//! pipeline, not a font.

use rand::{RngExt, SeedableRng, rngs::StdRng};
use scrawl_core::{Bound, Canvas, CanvasMut, Rgba};

/// The beige chalk color the drawing widget strokes with
pub const CHALK: Rgba = Rgba::opaque(0xf5, 0xf5, 0xdc);

/// Stroke thickness matching the widget's pen
pub const PEN_WIDTH: u32 = 6;

/// A fresh board-colored canvas.
pub fn board(width: u32, height: u32) -> CanvasMut {
    CanvasMut::new(width, height, Rgba::CHALKBOARD).expect("test canvas dimensions are positive")
}

/// Draw a straight chalk stroke of the given thickness.
pub fn stroke_line(cm: &mut CanvasMut, from: (i32, i32), to: (i32, i32), thickness: u32) {
    let (x0, y0) = from;
    let (x1, y1) = to;
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1) * 2;
    let half = thickness as i32 / 2;

    for step in 0..=steps {
        let t = step as f32 / steps as f32;
        let cx = (x0 as f32 + t * (x1 - x0) as f32).round() as i32;
        let cy = (y0 as f32 + t * (y1 - y0) as f32).round() as i32;
        for dy in -half..=half {
            for dx in -half..=half {
                let px = cx + dx;
                let py = cy + dy;
                if px >= 0 && py >= 0 {
                    let _ = cm.set_pixel(px as u32, py as u32, CHALK);
                }
            }
        }
    }
}

/// Polyline glyphs in a unit box, one or more strokes per digit
fn glyph_strokes(digit: u8) -> &'static [&'static [(f32, f32)]] {
    match digit {
        0 => &[&[
            (0.5, 0.05),
            (0.85, 0.3),
            (0.85, 0.7),
            (0.5, 0.95),
            (0.15, 0.7),
            (0.15, 0.3),
            (0.5, 0.05),
        ]],
        1 => &[&[(0.5, 0.05), (0.5, 0.95)]],
        2 => &[&[
            (0.15, 0.25),
            (0.3, 0.05),
            (0.7, 0.05),
            (0.85, 0.25),
            (0.8, 0.45),
            (0.15, 0.95),
            (0.85, 0.95),
        ]],
        3 => &[&[
            (0.15, 0.1),
            (0.8, 0.1),
            (0.45, 0.45),
            (0.8, 0.65),
            (0.75, 0.85),
            (0.45, 0.95),
            (0.15, 0.85),
        ]],
        4 => &[&[(0.7, 0.95), (0.7, 0.05), (0.15, 0.6), (0.85, 0.6)]],
        5 => &[&[
            (0.85, 0.05),
            (0.2, 0.05),
            (0.2, 0.45),
            (0.7, 0.5),
            (0.85, 0.7),
            (0.7, 0.92),
            (0.2, 0.9),
        ]],
        6 => &[&[
            (0.7, 0.05),
            (0.35, 0.35),
            (0.2, 0.7),
            (0.4, 0.95),
            (0.7, 0.85),
            (0.75, 0.6),
            (0.45, 0.55),
            (0.25, 0.7),
        ]],
        7 => &[&[(0.15, 0.05), (0.85, 0.05), (0.45, 0.95)]],
        8 => &[&[
            (0.5, 0.5),
            (0.25, 0.3),
            (0.5, 0.05),
            (0.75, 0.3),
            (0.5, 0.5),
            (0.25, 0.72),
            (0.5, 0.95),
            (0.75, 0.72),
            (0.5, 0.5),
        ]],
        9 => &[&[
            (0.8, 0.35),
            (0.6, 0.5),
            (0.3, 0.45),
            (0.25, 0.2),
            (0.5, 0.05),
            (0.75, 0.15),
            (0.8, 0.35),
            (0.75, 0.95),
        ]],
        _ => panic!("digit out of range: {digit}"),
    }
}

/// Draw a digit glyph into a region of the canvas.
///
/// # Panics
///
/// Panics if `digit` is not 0 through 9.
pub fn draw_digit(cm: &mut CanvasMut, digit: u8, region: Bound) {
    for stroke in glyph_strokes(digit) {
        for pair in stroke.windows(2) {
            let (ux0, uy0) = pair[0];
            let (ux1, uy1) = pair[1];
            let from = (
                region.x + (ux0 * region.w as f32) as i32,
                region.y + (uy0 * region.h as f32) as i32,
            );
            let to = (
                region.x + (ux1 * region.w as f32) as i32,
                region.y + (uy1 * region.h as f32) as i32,
            );
            stroke_line(cm, from, to, PEN_WIDTH);
        }
    }
}

/// A 200x200 canvas with one digit glyph drawn in the middle.
pub fn digit_canvas(digit: u8) -> Canvas {
    let mut cm = board(200, 200);
    draw_digit(&mut cm, digit, Bound::new_unchecked(45, 35, 110, 130));
    cm.into()
}

/// A wide canvas with several digits drawn left to right, well separated.
pub fn number_canvas(digits: &[u8]) -> Canvas {
    let width = 60 + digits.len() as u32 * 140;
    let mut cm = board(width, 200);
    for (i, &digit) in digits.iter().enumerate() {
        let region = Bound::new_unchecked(40 + i as i32 * 140, 35, 100, 130);
        draw_digit(&mut cm, digit, region);
    }
    cm.into()
}

/// Scatter isolated single-pixel chalk specks across the canvas.
///
/// Each speck lands where everything within two pixels is still the
/// board color, so specks stay isolated from strokes and from each other
/// and a despeckling pass can remove every one of them.
pub fn sprinkle_specks(cm: &mut CanvasMut, seed: u64, count: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let background = cm.background();
    let mut placed = 0;
    let mut attempts = 0;

    while placed < count && attempts < count * 50 {
        attempts += 1;
        let x = rng.random_range(2..cm.width().saturating_sub(2));
        let y = rng.random_range(2..cm.height().saturating_sub(2));

        let clear = (-2i32..=2).all(|dy| {
            (-2i32..=2).all(|dx| {
                cm.pixel((x as i32 + dx) as u32, (y as i32 + dy) as u32) == Some(background)
            })
        });
        if clear {
            cm.set_pixel(x, y, CHALK).expect("speck is inside the canvas");
            placed += 1;
        }
    }
}
