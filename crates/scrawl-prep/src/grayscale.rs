//! Grayscale conversion
//!
//! Converts an RGBA canvas to an 8-bit luminance grid using the standard
//! perceptual weights, so stroke intensity is judged the way a viewer sees
//! it regardless of the chalk color.

use scrawl_core::{Canvas, GrayImage};

/// Perceptual luminance weight for the red channel
pub const LUMA_R: f32 = 0.299;
/// Perceptual luminance weight for the green channel
pub const LUMA_G: f32 = 0.587;
/// Perceptual luminance weight for the blue channel
pub const LUMA_B: f32 = 0.114;

/// Convert a canvas to grayscale.
///
/// Formula: gray = 0.299*R + 0.587*G + 0.114*B, rounded to the nearest
/// integer. Alpha is ignored; the drawing surface is opaque.
pub fn grayscale(canvas: &Canvas) -> GrayImage {
    let data = canvas.data();
    let mut gray = Vec::with_capacity(data.len() / 4);
    for px in data.chunks_exact(4) {
        let v = LUMA_R * px[0] as f32 + LUMA_G * px[1] as f32 + LUMA_B * px[2] as f32;
        gray.push(v.round() as u8);
    }
    GrayImage::from_raw(canvas.width(), canvas.height(), gray)
        .expect("canvas dimensions are validated at construction")
}
