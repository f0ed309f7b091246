//! Conversions between [`Canvas`] and the `image` crate
//!
//! Enabled with the `image-interop` feature. Handy for loading captured
//! drawings from disk in tools and test fixtures.

use crate::canvas::{Canvas, Rgba};
use crate::error::Result;

impl Canvas {
    /// Build a canvas from an `image::RgbaImage`.
    ///
    /// `background` declares the surface's known base fill color; the
    /// pixel data is taken as-is.
    pub fn from_image(img: &image::RgbaImage, background: Rgba) -> Result<Canvas> {
        Canvas::from_rgba8(img.width(), img.height(), background, img.as_raw().clone())
    }

    /// Copy this canvas into an `image::RgbaImage`.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width(), self.height(), self.data().to_vec())
            .expect("canvas buffer length is validated at construction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_roundtrip() {
        let mut cm = crate::CanvasMut::new(5, 4, Rgba::CHALKBOARD).unwrap();
        cm.set_pixel(2, 1, Rgba::WHITE).unwrap();
        let canvas: Canvas = cm.into();

        let img = canvas.to_image();
        assert_eq!(img.dimensions(), (5, 4));

        let back = Canvas::from_image(&img, Rgba::CHALKBOARD).unwrap();
        assert_eq!(back.pixel(2, 1), Some(Rgba::WHITE));
        assert_eq!(back.pixel(0, 0), Some(Rgba::CHALKBOARD));
    }
}
