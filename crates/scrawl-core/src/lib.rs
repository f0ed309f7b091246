//! scrawl-core - Pixel containers for the scrawl digit recognition pipeline
//!
//! This crate holds the data types the pipeline crates exchange:
//!
//! - [`Canvas`] / [`CanvasMut`] - the RGBA drawing surface (read-only to
//!   the pipeline, `Arc`-shared)
//! - [`GrayImage`] - transient 8-bit luminance grid
//! - [`BitMask`] - transient 0/1 ink mask
//! - [`Bound`] - axis-aligned rectangle for ink bounding boxes and crops
//! - [`DigitImage`] - the normalized square float grid fed to classifiers
//!
//! # Examples
//!
//! ```
//! use scrawl_core::{Canvas, CanvasMut, Rgba};
//!
//! let mut surface = CanvasMut::new(200, 200, Rgba::CHALKBOARD).unwrap();
//! surface.set_pixel(100, 100, Rgba::WHITE).unwrap();
//! let canvas: Canvas = surface.into();
//! assert_eq!(canvas.pixel(100, 100), Some(Rgba::WHITE));
//! ```

mod bound;
mod canvas;
mod digit_image;
mod error;
mod gray;

#[cfg(feature = "image-interop")]
mod interop;

pub use bound::Bound;
pub use canvas::{Canvas, CanvasMut, Rgba};
pub use digit_image::{DIGIT_IMAGE_SIZE, DigitImage, INK_LEVEL};
pub use error::{Error, Result};
pub use gray::{BitMask, GrayImage};
