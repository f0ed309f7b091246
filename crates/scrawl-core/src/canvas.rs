//! Canvas - The drawing surface container
//!
//! A `Canvas` is an RGBA pixel grid with a known background fill color,
//! matching what a drawing widget hands to the recognition pipeline. The
//! pipeline only ever reads from it.
//!
//! # Ownership model
//!
//! `Canvas` uses `Arc` for efficient cloning (shared ownership). To write
//! pixels, convert to [`CanvasMut`] via [`Canvas::try_into_mut`] or
//! [`Canvas::to_mut`], then convert back with `Into<Canvas>`. This keeps
//! the read-only contract enforceable at compile time while still letting
//! callers (drawing widgets, crop extraction, tests) build surfaces.

use crate::bound::Bound;
use crate::error::{Error, Result};
use std::sync::Arc;

/// An RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create an opaque color
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The dark chalkboard green the drawing widget fills its surface with
    pub const CHALKBOARD: Rgba = Rgba::opaque(0x1a, 0x3a, 0x1a);

    /// Opaque white
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    /// Opaque black
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
}

/// Bytes per RGBA pixel
const BYTES_PER_PIXEL: usize = 4;

/// Internal canvas data
#[derive(Debug)]
struct CanvasData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Background fill color of the drawing surface
    background: Rgba,
    /// RGBA pixel data, row-major, 4 bytes per pixel
    data: Vec<u8>,
}

impl CanvasData {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

/// Canvas - RGBA drawing surface
///
/// # Examples
///
/// ```
/// use scrawl_core::{Canvas, Rgba};
///
/// let canvas = Canvas::new(200, 200, Rgba::CHALKBOARD).unwrap();
/// assert_eq!(canvas.width(), 200);
/// assert_eq!(canvas.pixel(0, 0), Some(Rgba::CHALKBOARD));
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    inner: Arc<CanvasData>,
}

impl Canvas {
    /// Create a new canvas filled with the background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        CanvasMut::new(width, height, background).map(Into::into)
    }

    /// Create a canvas from a raw RGBA8 pixel buffer.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes in row-major
    /// order. `background` declares the surface's known base fill color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSizeMismatch`] if the buffer length is wrong.
    pub fn from_rgba8(width: u32, height: u32, background: Rgba, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Canvas {
            inner: Arc::new(CanvasData {
                width,
                height,
                background,
                data,
            }),
        })
    }

    /// Get the canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the background fill color.
    #[inline]
    pub fn background(&self) -> Rgba {
        self.inner.background
    }

    /// Get raw access to the RGBA pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let i = self.inner.offset(x, y);
        let d = &self.inner.data;
        Some(Rgba {
            r: d[i],
            g: d[i + 1],
            b: d[i + 2],
            a: d[i + 3],
        })
    }

    /// Get the number of strong references to this canvas.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Copy a rectangular region into a new canvas.
    ///
    /// The bound is clamped to the canvas first. Pixels come from this
    /// canvas; the new canvas keeps the same background color so downstream
    /// processing sees consistent contrast.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the clamped bound is empty.
    pub fn crop(&self, bound: &Bound) -> Result<Canvas> {
        let b = bound.clamp_to(self.inner.width, self.inner.height);
        if b.is_empty() {
            return Err(Error::InvalidDimension {
                width: b.w as u32,
                height: b.h as u32,
            });
        }
        let mut out = CanvasMut::new(b.w as u32, b.h as u32, self.inner.background)?;
        for dy in 0..b.h as u32 {
            let src = self.inner.offset(b.x as u32, b.y as u32 + dy);
            let len = b.w as usize * BYTES_PER_PIXEL;
            let dst = out.inner.offset(0, dy);
            out.inner.data[dst..dst + len].copy_from_slice(&self.inner.data[src..src + len]);
        }
        Ok(out.into())
    }

    /// Try to get mutable access to the pixel data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<CanvasMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(CanvasMut { inner: data }),
            Err(arc) => Err(Canvas { inner: arc }),
        }
    }

    /// Create a mutable copy of this canvas.
    pub fn to_mut(&self) -> CanvasMut {
        CanvasMut {
            inner: CanvasData {
                width: self.inner.width,
                height: self.inner.height,
                background: self.inner.background,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable canvas
///
/// Allows writing pixels. Convert back to an immutable [`Canvas`] with
/// `Into<Canvas>` before handing it to the pipeline.
#[derive(Debug)]
pub struct CanvasMut {
    inner: CanvasData,
}

impl CanvasMut {
    /// Create a new mutable canvas filled with the background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * BYTES_PER_PIXEL);
        for _ in 0..count {
            data.extend_from_slice(&[background.r, background.g, background.b, background.a]);
        }
        Ok(CanvasMut {
            inner: CanvasData {
                width,
                height,
                background,
                data,
            },
        })
    }

    /// Get the canvas width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the canvas height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the background fill color.
    #[inline]
    pub fn background(&self) -> Rgba {
        self.inner.background
    }

    /// Get the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        let i = self.inner.offset(x, y);
        let d = &self.inner.data;
        Some(Rgba {
            r: d[i],
            g: d[i + 1],
            b: d[i + 2],
            a: d[i + 3],
        })
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are outside
    /// the canvas.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y as usize * self.inner.width as usize + x as usize,
                len: self.inner.width as usize * self.inner.height as usize,
            });
        }
        let i = self.inner.offset(x, y);
        self.inner.data[i] = color.r;
        self.inner.data[i + 1] = color.g;
        self.inner.data[i + 2] = color.b;
        self.inner.data[i + 3] = color.a;
        Ok(())
    }

    /// Fill a rectangular region, clamped to the canvas.
    pub fn fill_rect(&mut self, bound: &Bound, color: Rgba) {
        let b = bound.clamp_to(self.inner.width, self.inner.height);
        for y in b.y as u32..b.bottom() as u32 {
            for x in b.x as u32..b.right() as u32 {
                let i = self.inner.offset(x, y);
                self.inner.data[i] = color.r;
                self.inner.data[i + 1] = color.g;
                self.inner.data[i + 2] = color.b;
                self.inner.data[i + 3] = color.a;
            }
        }
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        let bg = self.inner.background;
        for chunk in self.inner.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&[bg.r, bg.g, bg.b, bg.a]);
        }
    }
}

impl From<CanvasMut> for Canvas {
    fn from(canvas_mut: CanvasMut) -> Self {
        Canvas {
            inner: Arc::new(canvas_mut.inner),
        }
    }
}
