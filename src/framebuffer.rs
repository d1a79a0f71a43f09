//! Pixel sinks the rasterizers write into.
//!
//! The engine only ever talks to a surface through [`PixelSink`]. Two
//! in-memory implementations are provided: [`Framebuffer`] for RGBA pixels
//! and [`GrayFramebuffer`] for single-channel intensity images.

use crate::color::{Gray, Rgba};
use crate::error::{Error, Result};
use crate::verification_specs::pixel_contracts;

/// A raster surface addressed by `(x, y)` with `0 <= x < width`, `0 <= y < height`.
pub trait PixelSink {
    /// Pixel format written by the rasterizers.
    type Color: Copy;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Color at a pixel, `None` when out of bounds.
    fn get_pixel(&self, x: u32, y: u32) -> Option<Self::Color>;

    /// Overwrite a pixel. Out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: Self::Color);
}

/// Write a pixel at a signed coordinate, silently dropping it when it falls
/// outside the surface.
#[inline]
pub fn plot<P: PixelSink + ?Sized>(sink: &mut P, x: i32, y: i32, color: P::Color) {
    if pixel_contracts::in_bounds(x, y, sink.width(), sink.height()) {
        sink.set_pixel(x as u32, y as u32, color);
    }
}

/// RGBA surface, four bytes per pixel, rows tightly packed.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a `width` x `height` surface of transparent black.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] when either side is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterkit::framebuffer::{Framebuffer, PixelSink};
    ///
    /// let fb = Framebuffer::new(320, 200)?;
    /// assert_eq!((fb.width(), fb.height()), (320, 200));
    /// # Ok::<(), rasterkit::Error>(())
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    /// Raw RGBA bytes in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Composite `color` over the pixel at `(x, y)`. Out-of-bounds writes
    /// are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(below) = self.get_pixel(x, y) {
            self.set_pixel(x, y, color.over(below));
        }
    }

    /// Composite every pixel of `layer` over this surface.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] carrying the layer's size when it does
    /// not match this surface. The surface is left untouched.
    pub fn blend_over(&mut self, layer: &Framebuffer) -> Result<()> {
        if (self.width, self.height) != (layer.width, layer.height) {
            return Err(Error::InvalidDimensions {
                width: layer.width,
                height: layer.height,
            });
        }

        for (dst, src) in self.data.chunks_exact_mut(4).zip(layer.data.chunks_exact(4)) {
            let mut front = [0; 4];
            let mut back = [0; 4];
            front.copy_from_slice(src);
            back.copy_from_slice(dst);
            let out = Rgba::from_array(front).over(Rgba::from_array(back));
            dst.copy_from_slice(&out.to_array());
        }
        Ok(())
    }

    /// Count pixels exactly equal to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.data.chunks_exact(4).filter(|px| *px == rgba).count()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

impl PixelSink for Framebuffer {
    type Color = Rgba;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[at..at + 4]);
        Some(Rgba::from_array(rgba))
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let at = self.offset(x, y);
        self.data[at..at + 4].copy_from_slice(&color.to_array());
    }
}

/// Single-channel intensity image, one byte per pixel, tightly packed.
#[derive(Debug, Clone)]
pub struct GrayFramebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayFramebuffer {
    /// Create a new image cleared to black.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        })
    }

    /// Raw intensities in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Set every pixel to `color`.
    pub fn clear(&mut self, color: Gray) {
        self.pixels.fill(color.0);
    }

    /// Count pixels exactly equal to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Gray) -> usize {
        self.pixels.iter().filter(|&&v| v == color.0).count()
    }
}

impl PixelSink for GrayFramebuffer {
    type Color = Gray;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Gray> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Gray(self.pixels[(y as usize) * (self.width as usize) + x as usize]))
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Gray) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(y as usize) * (self.width as usize) + x as usize] = color.0;
    }
}
