//! Image handling.
//!
//! This module provides:
//!
//! - The [`Image`] type, an owned RGBA image used as the frame type throughout the crate.
//! - [`Resolution`], the pixel size of an image.
//! - [`Color`], an sRGB color with alpha channel.
//! - Guard-style drawing functions in [`draw`] to quickly visualize landmarks.

pub mod draw;
mod resolution;

#[cfg(test)]
mod tests;

use std::{fmt, path::Path};

use anyhow::Context;
use embedded_graphics::{pixelcolor::raw::RawU32, prelude::PixelColor};
use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::InvalidInput;

pub use resolution::Resolution;

/// An 8-bit sRGB image with alpha channel.
#[derive(Clone)]
pub struct Image {
    pub(crate) buf: RgbaImage,
}

impl Image {
    /// Creates an empty image of a specified size.
    ///
    /// The image will start out black and fully transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: ImageBuffer::new(width, height),
        }
    }

    /// Loads an image from the filesystem.
    ///
    /// The format is derived from the file extension (`jpeg`, `jpg` or `png`).
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let buf = image::open(path)
            .with_context(|| format!("failed to load image from '{}'", path.display()))?
            .to_rgba8();
        Ok(Self { buf })
    }

    /// Saves an image to the file system.
    ///
    /// The format is derived from the file extension (`jpeg`, `jpg` or `png`).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.buf
            .save(path)
            .with_context(|| format!("failed to save image to '{}'", path.display()))
    }

    /// Creates an image from tightly packed 8-bit RGB data.
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> Result<Self, InvalidInput> {
        Self::from_packed(width, height, data, |[r, g, b]| [r, g, b, 255])
    }

    /// Creates an image from tightly packed 8-bit BGR data, as delivered by many camera APIs.
    ///
    /// The channel order is swapped so that the resulting [`Image`] is RGB, which is what landmark
    /// models expect as input.
    pub fn from_bgr8(width: u32, height: u32, data: &[u8]) -> Result<Self, InvalidInput> {
        Self::from_packed(width, height, data, |[b, g, r]| [r, g, b, 255])
    }

    fn from_packed(
        width: u32,
        height: u32,
        data: &[u8],
        convert: impl Fn([u8; 3]) -> [u8; 4],
    ) -> Result<Self, InvalidInput> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(InvalidInput::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let mut buf = RgbaImage::new(width, height);
        for (pix, src) in buf.pixels_mut().zip(data.chunks_exact(3)) {
            pix.0 = convert([src[0], src[1], src[2]]);
        }
        Ok(Self { buf })
    }

    /// Returns the width of this image, in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    /// Returns the height of this image, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Returns the size of this image.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width(), self.height())
    }

    /// Gets the image color at the given pixel coordinates.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this image.
    pub fn get(&self, x: u32, y: u32) -> Color {
        Color(self.buf[(x, y)].0)
    }

    /// Sets the image color at the given pixel coordinates.
    ///
    /// # Panics
    ///
    /// This will panic if `(x, y)` is outside the bounds of this image.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.buf[(x, y)] = Rgba(color.0);
    }

    /// Clears the image, setting every pixel value to `color`.
    pub fn clear(&mut self, color: Color) {
        self.buf.pixels_mut().for_each(|pix| pix.0 = color.0);
    }

    /// Returns the raw RGBA pixel data, row by row.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.buf.as_raw()
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Image", self.resolution())
    }
}

/// An 8-bit sRGB color with alpha channel.
///
/// Colors use non-premultiplied alpha.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct Color(pub(crate) [u8; 4]);

impl Color {
    /// Fully transparent black (all components are 0).
    pub const NULL: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const RED: Self = Self([255, 0, 0, 255]);
    pub const GREEN: Self = Self([0, 255, 0, 255]);
    pub const BLUE: Self = Self([0, 0, 255, 255]);
    pub const MAGENTA: Self = Self([255, 0, 255, 255]);

    #[inline]
    pub fn r(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r(),
            self.g(),
            self.b(),
            self.a(),
        )
    }
}

impl PixelColor for Color {
    type Raw = RawU32;
}
