//! Pixel buffer types

use crate::image_pipeline::common::error::{PipelineError, Result};

/// One 8-bit-per-channel pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }
}

/// Decoded image in row-major order.
///
/// Always holds exactly `width * height` pixels and both dimensions are
/// non-zero; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, data: Vec<Rgba>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidDimensions(width, height));
        }
        let expected = width
            .checked_mul(height)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(PipelineError::DecodeError(format!(
                "pixel count mismatch: expected {} for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Buffer where every pixel has the same value.
    pub fn filled(width: usize, height: usize, pixel: Rgba) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .ok_or(PipelineError::InvalidDimensions(width, height))?;
        Self::new(width, height, vec![pixel; len])
    }

    /// Builds a buffer from tightly packed 8-bit RGB triplets, alpha set opaque.
    pub fn from_rgb8(width: usize, height: usize, rgb: &[u8]) -> Result<Self> {
        if rgb.len() % 3 != 0 {
            return Err(PipelineError::DecodeError(format!(
                "RGB byte length {} is not a multiple of 3",
                rgb.len()
            )));
        }
        let data = rgb
            .chunks_exact(3)
            .map(|px| Rgba::opaque(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, data)
    }

    /// Builds a buffer from tightly packed 8-bit RGBA quadruplets.
    pub fn from_rgba8(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        if rgba.len() % 4 != 0 {
            return Err(PipelineError::DecodeError(format!(
                "RGBA byte length {} is not a multiple of 4",
                rgba.len()
            )));
        }
        let data = rgba
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// New buffer of the same size with `f` applied to every pixel.
    pub fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: FnMut(Rgba) -> Rgba,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Packed RGB bytes, alpha dropped. Used by encoders without alpha support.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|px| [px.r, px.g, px.b]).collect()
    }
}
