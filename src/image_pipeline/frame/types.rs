//! Raw frame data types

use std::fmt;

use tracing::trace;

/// Device format code for three-plane YUV 4:2:0.
pub const FORMAT_CODE_YUV_420_888: i32 = 0x23;
/// Device format code for a compressed JPEG capture.
pub const FORMAT_CODE_JPEG: i32 = 0x100;

/// Pixel layout tag declared by the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Full-resolution luma plane plus two half-resolution chroma planes
    PlanarYuv420,
    /// A single plane holding a complete JPEG file
    EncodedJpeg,
    /// Any other device format; kept so it can be rejected at decode time
    Unknown(i32),
}

impl PixelLayout {
    pub fn from_format_code(code: i32) -> Self {
        match code {
            FORMAT_CODE_YUV_420_888 => PixelLayout::PlanarYuv420,
            FORMAT_CODE_JPEG => PixelLayout::EncodedJpeg,
            other => PixelLayout::Unknown(other),
        }
    }
}

/// Sensor sub-region to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl CropRect {
    pub fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self { left, top, width, height }
    }

    /// Crop covering a full `width` x `height` frame.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// One plane of sample data.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Backing bytes
    pub data: Vec<u8>,
    /// Bytes between the starts of consecutive rows (may exceed the row width)
    pub row_stride: usize,
    /// Bytes between horizontally adjacent samples (2 when interleaved)
    pub pixel_stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Self {
        Self { data, row_stride, pixel_stride }
    }
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// A raw capture as handed over by the device.
///
/// The frame owns its planes. Dropping it releases them and runs the optional
/// release hook, so a frame is returned to its producer exactly once no matter
/// how the consumer exits.
pub struct RawFrame {
    layout: PixelLayout,
    crop: CropRect,
    planes: Vec<Plane>,
    on_release: Option<ReleaseHook>,
}

impl RawFrame {
    pub fn new(layout: PixelLayout, crop: CropRect, planes: Vec<Plane>) -> Self {
        Self {
            layout,
            crop,
            planes,
            on_release: None,
        }
    }

    /// Wraps a complete JPEG file as a single-plane frame.
    pub fn jpeg(bytes: Vec<u8>, width: usize, height: usize) -> Self {
        let len = bytes.len();
        Self::new(
            PixelLayout::EncodedJpeg,
            CropRect::full(width, height),
            vec![Plane::new(bytes, len, 1)],
        )
    }

    /// Registers a callback run when the frame is released.
    pub fn with_release_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_release = Some(Box::new(hook));
        self
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFrame")
            .field("layout", &self.layout)
            .field("crop", &self.crop)
            .field("planes", &self.planes.len())
            .finish()
    }
}

impl Drop for RawFrame {
    fn drop(&mut self) {
        trace!(layout = ?self.layout, "releasing raw frame");
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}
