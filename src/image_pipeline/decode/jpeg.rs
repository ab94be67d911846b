use image::ImageFormat;
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::types::Plane;
use crate::image_pipeline::pixel::types::PixelBuffer;

/// Decodes the single plane of a JPEG frame. The crop rectangle is not applied;
/// the device has already cropped the compressed image.
pub(crate) fn decode_jpeg(planes: &[Plane]) -> Result<PixelBuffer> {
    let plane = planes
        .first()
        .ok_or_else(|| PipelineError::DecodeError("JPEG frame has no planes".to_string()))?;

    debug!("Decoding JPEG frame, {} bytes", plane.data.len());

    let image = image::load_from_memory_with_format(&plane.data, ImageFormat::Jpeg)
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    PixelBuffer::from_rgba8(width as usize, height as usize, rgba.as_raw())
}
