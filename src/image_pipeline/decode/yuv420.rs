//! Planar YUV 4:2:0 decoding.
//!
//! Decoding is done in two passes. The three device planes are first repacked
//! into one NV21 buffer (full luma plane followed by interleaved V/U pairs),
//! reading each plane through its own row and pixel stride. The NV21 buffer is
//! then converted straight to RGB with full-range BT.601 coefficients.

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::frame::types::{CropRect, Plane};
use crate::image_pipeline::pixel::types::{PixelBuffer, Rgba};

const LUMA_PLANE: usize = 0;
const U_PLANE: usize = 1;
const V_PLANE: usize = 2;

/// Chroma samples are centred on this value.
const CHROMA_BIAS: f32 = 128.0;

/// Repacks three planes into an NV21 byte buffer covering `crop`.
pub(crate) fn repack_to_nv21(crop: CropRect, planes: &[Plane]) -> Result<Vec<u8>> {
    let CropRect { width, height, .. } = crop;
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    if width % 2 != 0 || height % 2 != 0 {
        return Err(PipelineError::DecodeError(format!(
            "4:2:0 crop must have even dimensions, got {}x{}",
            width, height
        )));
    }
    if planes.len() != 3 {
        return Err(PipelineError::DecodeError(format!(
            "planar YUV frame needs 3 planes, got {}",
            planes.len()
        )));
    }

    let luma_len = width
        .checked_mul(height)
        .ok_or(PipelineError::InvalidDimensions(width, height))?;
    let mut nv21 = vec![0u8; luma_len + luma_len / 2];

    for (index, plane) in planes.iter().enumerate() {
        // (first output byte, output step, subsampling shift)
        let (offset, output_stride, shift) = match index {
            LUMA_PLANE => (0, 1, 0),
            U_PLANE => (luma_len + 1, 2, 1),
            V_PLANE => (luma_len, 2, 1),
            _ => unreachable!("plane count checked above"),
        };
        copy_plane(index, plane, crop, shift, &mut nv21, offset, output_stride)?;
    }

    debug!(width, height, bytes = nv21.len(), "repacked planar frame to NV21");
    Ok(nv21)
}

fn copy_plane(
    index: usize,
    plane: &Plane,
    crop: CropRect,
    shift: u32,
    output: &mut [u8],
    mut offset: usize,
    output_stride: usize,
) -> Result<()> {
    let width = crop.width >> shift;
    let height = crop.height >> shift;
    let top = crop.top >> shift;
    let left = crop.left >> shift;
    let pixel_stride = plane.pixel_stride;

    if pixel_stride == 0 {
        return Err(PipelineError::DecodeError(format!(
            "plane {} has zero pixel stride",
            index
        )));
    }

    let overflow = || {
        PipelineError::DecodeError(format!(
            "plane {} strides overflow (row stride {}, pixel stride {})",
            index, plane.row_stride, pixel_stride
        ))
    };

    // bytes spanned by one row of samples
    let span = (width - 1)
        .checked_mul(pixel_stride)
        .and_then(|v| v.checked_add(1))
        .ok_or_else(overflow)?;
    let row_offset = left.checked_mul(pixel_stride).ok_or_else(overflow)?;

    for row in 0..height {
        let start = top
            .checked_add(row)
            .and_then(|v| v.checked_mul(plane.row_stride))
            .and_then(|v| v.checked_add(row_offset))
            .ok_or_else(overflow)?;
        let end = start.checked_add(span).ok_or_else(overflow)?;
        let source = plane.data.get(start..end).ok_or_else(|| {
            PipelineError::DecodeError(format!(
                "plane {} row {} reads bytes {}..{} past buffer of {} bytes",
                index,
                row,
                start,
                end,
                plane.data.len()
            ))
        })?;

        if pixel_stride == 1 && output_stride == 1 {
            output[offset..offset + width].copy_from_slice(source);
            offset += width;
        } else {
            for col in 0..width {
                output[offset] = source[col * pixel_stride];
                offset += output_stride;
            }
        }
    }

    Ok(())
}

/// Converts an NV21 buffer of `width` x `height` pixels to opaque RGBA.
pub(crate) fn nv21_to_pixels(nv21: &[u8], width: usize, height: usize) -> Result<PixelBuffer> {
    let luma_len = width * height;
    if nv21.len() != luma_len + luma_len / 2 {
        return Err(PipelineError::DecodeError(format!(
            "NV21 length mismatch: expected {}, got {}",
            luma_len + luma_len / 2,
            nv21.len()
        )));
    }

    let mut pixels = Vec::with_capacity(luma_len);
    for j in 0..height {
        for i in 0..width {
            let y = nv21[j * width + i] as f32;
            let vu_index = luma_len + (j / 2) * width + (i / 2) * 2;
            let v = nv21[vu_index] as f32 - CHROMA_BIAS;
            let u = nv21[vu_index + 1] as f32 - CHROMA_BIAS;

            let r = y + 1.402_f32 * v;
            let g = y - 0.344_136_f32 * u - 0.714_136_f32 * v;
            let b = y + 1.772_f32 * u;

            pixels.push(Rgba::opaque(clamp_to_u8(r), clamp_to_u8(g), clamp_to_u8(b)));
        }
    }

    PixelBuffer::new(width, height, pixels)
}

fn clamp_to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
