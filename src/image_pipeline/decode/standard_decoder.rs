use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::decode::decoder::FrameDecoder;
use crate::image_pipeline::decode::{jpeg, yuv420};
use crate::image_pipeline::frame::types::{PixelLayout, RawFrame};
use crate::image_pipeline::pixel::types::PixelBuffer;

/// Decoder for the two layouts capture devices hand out: planar YUV 4:2:0 and JPEG.
///
/// YUV frames are converted directly to RGB rather than being re-encoded to an
/// intermediate JPEG first, so no compression artifacts are introduced.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFrameDecoder;

impl FrameDecoder for StandardFrameDecoder {
    #[instrument(skip(self, frame), fields(layout = ?frame.layout()))]
    fn decode(&self, frame: RawFrame) -> Result<PixelBuffer> {
        let buffer = match frame.layout() {
            PixelLayout::PlanarYuv420 => {
                let crop = frame.crop();
                let nv21 = yuv420::repack_to_nv21(crop, frame.planes())?;
                yuv420::nv21_to_pixels(&nv21, crop.width, crop.height)?
            }
            PixelLayout::EncodedJpeg => jpeg::decode_jpeg(frame.planes())?,
            PixelLayout::Unknown(code) => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "device format 0x{:x}",
                    code
                )));
            }
        };

        debug!("Decoded frame: {}x{}", buffer.width(), buffer.height());
        Ok(buffer)
    }
}
