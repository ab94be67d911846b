use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::types::RawFrame;
use crate::image_pipeline::pixel::types::PixelBuffer;

/// Decodes a raw frame into pixels. Takes ownership so the frame is released
/// when decoding returns, on success and on error alike.
pub trait FrameDecoder: Send + Sync {
    fn decode(&self, frame: RawFrame) -> Result<PixelBuffer>;
}
