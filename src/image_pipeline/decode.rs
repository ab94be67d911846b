//! Frame decoding module
//!
//! Turns raw device frames (planar YUV 4:2:0 or JPEG) into RGBA pixel buffers.

mod decoder;
mod standard_decoder;
mod yuv420;
mod jpeg;

pub use decoder::FrameDecoder;
pub use standard_decoder::StandardFrameDecoder;
