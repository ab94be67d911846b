//! Image processing pipeline module
//!
//! This module turns raw device frames into pixels, isolates and recombines
//! colour channels, and encodes the result for storage.

pub mod frame;
pub mod pixel;
pub mod decode;
pub mod channel;
pub mod composite;
pub mod encode;
pub mod common;

pub use common::{
    PipelineError,
    Result,
};

pub use frame::{
    CropRect,
    PixelLayout,
    Plane,
    RawFrame,
};

pub use pixel::{
    PixelBuffer,
    Rgba,
};

pub use decode::{
    FrameDecoder,
    StandardFrameDecoder,
};

pub use channel::{
    Channel,
    isolate,
};

pub use composite::composite;

pub use encode::{
    ImageEncoder,
    OutputConfig,
    OutputConfigBuilder,
    OutputFormat,
    StandardImageEncoder,
    TiffCompression,
};
