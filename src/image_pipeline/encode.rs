//! Image encoding module
//!
//! Writes composite images as JPEG or TIFF.

mod encoder;
mod standard_encoder;
pub mod types;

pub use encoder::ImageEncoder;
pub use standard_encoder::StandardImageEncoder;
pub use types::{OutputConfig, OutputConfigBuilder, OutputFormat, TiffCompression};
