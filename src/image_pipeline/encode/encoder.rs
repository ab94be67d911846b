use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pixel::types::PixelBuffer;
use crate::image_pipeline::encode::types::OutputConfig;

pub trait ImageEncoder: Send + Sync {
    fn encode(&self, image: &PixelBuffer, output: &mut dyn Write, config: &OutputConfig) -> Result<()>;
}
