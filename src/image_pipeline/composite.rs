//! Recombination of three single-channel exposures into one colour image.

use tracing::{debug, instrument};

use crate::image_pipeline::channel::Channel;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::pixel::types::{PixelBuffer, Rgba};

/// Takes red from `red`, green from `green` and blue from `blue` for every
/// pixel. The result is fully opaque. All three inputs must have the same
/// size; nothing is cropped or scaled.
#[instrument(skip_all, fields(width = red.width(), height = red.height()))]
pub fn composite(red: &PixelBuffer, green: &PixelBuffer, blue: &PixelBuffer) -> Result<PixelBuffer> {
    if red.dimensions() != green.dimensions() || red.dimensions() != blue.dimensions() {
        return Err(PipelineError::DimensionMismatch {
            red_width: red.width(),
            red_height: red.height(),
            green_width: green.width(),
            green_height: green.height(),
            blue_width: blue.width(),
            blue_height: blue.height(),
        });
    }

    let data: Vec<Rgba> = red
        .pixels()
        .iter()
        .zip(green.pixels())
        .zip(blue.pixels())
        .map(|((&r, &g), &b)| {
            Rgba::opaque(
                Channel::Red.component(r),
                Channel::Green.component(g),
                Channel::Blue.component(b),
            )
        })
        .collect();

    debug!("Composited {} pixels", data.len());
    PixelBuffer::new(red.width(), red.height(), data)
}
