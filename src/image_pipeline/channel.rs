//! Single colour channel isolation.

use std::fmt;

use crate::image_pipeline::pixel::types::{PixelBuffer, Rgba};

/// Colour filter an exposure was taken through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Capture order. The filter is swapped physically between exposures in
    /// this order, so it must not change.
    pub const CAPTURE_ORDER: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// Keeps this channel and alpha, zeroes the other two.
    pub fn mask(self, pixel: Rgba) -> Rgba {
        match self {
            Channel::Red => Rgba::new(pixel.r, 0, 0, pixel.a),
            Channel::Green => Rgba::new(0, pixel.g, 0, pixel.a),
            Channel::Blue => Rgba::new(0, 0, pixel.b, pixel.a),
        }
    }

    /// Reads this channel's component from a pixel.
    pub fn component(self, pixel: Rgba) -> u8 {
        match self {
            Channel::Red => pixel.r,
            Channel::Green => pixel.g,
            Channel::Blue => pixel.b,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Returns a copy of `buffer` with only `channel` (and alpha) left.
pub fn isolate(buffer: &PixelBuffer, channel: Channel) -> PixelBuffer {
    buffer.map_pixels(|px| channel.mask(px))
}
