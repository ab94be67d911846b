//! Raw sensor frame module
//!
//! Frames as delivered by a capture device, before any decoding.

pub mod types;

pub use types::{CropRect, PixelLayout, Plane, RawFrame};
