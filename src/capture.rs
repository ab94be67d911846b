//! Three-exposure capture orchestration
//!
//! The sequencer requests one frame per colour filter, decodes and isolates
//! each one, recombines them and hands the result to storage. Sources,
//! storage and the catalogue are traits so device and persistence backends
//! can be swapped.

mod config;
mod sequencer;
mod timing;
pub mod catalogue;
pub mod source;
pub mod state;
pub mod store;


pub use catalogue::{CapturedImageRecord, ImageCatalogue, MemoryCatalogue};
pub use config::{SequencerConfig, SequencerConfigBuilder};
pub use sequencer::CaptureSequencer;
pub use source::{FileFrameSource, FrameSource};
pub use state::CaptureState;
pub use store::{FileImageStore, ImageStore};
