//! Clip composition
//!
//! Turns an ordered list of independently recorded clips into a single
//! timeline: per-clip time ranges, geometric normalization into one render
//! frame, and a hard-cut schedule at clip boundaries.

pub mod engine;
pub mod timeline;
pub mod transform;

pub use engine::{build_timeline, scale_to_fit, CompositionError};
pub use timeline::{LayerInstruction, Timeline, TIMELINE_FRAME_RATE};
pub use transform::{FrameOrientation, PixelSize, Transform2D};
