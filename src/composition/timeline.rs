//! Timeline representation of a merged clip sequence
//!
//! A timeline is a value snapshot derived from the clip store at export time.
//! Mutating the store afterwards never affects a timeline already handed to
//! an export job.

use serde::{Deserialize, Serialize};

use crate::composition::transform::{PixelSize, Transform2D};
use crate::recorder::clips::Clip;

/// Output frame rate of composed timelines
pub const TIMELINE_FRAME_RATE: u32 = 30;

/// Placement of one clip inside a timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInstruction {
    /// The clip this layer presents (owned copy)
    pub clip: Clip,

    /// Start offset within the timeline, in seconds
    pub start: f64,

    /// Duration of this layer, in seconds
    pub duration: f64,

    /// Composite transform normalizing the clip into the render frame
    pub transform: Transform2D,

    /// Instant (timeline seconds) at which opacity drops to zero to produce
    /// a hard cut. `None` on the final layer.
    pub opacity_cut: Option<f64>,
}

impl LayerInstruction {
    /// End offset within the timeline, in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// An ordered, transform-normalized composition ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Output frame dimensions
    pub render_size: PixelSize,

    /// Output frame rate
    pub frame_rate: u32,

    /// Sum of constituent clip durations, in seconds
    pub total_duration: f64,

    /// One instruction per clip, in presentation order
    pub layers: Vec<LayerInstruction>,
}

impl Timeline {
    pub fn clip_count(&self) -> usize {
        self.layers.len()
    }
}
