//! Timeline export: quality tiers, render backends and the export engine

pub mod engine;
pub mod ffmpeg;
pub mod types;

pub use engine::{ExportEngine, NullRenderer, RenderBackend};
pub use ffmpeg::{probe_segment, probe_video, FfmpegRenderer, VideoMetadata};
pub use types::{
    EncoderPreset, ExportError, ExportJob, ExportStatus, ExportedFile, QualityTier,
};
