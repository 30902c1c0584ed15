//! Session lifecycle states, options and events

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::traits::{CaptureQuality, OutputMode};
use crate::export::types::QualityTier;
use crate::prefs::Preferences;

/// Lifecycle of a recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Paused,
    Stopped,
    Discarded,
    Exporting,
}

/// Options resolved once at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    pub output_mode: OutputMode,
    pub capture_quality: CaptureQuality,
    pub quality_tier: QualityTier,
    /// Export immediately on stop instead of waiting for an edit pass
    pub auto_export: bool,
    /// Hand finished exports to the asset library
    pub auto_save: bool,
    pub video_album: String,
    pub image_album: String,
}

impl SessionOptions {
    pub fn from_prefs(prefs: &dyn Preferences) -> Self {
        Self {
            output_mode: prefs.output_mode(),
            capture_quality: prefs.capture_quality(),
            quality_tier: prefs.quality_tier(),
            auto_export: !prefs.allow_edit(),
            auto_save: prefs.auto_save(),
            video_album: crate::library::VIDEO_ALBUM.to_string(),
            image_album: crate::library::IMAGE_ALBUM.to_string(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::default(),
            capture_quality: CaptureQuality::default(),
            quality_tier: QualityTier::default(),
            auto_export: true,
            auto_save: true,
            video_album: crate::library::VIDEO_ALBUM.to_string(),
            image_album: crate::library::IMAGE_ALBUM.to_string(),
        }
    }
}

/// Events broadcast to session observers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Started,
    #[serde(rename_all = "camelCase")]
    DurationTick { seconds: u64, display: String },
    #[serde(rename_all = "camelCase")]
    Paused { clip_count: usize },
    #[serde(rename_all = "camelCase")]
    Stopped { clip_count: usize },
    Discarded,
    #[serde(rename_all = "camelCase")]
    ExportStarted { job_id: Uuid },
    #[serde(rename_all = "camelCase")]
    ExportFinished {
        job_id: Uuid,
        output: Option<PathBuf>,
        error: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    AssetSaved { asset_ref: String },
    Error { message: String },
}

/// Format elapsed seconds as MM:SS for tick displays
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
