//! Export types and configuration
//!
//! Quality tiers, the encoder preset table, job bookkeeping and export
//! errors.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::composition::engine::CompositionError;

/// Export quality tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

impl Default for QualityTier {
    fn default() -> Self {
        Self::Medium
    }
}

/// Fixed encoder settings for one quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderPreset {
    /// H.264 constant rate factor; lower is higher quality
    pub crf: u8,
    /// x264 speed preset
    pub speed: &'static str,
}

impl QualityTier {
    /// Static tier-to-preset mapping; not tunable beyond tier choice.
    pub fn preset(&self) -> EncoderPreset {
        match self {
            QualityTier::Low => EncoderPreset {
                crf: 28,
                speed: "faster",
            },
            QualityTier::Medium => EncoderPreset {
                crf: 23,
                speed: "medium",
            },
            QualityTier::High => EncoderPreset {
                crf: 18,
                speed: "slow",
            },
        }
    }
}

/// Lifecycle of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Per-call export bookkeeping; discarded once the terminal callback fires
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub id: Uuid,
    pub quality: QualityTier,
    pub destination: PathBuf,
    pub status: ExportStatus,
}

impl ExportJob {
    pub fn new(quality: QualityTier, destination: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            quality,
            destination,
            status: ExportStatus::Pending,
        }
    }
}

/// Successful export payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub location: PathBuf,
    pub quality: QualityTier,
    pub rendered_at: DateTime<Utc>,
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("an export is already in progress")]
    InProgress,

    #[error("export preflight failed: {0}")]
    Preflight(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("export cancelled")]
    Cancelled,

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
