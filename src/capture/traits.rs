//! Capture backend contract
//!
//! Platform-agnostic traits for the capture device. The crate drives a
//! capture session through these interfaces; opening physical devices and
//! locking them for configuration lives behind the implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capture::orientation::CaptureOrientation;
use crate::composition::transform::{PixelSize, Transform2D};

/// Errors surfaced by capture backends
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture permission denied")]
    PermissionDenied,

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("capture device busy: {0}")]
    DeviceBusy(String),

    #[error("segment failed to finalize: {0}")]
    SegmentWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the capture session is wired to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Photo,
    Video,
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::Photo
    }
}

/// Device-side capture resolution preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureQuality {
    Low,
    Medium,
    High,
}

impl Default for CaptureQuality {
    fn default() -> Self {
        Self::High
    }
}

/// Interruption reasons reported by the underlying capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterruptionReason {
    /// Another client took the audio or video device
    DeviceInUseByAnotherClient,
    /// Device withdrawn while another foreground app is active
    DeviceUnavailableOtherApp,
    /// Anything else (the session keeps running)
    Other,
}

impl InterruptionReason {
    /// Whether the capture session must be suspended until the interruption
    /// clears.
    pub fn requires_suspend(&self) -> bool {
        matches!(
            self,
            InterruptionReason::DeviceInUseByAnotherClient
                | InterruptionReason::DeviceUnavailableOtherApp
        )
    }
}

/// A finalized segment file with the metadata the writer recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentFile {
    pub location: PathBuf,
    /// Playable duration in seconds
    pub duration: f64,
    /// Encoded frame dimensions, pre-transform
    pub natural_size: PixelSize,
    /// Rotation/mirroring the writer stamped on the track
    pub preferred_transform: Transform2D,
}

/// A captured still photo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFile {
    pub location: PathBuf,
    pub size: PixelSize,
}

/// Driving interface over a capture device session.
///
/// All mutation goes through `&mut self`; the session controller serializes
/// access, so implementations never see concurrent configuration.
#[async_trait]
pub trait CaptureBackend: Send {
    /// Rewire the session outputs for the given mode. Invalid while a
    /// segment is open.
    fn set_output_mode(&mut self, mode: OutputMode) -> Result<(), CaptureError>;

    fn output_mode(&self) -> OutputMode;

    /// Apply a device resolution preset.
    fn set_quality(&mut self, quality: CaptureQuality) -> Result<(), CaptureError>;

    /// Whether the underlying session is running (not suspended).
    fn is_running(&self) -> bool;

    /// Suspend the underlying session (interruption, backgrounding).
    async fn suspend(&mut self) -> Result<(), CaptureError>;

    /// Resume a suspended session.
    async fn resume(&mut self) -> Result<(), CaptureError>;

    /// Device capture resolution for the active format, if known.
    fn active_resolution(&self) -> Option<PixelSize>;

    /// Begin writing a new segment to `destination` with the given fixed
    /// orientation.
    async fn begin_segment(
        &mut self,
        destination: &Path,
        orientation: CaptureOrientation,
    ) -> Result<(), CaptureError>;

    /// Finalize the open segment and return its metadata. The write
    /// completes asynchronously; implementations resolve once the file is
    /// fully on disk.
    async fn finish_segment(&mut self) -> Result<SegmentFile, CaptureError>;

    /// Capture a single still photo to `destination`.
    async fn capture_photo(
        &mut self,
        destination: &Path,
        orientation: CaptureOrientation,
    ) -> Result<PhotoFile, CaptureError>;
}

/// Authorization collaborator. The session controller checks it before any
/// capture starts and never bypasses a denial.
pub trait PermissionGate: Send + Sync {
    fn is_capture_authorized(&self) -> bool;

    /// Ask the platform to prompt; `callback` receives the outcome.
    fn request_authorization(&self, callback: Box<dyn FnOnce(bool) + Send>);
}

/// Gate that grants everything, for tests and headless embedding
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAuthorized;

impl PermissionGate for AlwaysAuthorized {
    fn is_capture_authorized(&self) -> bool {
        true
    }

    fn request_authorization(&self, callback: Box<dyn FnOnce(bool) + Send>) {
        callback(true);
    }
}
