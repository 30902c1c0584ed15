//! Headless capture backend
//!
//! Produces placeholder segment files with configurable metadata instead of
//! driving real hardware. Used by the integration tests and the demo wiring;
//! also handy as a development backend on machines without a camera.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::capture::orientation::CaptureOrientation;
use crate::capture::traits::{
    CaptureBackend, CaptureError, CaptureQuality, OutputMode, PhotoFile, SegmentFile,
};
use crate::composition::transform::{PixelSize, Transform2D};

/// Capture backend that fabricates segments
pub struct StubCaptureBackend {
    output_mode: OutputMode,
    quality: CaptureQuality,
    running: bool,
    resolution: PixelSize,
    /// Duration stamped on every finalized segment
    segment_duration: f64,
    open_segment: Option<(PathBuf, CaptureOrientation)>,
    /// When set, the next finalize fails with this message
    fail_next_finalize: Option<String>,
}

impl StubCaptureBackend {
    pub fn new(resolution: PixelSize, segment_duration: f64) -> Self {
        Self {
            output_mode: OutputMode::Video,
            quality: CaptureQuality::High,
            running: true,
            resolution,
            segment_duration,
            open_segment: None,
            fail_next_finalize: None,
        }
    }

    /// Arrange for the next `finish_segment` to fail
    pub fn fail_next_finalize(&mut self, message: impl Into<String>) {
        self.fail_next_finalize = Some(message.into());
    }

    pub fn set_segment_duration(&mut self, seconds: f64) {
        self.segment_duration = seconds;
    }
}

impl Default for StubCaptureBackend {
    fn default() -> Self {
        Self::new(PixelSize::new(1920, 1080), 1.0)
    }
}

#[async_trait]
impl CaptureBackend for StubCaptureBackend {
    fn set_output_mode(&mut self, mode: OutputMode) -> Result<(), CaptureError> {
        if self.open_segment.is_some() {
            return Err(CaptureError::DeviceBusy(
                "segment open, cannot rewire outputs".into(),
            ));
        }
        self.output_mode = mode;
        Ok(())
    }

    fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    fn set_quality(&mut self, quality: CaptureQuality) -> Result<(), CaptureError> {
        self.quality = quality;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    async fn suspend(&mut self) -> Result<(), CaptureError> {
        self.running = false;
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), CaptureError> {
        self.running = true;
        Ok(())
    }

    fn active_resolution(&self) -> Option<PixelSize> {
        Some(self.resolution)
    }

    async fn begin_segment(
        &mut self,
        destination: &Path,
        orientation: CaptureOrientation,
    ) -> Result<(), CaptureError> {
        if !self.running {
            return Err(CaptureError::DeviceUnavailable("session suspended".into()));
        }
        if self.open_segment.is_some() {
            return Err(CaptureError::DeviceBusy("segment already open".into()));
        }
        std::fs::write(destination, b"")?;
        self.open_segment = Some((destination.to_path_buf(), orientation));
        Ok(())
    }

    async fn finish_segment(&mut self) -> Result<SegmentFile, CaptureError> {
        let (location, orientation) = self
            .open_segment
            .take()
            .ok_or_else(|| CaptureError::SegmentWrite("no segment open".into()))?;

        if let Some(message) = self.fail_next_finalize.take() {
            return Err(CaptureError::SegmentWrite(message));
        }

        // The writer records the sensor-native frame and stamps the rotation
        // needed to present it upright, like a movie-file output would.
        let preferred_transform = if orientation.is_portrait() {
            Transform2D::rotation_quarter_turns(1)
        } else {
            Transform2D::identity()
        };

        Ok(SegmentFile {
            location,
            duration: self.segment_duration,
            natural_size: self.resolution,
            preferred_transform,
        })
    }

    async fn capture_photo(
        &mut self,
        destination: &Path,
        _orientation: CaptureOrientation,
    ) -> Result<PhotoFile, CaptureError> {
        if !self.running {
            return Err(CaptureError::DeviceUnavailable("session suspended".into()));
        }
        std::fs::write(destination, b"")?;
        Ok(PhotoFile {
            location: destination.to_path_buf(),
            size: self.resolution,
        })
    }
}
