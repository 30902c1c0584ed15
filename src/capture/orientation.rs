//! Device orientation resolution
//!
//! Maps the noisy accelerometer-derived orientation signal to a stable
//! capture orientation. Face-up, face-down and unknown samples hold the last
//! stable value instead of falling back to a default, which keeps the
//! preview from flickering when the device lies flat.

use serde::{Deserialize, Serialize};

/// Raw sample from the device orientation signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawOrientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
    Unknown,
}

/// Stable orientation applied to capture connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptureOrientation {
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl CaptureOrientation {
    pub fn is_portrait(&self) -> bool {
        matches!(
            self,
            CaptureOrientation::Portrait | CaptureOrientation::PortraitUpsideDown
        )
    }
}

/// Classify a raw accelerometer sample.
///
/// Thresholds: |z| dominant means the device lies flat; otherwise the larger
/// of the tilt axes wins. Samples inside the dead zone report `Unknown` and
/// leave the resolved orientation untouched.
pub fn classify_acceleration(x: f64, y: f64, z: f64) -> RawOrientation {
    if z < -0.75 {
        RawOrientation::FaceUp
    } else if z > 0.75 {
        RawOrientation::FaceDown
    } else if x < -0.5 {
        RawOrientation::LandscapeLeft
    } else if x > 0.5 {
        RawOrientation::LandscapeRight
    } else if y > 0.5 {
        RawOrientation::PortraitUpsideDown
    } else if y < -0.5 {
        RawOrientation::Portrait
    } else {
        RawOrientation::Unknown
    }
}

/// Holds the resolved orientation across noisy samples, and pins the capture
/// orientation for the length of a recording session.
///
/// The preview orientation keeps tracking live rotation; once `lock` is
/// called (at the first segment of a session) the capture orientation stays
/// fixed so every clip composited into one timeline shares it.
#[derive(Debug, Clone)]
pub struct OrientationResolver {
    held: CaptureOrientation,
    locked: Option<CaptureOrientation>,
}

impl Default for OrientationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationResolver {
    pub fn new() -> Self {
        Self {
            held: CaptureOrientation::Portrait,
            locked: None,
        }
    }

    /// Feed one raw sample and return the resolved orientation.
    ///
    /// Landscape samples map swapped: a device rolled left visually rotates
    /// the frame right, so the frame must counter-rotate.
    pub fn observe(&mut self, raw: RawOrientation) -> CaptureOrientation {
        match raw {
            RawOrientation::Portrait => self.held = CaptureOrientation::Portrait,
            RawOrientation::PortraitUpsideDown => {
                self.held = CaptureOrientation::PortraitUpsideDown
            }
            RawOrientation::LandscapeLeft => self.held = CaptureOrientation::LandscapeRight,
            RawOrientation::LandscapeRight => self.held = CaptureOrientation::LandscapeLeft,
            RawOrientation::FaceUp | RawOrientation::FaceDown | RawOrientation::Unknown => {}
        }
        self.held
    }

    /// Orientation the live preview should follow
    pub fn preview_orientation(&self) -> CaptureOrientation {
        self.held
    }

    /// Orientation applied to capture output: the locked value while a
    /// session is in progress, the live value otherwise.
    pub fn capture_orientation(&self) -> CaptureOrientation {
        self.locked.unwrap_or(self.held)
    }

    /// Pin the capture orientation to the current value and return it.
    /// Idempotent while locked.
    pub fn lock(&mut self) -> CaptureOrientation {
        *self.locked.get_or_insert(self.held)
    }

    pub fn unlock(&mut self) {
        self.locked = None;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }
}
