//! Capture device abstraction
//!
//! The crate never opens hardware itself; it drives a session through the
//! [`CaptureBackend`] trait and resolves device orientation with
//! [`OrientationResolver`].

pub mod orientation;
pub mod stub;
pub mod traits;

pub use orientation::{
    classify_acceleration, CaptureOrientation, OrientationResolver, RawOrientation,
};
pub use stub::StubCaptureBackend;
pub use traits::{
    AlwaysAuthorized, CaptureBackend, CaptureError, CaptureQuality, InterruptionReason,
    OutputMode, PermissionGate, PhotoFile, SegmentFile,
};
