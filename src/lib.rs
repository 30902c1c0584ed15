//! Clip-roll recording sessions and export pipeline
//!
//! A recording session captures video in segments: each pause closes a
//! segment into a clip, and the ordered clips are later composited into a
//! single timeline and rendered to one output file. The crate provides the
//! session state machine ([`recorder::RecordingSessionController`]), the
//! pure composition step ([`composition::build_timeline`]) and an export
//! engine with an ffmpeg render backend ([`export::ExportEngine`]).
//!
//! Capture hardware, permissions, asset persistence and background
//! execution are all behind traits, so the whole pipeline runs headless
//! against [`capture::StubCaptureBackend`] in tests and demos.

pub mod capture;
pub mod composition;
pub mod export;
pub mod library;
pub mod prefs;
pub mod recorder;
pub mod storage;
pub mod utils;

pub use capture::{CaptureBackend, CaptureError, CaptureOrientation, OutputMode, PermissionGate};
pub use composition::{build_timeline, CompositionError, PixelSize, Timeline, Transform2D};
pub use export::{ExportEngine, ExportError, ExportedFile, FfmpegRenderer, QualityTier};
pub use recorder::{
    Clip, RecordingError, RecordingSessionController, RecordingState, SessionEvent, SessionOptions,
};
pub use storage::MediaStore;
pub use utils::{AppError, AppResult};
