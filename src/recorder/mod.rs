//! Recording sessions: state machine, clip bookkeeping, background grants

pub mod background;
pub mod clips;
pub mod controller;
pub mod state;

pub use background::{BackgroundAuthority, BackgroundToken, NoopBackgroundAuthority};
pub use clips::{Clip, ClipError, ClipStore};
pub use controller::{RecordingError, RecordingSessionController};
pub use state::{format_duration, RecordingState, SessionEvent, SessionOptions};
