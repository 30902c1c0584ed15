//! Recording session controller
//!
//! Owns the capture backend and drives the session state machine:
//! `Idle → Recording ⇄ Paused → Stopped/Discarded`, plus `Exporting` while a
//! detached render job runs. Segment files, clip bookkeeping, orientation
//! locking, the duration tick and export hand-off all flow through here.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use thiserror::Error;
use tokio::sync::{broadcast, oneshot};
use uuid::Uuid;

use crate::capture::orientation::{
    classify_acceleration, CaptureOrientation, OrientationResolver, RawOrientation,
};
use crate::capture::traits::{
    AlwaysAuthorized, CaptureBackend, CaptureError, CaptureQuality, InterruptionReason,
    OutputMode, PermissionGate, PhotoFile,
};
use crate::composition::engine::build_timeline;
use crate::composition::transform::PixelSize;
use crate::export::engine::ExportEngine;
use crate::export::types::{ExportError, ExportedFile, QualityTier};
use crate::library::AssetLibrary;
use crate::recorder::background::{BackgroundAuthority, BackgroundToken, NoopBackgroundAuthority};
use crate::recorder::clips::{Clip, ClipError, ClipStore};
use crate::recorder::state::{format_duration, RecordingState, SessionEvent, SessionOptions};
use crate::storage::MediaStore;

const EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("capture permission denied")]
    PermissionDenied,
    #[error("operation requires {0:?} output mode")]
    WrongMode(OutputMode),
    #[error("capture device busy: {0}")]
    DeviceBusy(String),
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("segment write failed: {0}")]
    SegmentWrite(String),
    #[error("{operation} is not valid while {state:?}")]
    InvalidState {
        state: RecordingState,
        operation: &'static str,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Clip(#[from] ClipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CaptureError> for RecordingError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::PermissionDenied => Self::PermissionDenied,
            CaptureError::DeviceBusy(s) => Self::DeviceBusy(s),
            CaptureError::DeviceUnavailable(s) => Self::DeviceUnavailable(s),
            CaptureError::SegmentWrite(s) => Self::SegmentWrite(s),
            CaptureError::Io(e) => Self::Io(e),
        }
    }
}

/// Drives one recording session at a time over a capture backend.
///
/// The state cell is shared with detached export jobs so a finished job can
/// complete `Exporting → Idle` without clobbering a session the caller has
/// already started on top of it.
pub struct RecordingSessionController {
    backend: Box<dyn CaptureBackend>,
    state: Arc<RwLock<RecordingState>>,
    clips: ClipStore,
    store: MediaStore,
    resolver: OrientationResolver,
    /// Max-merged output frame size for the current session
    render_size: PixelSize,
    options: SessionOptions,
    engine: Arc<ExportEngine>,
    events: broadcast::Sender<SessionEvent>,
    elapsed: Arc<AtomicU64>,
    tick: Option<tokio::task::JoinHandle<()>>,
    /// Guards against overlapping segment finalization and a new start
    finalizing: bool,
    open_segment: Option<PathBuf>,
    /// Names the session's private segment directory; regenerated at the
    /// first segment so paths never collide with a prior session's export
    /// job still holding its files
    session_id: Uuid,
    segment_index: usize,
    permissions: Arc<dyn PermissionGate>,
    library: Option<Arc<dyn AssetLibrary>>,
    background: Arc<dyn BackgroundAuthority>,
    background_token: Option<Box<dyn BackgroundToken>>,
}

impl RecordingSessionController {
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        store: MediaStore,
        engine: Arc<ExportEngine>,
        options: SessionOptions,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            backend,
            state: Arc::new(RwLock::new(RecordingState::Idle)),
            clips: ClipStore::new(),
            store,
            resolver: OrientationResolver::new(),
            render_size: PixelSize::new(0, 0),
            options,
            engine,
            events,
            elapsed: Arc::new(AtomicU64::new(0)),
            tick: None,
            finalizing: false,
            open_segment: None,
            session_id: Uuid::new_v4(),
            segment_index: 0,
            permissions: Arc::new(AlwaysAuthorized),
            library: None,
            background: Arc::new(NoopBackgroundAuthority),
            background_token: None,
        }
    }

    pub fn with_permission_gate(mut self, gate: Arc<dyn PermissionGate>) -> Self {
        self.permissions = gate;
        self
    }

    pub fn with_asset_library(mut self, library: Arc<dyn AssetLibrary>) -> Self {
        self.library = Some(library);
        self
    }

    pub fn with_background_authority(mut self, authority: Arc<dyn BackgroundAuthority>) -> Self {
        self.background = authority;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> RecordingState {
        *self.state.read()
    }

    /// Wall seconds recorded so far in the current session
    pub fn duration_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Options resolved for the current session; `auto_export` and
    /// `quality_tier` tell the caller how to sequence stop into export.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn render_size(&self) -> PixelSize {
        self.render_size
    }

    /// Whether the underlying capture session is running (not suspended)
    pub fn is_capture_running(&self) -> bool {
        self.backend.is_running()
    }

    /// Begin recording a new segment.
    ///
    /// Valid from `Idle`, `Paused` and `Exporting` (a previous session's
    /// render holds its own snapshot and keeps running). The first segment
    /// of a session locks the capture orientation and acquires a
    /// background grant.
    pub async fn start(&mut self) -> Result<(), RecordingError> {
        let state = *self.state.read();
        if !matches!(
            state,
            RecordingState::Idle | RecordingState::Paused | RecordingState::Exporting
        ) {
            return Err(RecordingError::InvalidState {
                state,
                operation: "start",
            });
        }
        if self.finalizing {
            return Err(RecordingError::DeviceBusy(
                "segment finalize in flight".into(),
            ));
        }
        if !self.permissions.is_capture_authorized() {
            return Err(RecordingError::PermissionDenied);
        }
        if self.backend.output_mode() != OutputMode::Video {
            return Err(RecordingError::WrongMode(OutputMode::Video));
        }

        let first_segment = state != RecordingState::Paused;
        if first_segment {
            self.background_token = Some(self.background.begin("recording session"));
            self.resolver.lock();
            self.elapsed.store(0, Ordering::SeqCst);
            self.session_id = Uuid::new_v4();
            self.segment_index = 0;
            self.render_size = PixelSize::new(0, 0);
        }
        let orientation = self.resolver.capture_orientation();

        let destination = self.store.segment_path(self.session_id, self.segment_index)?;
        self.backend.begin_segment(&destination, orientation).await?;
        self.open_segment = Some(destination);
        self.segment_index += 1;

        if let Some(resolution) = self.backend.active_resolution() {
            self.merge_render_size(resolution, orientation);
        }

        *self.state.write() = RecordingState::Recording;
        self.spawn_tick();
        tracing::info!(?orientation, segment = self.segment_index - 1, "recording started");
        let _ = self.events.send(SessionEvent::Started);
        Ok(())
    }

    /// Pause recording, finalizing the open segment into a clip.
    pub async fn pause(&mut self) -> Result<(), RecordingError> {
        let state = *self.state.read();
        if state != RecordingState::Recording {
            return Err(RecordingError::InvalidState {
                state,
                operation: "pause",
            });
        }
        self.stop_tick();

        match self.finalize_open_segment().await {
            Ok(()) => {
                *self.state.write() = RecordingState::Paused;
                let _ = self.events.send(SessionEvent::Paused {
                    clip_count: self.clips.len(),
                });
                Ok(())
            }
            Err(err) => {
                // A failed first segment leaves nothing worth keeping.
                if self.clips.is_empty() {
                    self.reset_session(RecordingState::Idle);
                } else {
                    *self.state.write() = RecordingState::Paused;
                }
                Err(err)
            }
        }
    }

    /// Stop the session. `discard` (or an empty store) throws the clips
    /// away; otherwise the ordered snapshot is returned and the session
    /// waits in `Stopped` for an export or a reset.
    pub async fn stop(&mut self, discard: bool) -> Result<Vec<Clip>, RecordingError> {
        let state = *self.state.read();
        if !matches!(state, RecordingState::Recording | RecordingState::Paused) {
            return Err(RecordingError::InvalidState {
                state,
                operation: "stop",
            });
        }

        if state == RecordingState::Recording {
            self.stop_tick();
            if let Err(err) = self.finalize_open_segment().await {
                tracing::warn!("segment lost while stopping: {err}");
                let _ = self.events.send(SessionEvent::Error {
                    message: err.to_string(),
                });
            }
        }

        self.background_token = None;
        if discard || self.clips.is_empty() {
            self.reset_session(RecordingState::Discarded);
            let _ = self.events.send(SessionEvent::Discarded);
            return Ok(Vec::new());
        }

        *self.state.write() = RecordingState::Stopped;
        let _ = self.events.send(SessionEvent::Stopped {
            clip_count: self.clips.len(),
        });
        Ok(self.clips.snapshot())
    }

    /// Hand the session's clips to a detached export job.
    ///
    /// The session is reset immediately (the job owns the clips and their
    /// files); the returned receiver resolves with the terminal result.
    /// `Exporting → Idle` is completed by the job itself unless a new
    /// session has already replaced the state.
    pub fn export(
        &mut self,
        tier: QualityTier,
    ) -> Result<oneshot::Receiver<Result<ExportedFile, ExportError>>, RecordingError> {
        let state = *self.state.read();
        if state != RecordingState::Stopped {
            return Err(RecordingError::InvalidState {
                state,
                operation: "export",
            });
        }
        if self.engine.is_exporting() {
            return Err(ExportError::InProgress.into());
        }

        let timeline = match build_timeline(&self.clips.snapshot(), self.render_size) {
            Ok(t) => t,
            Err(err) => {
                self.reset_session(RecordingState::Idle);
                return Err(RecordingError::Export(err.into()));
            }
        };

        let clips = self.clips.take_all();
        let session = self.session_id;
        self.resolver.unlock();
        self.elapsed.store(0, Ordering::SeqCst);
        self.segment_index = 0;
        self.render_size = PixelSize::new(0, 0);
        *self.state.write() = RecordingState::Exporting;

        let job_id = Uuid::new_v4();
        let _ = self.events.send(SessionEvent::ExportStarted { job_id });

        let engine = Arc::clone(&self.engine);
        let state_cell = Arc::clone(&self.state);
        let events = self.events.clone();
        let store = self.store.clone();
        let library = self.library.clone();
        let auto_save = self.options.auto_save;
        let album = self.options.video_album.clone();
        let token = self.background.begin("export");
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = engine.export(timeline, tier).await;

            // The raw segments are spent either way. Only this session's
            // directory is touched; a session recorded meanwhile keeps its
            // own files.
            for clip in &clips {
                store.delete(&clip.location);
            }
            store.clear_session(session);

            if let Ok(file) = &result {
                if auto_save {
                    if let Some(library) = &library {
                        match library.save(&file.location, &album, file.rendered_at, None) {
                            Ok(asset) => {
                                let _ = events.send(SessionEvent::AssetSaved {
                                    asset_ref: asset.0,
                                });
                            }
                            Err(err) => {
                                tracing::warn!("asset save failed: {err}");
                                let _ = events.send(SessionEvent::Error {
                                    message: format!("asset save failed: {err}"),
                                });
                            }
                        }
                    }
                }
            }

            {
                let mut state = state_cell.write();
                if *state == RecordingState::Exporting {
                    *state = RecordingState::Idle;
                }
            }

            let _ = events.send(SessionEvent::ExportFinished {
                job_id,
                output: result.as_ref().ok().map(|f| f.location.clone()),
                error: result.as_ref().err().map(|e| e.to_string()),
            });
            let _ = tx.send(result);
            drop(token);
        });

        Ok(rx)
    }

    /// Throw away a stopped or discarded session. No-op from `Idle`.
    pub fn reset(&mut self) -> Result<(), RecordingError> {
        let state = *self.state.read();
        match state {
            RecordingState::Idle => Ok(()),
            RecordingState::Stopped | RecordingState::Discarded => {
                self.reset_session(RecordingState::Idle);
                Ok(())
            }
            _ => Err(RecordingError::InvalidState {
                state,
                operation: "reset",
            }),
        }
    }

    /// Remove a recorded clip and its file, subtracting its duration.
    pub fn delete_clip(&mut self, index: usize) -> Result<(), RecordingError> {
        self.require_editable("delete_clip")?;
        let clip = self.clips.remove(index)?;
        self.store.delete(&clip.location);
        let seconds = clip.duration.round() as u64;
        let _ = self
            .elapsed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(seconds))
            });
        Ok(())
    }

    /// Reorder a recorded clip.
    pub fn move_clip(&mut self, from: usize, to: usize) -> Result<(), RecordingError> {
        self.require_editable("move_clip")?;
        self.clips.move_clip(from, to)?;
        Ok(())
    }

    /// Capture a still photo at the current orientation.
    pub async fn capture_photo(&mut self) -> Result<PhotoFile, RecordingError> {
        let state = *self.state.read();
        if state != RecordingState::Idle {
            return Err(RecordingError::InvalidState {
                state,
                operation: "capture_photo",
            });
        }
        if !self.permissions.is_capture_authorized() {
            return Err(RecordingError::PermissionDenied);
        }
        if self.backend.output_mode() != OutputMode::Photo {
            return Err(RecordingError::WrongMode(OutputMode::Photo));
        }

        let destination = self.store.photo_path()?;
        let orientation = self.resolver.capture_orientation();
        let photo = self.backend.capture_photo(&destination, orientation).await?;

        if self.options.auto_save {
            if let Some(library) = &self.library {
                match library.save(
                    &photo.location,
                    &self.options.image_album,
                    chrono::Utc::now(),
                    None,
                ) {
                    Ok(asset) => {
                        let _ = self
                            .events
                            .send(SessionEvent::AssetSaved { asset_ref: asset.0 });
                    }
                    Err(err) => {
                        tracing::warn!("asset save failed: {err}");
                        let _ = self
                            .events
                            .send(SessionEvent::Error {
                                message: format!("asset save failed: {err}"),
                            });
                    }
                }
            }
        }
        Ok(photo)
    }

    /// Feed a raw device orientation sample into the resolver.
    pub fn handle_orientation(&mut self, raw: RawOrientation) -> CaptureOrientation {
        self.resolver.observe(raw)
    }

    /// Feed a raw accelerometer sample (gravity-normalized axes).
    pub fn handle_acceleration(&mut self, x: f64, y: f64, z: f64) -> CaptureOrientation {
        self.resolver.observe(classify_acceleration(x, y, z))
    }

    pub fn preview_orientation(&self) -> CaptureOrientation {
        self.resolver.preview_orientation()
    }

    /// React to a device interruption. Client-conflict interruptions
    /// suspend the backend; recovery waits for `handle_interruption_ended`.
    pub async fn handle_interruption(&mut self, reason: InterruptionReason) {
        tracing::warn!(?reason, "capture interrupted");
        if reason.requires_suspend() && self.backend.is_running() {
            if let Err(err) = self.backend.suspend().await {
                let _ = self.events.send(SessionEvent::Error {
                    message: err.to_string(),
                });
            }
        }
    }

    pub async fn handle_interruption_ended(&mut self) {
        if !self.backend.is_running() {
            if let Err(err) = self.backend.resume().await {
                let _ = self.events.send(SessionEvent::Error {
                    message: err.to_string(),
                });
            }
        }
    }

    /// App is leaving the foreground: close the open segment, then suspend.
    pub async fn will_enter_background(&mut self) -> Result<(), RecordingError> {
        if *self.state.read() == RecordingState::Recording {
            self.pause().await?;
        }
        if self.backend.is_running() {
            self.backend.suspend().await?;
        }
        Ok(())
    }

    /// Rewire the backend outputs. Invalid mid-session.
    pub async fn set_output_mode(&mut self, mode: OutputMode) -> Result<(), RecordingError> {
        let state = *self.state.read();
        if matches!(state, RecordingState::Recording | RecordingState::Paused) {
            return Err(RecordingError::InvalidState {
                state,
                operation: "set_output_mode",
            });
        }
        self.backend.set_output_mode(mode)?;
        self.options.output_mode = mode;
        Ok(())
    }

    pub fn set_capture_quality(&mut self, quality: CaptureQuality) -> Result<(), RecordingError> {
        let state = *self.state.read();
        if matches!(state, RecordingState::Recording | RecordingState::Paused) {
            return Err(RecordingError::InvalidState {
                state,
                operation: "set_capture_quality",
            });
        }
        self.backend.set_quality(quality)?;
        self.options.capture_quality = quality;
        Ok(())
    }

    fn require_editable(&self, operation: &'static str) -> Result<(), RecordingError> {
        let state = *self.state.read();
        if matches!(state, RecordingState::Paused | RecordingState::Stopped) {
            Ok(())
        } else {
            Err(RecordingError::InvalidState { state, operation })
        }
    }

    /// Fold a device resolution into the session render size, swapping
    /// axes when the segment is portrait.
    fn merge_render_size(&mut self, resolution: PixelSize, orientation: CaptureOrientation) {
        let oriented = if orientation.is_portrait() {
            resolution.swapped()
        } else {
            resolution
        };
        self.render_size = PixelSize::new(
            self.render_size.width.max(oriented.width),
            self.render_size.height.max(oriented.height),
        );
    }

    async fn finalize_open_segment(&mut self) -> Result<(), RecordingError> {
        self.finalizing = true;
        let result = self.backend.finish_segment().await;
        self.finalizing = false;
        let destination = self.open_segment.take();

        let segment = match result {
            Ok(segment) => segment,
            Err(err) => {
                if let Some(path) = destination {
                    self.store.delete(&path);
                }
                return Err(RecordingError::SegmentWrite(err.to_string()));
            }
        };

        let clip = Clip::new(
            segment.location.clone(),
            segment.duration,
            segment.natural_size,
            segment.preferred_transform,
        );
        if let Err(err) = self.clips.append(clip) {
            self.store.delete(&segment.location);
            return Err(RecordingError::SegmentWrite(err.to_string()));
        }
        tracing::debug!(
            duration = segment.duration,
            clips = self.clips.len(),
            "segment finalized"
        );
        Ok(())
    }

    fn spawn_tick(&mut self) {
        self.stop_tick();
        let events = self.events.clone();
        let elapsed = Arc::clone(&self.elapsed);
        self.tick = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick resolves immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let seconds = elapsed.fetch_add(1, Ordering::SeqCst) + 1;
                let _ = events.send(SessionEvent::DurationTick {
                    seconds,
                    display: format_duration(seconds),
                });
            }
        }));
    }

    fn stop_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            handle.abort();
        }
    }

    /// Delete every segment file and return to `next` with empty state.
    fn reset_session(&mut self, next: RecordingState) {
        for clip in self.clips.snapshot() {
            self.store.delete(&clip.location);
        }
        if let Some(path) = self.open_segment.take() {
            self.store.delete(&path);
        }
        self.store.clear_session(self.session_id);
        self.clips.clear();
        self.resolver.unlock();
        self.elapsed.store(0, Ordering::SeqCst);
        self.segment_index = 0;
        self.render_size = PixelSize::new(0, 0);
        self.background_token = None;
        *self.state.write() = next;
    }
}

impl Drop for RecordingSessionController {
    fn drop(&mut self) {
        self.stop_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::stub::StubCaptureBackend;
    use crate::export::engine::NullRenderer;

    fn controller(dir: &std::path::Path) -> RecordingSessionController {
        let store = MediaStore::new(dir);
        let engine = Arc::new(ExportEngine::new(store.clone(), Arc::new(NullRenderer)));
        RecordingSessionController::new(
            Box::new(StubCaptureBackend::default()),
            store,
            engine,
            SessionOptions {
                output_mode: OutputMode::Video,
                ..SessionOptions::default()
            },
        )
    }

    #[tokio::test]
    async fn pause_is_invalid_while_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let err = ctl.pause().await.unwrap_err();
        assert!(matches!(
            err,
            RecordingError::InvalidState {
                state: RecordingState::Idle,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn photo_requires_photo_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let err = ctl.capture_photo().await.unwrap_err();
        assert!(matches!(err, RecordingError::WrongMode(OutputMode::Photo)));
    }

    #[tokio::test]
    async fn start_locks_orientation_for_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.handle_orientation(RawOrientation::PortraitUpsideDown);
        ctl.start().await.unwrap();
        ctl.handle_orientation(RawOrientation::LandscapeLeft);
        assert!(ctl.resolver.is_locked());
        assert_eq!(
            ctl.resolver.capture_orientation(),
            CaptureOrientation::PortraitUpsideDown
        );
        ctl.pause().await.unwrap();
        let clips = ctl.stop(false).await.unwrap();
        assert_eq!(clips.len(), 1);
    }

    #[tokio::test]
    async fn portrait_sessions_swap_render_axes() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.handle_orientation(RawOrientation::Portrait);
        ctl.start().await.unwrap();
        assert_eq!(ctl.render_size(), PixelSize::new(1080, 1920));
    }

    #[tokio::test]
    async fn failed_first_segment_resets_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let engine = Arc::new(ExportEngine::new(store.clone(), Arc::new(NullRenderer)));
        let mut backend = StubCaptureBackend::default();
        backend.fail_next_finalize("writer torn down");
        let mut ctl = RecordingSessionController::new(
            Box::new(backend),
            store,
            engine,
            SessionOptions {
                output_mode: OutputMode::Video,
                ..SessionOptions::default()
            },
        );
        ctl.start().await.unwrap();
        let err = ctl.pause().await.unwrap_err();
        assert!(matches!(err, RecordingError::SegmentWrite(_)));
        assert_eq!(ctl.state(), RecordingState::Idle);
        assert_eq!(ctl.clip_count(), 0);
    }

    #[tokio::test]
    async fn client_conflict_interruptions_suspend_capture() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        assert!(ctl.is_capture_running());

        ctl.handle_interruption(InterruptionReason::DeviceInUseByAnotherClient)
            .await;
        assert!(!ctl.is_capture_running());

        ctl.handle_interruption_ended().await;
        assert!(ctl.is_capture_running());

        // Reasons outside the client-conflict set leave the session alone.
        ctl.handle_interruption(InterruptionReason::Other).await;
        assert!(ctl.is_capture_running());
    }

    #[tokio::test]
    async fn backgrounding_closes_the_open_segment_before_suspending() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        ctl.start().await.unwrap();

        ctl.will_enter_background().await.unwrap();
        assert_eq!(ctl.state(), RecordingState::Paused);
        assert_eq!(ctl.clip_count(), 1);
        assert!(!ctl.is_capture_running());

        // Back in the foreground the session resumes and recording can
        // continue where it left off.
        ctl.handle_interruption_ended().await;
        ctl.start().await.unwrap();
        ctl.pause().await.unwrap();
        assert_eq!(ctl.clip_count(), 2);
    }

    #[tokio::test]
    async fn clip_edits_only_while_paused_or_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let err = ctl.delete_clip(0).unwrap_err();
        assert!(matches!(err, RecordingError::InvalidState { .. }));

        ctl.start().await.unwrap();
        ctl.pause().await.unwrap();
        ctl.start().await.unwrap();
        ctl.pause().await.unwrap();
        assert_eq!(ctl.clip_count(), 2);
        ctl.move_clip(0, 1).unwrap();
        ctl.delete_clip(1).unwrap();
        assert_eq!(ctl.clip_count(), 1);
    }
}
