//! Export engine
//!
//! Renders a built timeline asynchronously at a chosen quality tier to a
//! uniquely named output file. One job in flight at a time; a second export
//! call fails fast without touching the running job. Any failure deletes
//! the partial output before the error is surfaced.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::composition::timeline::Timeline;
use crate::export::types::{
    EncoderPreset, ExportError, ExportJob, ExportStatus, ExportedFile, QualityTier,
};
use crate::storage::MediaStore;

/// Blocking render backend. Runs on a worker thread under the engine's
/// async job; implementations should poll `cancel` between units of work.
pub trait RenderBackend: Send + Sync {
    fn render(
        &self,
        timeline: &Timeline,
        preset: EncoderPreset,
        destination: &Path,
        cancel: &AtomicBool,
    ) -> Result<(), ExportError>;
}

/// Async export job runner
pub struct ExportEngine {
    store: MediaStore,
    renderer: Arc<dyn RenderBackend>,
    in_flight: Arc<AtomicBool>,
    cancel_flag: Arc<AtomicBool>,
}

impl ExportEngine {
    pub fn new(store: MediaStore, renderer: Arc<dyn RenderBackend>) -> Self {
        Self {
            store,
            renderer,
            in_flight: Arc::new(AtomicBool::new(false)),
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a job is currently in flight
    pub fn is_exporting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Request cancellation of the running job. Returns false when no job
    /// is in flight.
    pub fn cancel(&self) -> bool {
        if !self.is_exporting() {
            return false;
        }
        tracing::info!("cancelling export");
        self.cancel_flag.store(true, Ordering::SeqCst);
        true
    }

    /// Render `timeline` at `tier` and resolve with the output file.
    ///
    /// Fails fast with [`ExportError::InProgress`] when a job is already
    /// running. Preflight failures (unusable destination) and encoding
    /// failures both delete any partial output.
    pub async fn export(
        &self,
        timeline: Timeline,
        tier: QualityTier,
    ) -> Result<ExportedFile, ExportError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::InProgress);
        }
        self.cancel_flag.store(false, Ordering::SeqCst);

        let result = self.run(timeline, tier).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run(&self, timeline: Timeline, tier: QualityTier) -> Result<ExportedFile, ExportError> {
        let destination = self
            .store
            .export_path()
            .map_err(|e| ExportError::Preflight(format!("export area unavailable: {e}")))?;

        let mut job = ExportJob::new(tier, destination.clone());
        job.status = ExportStatus::Running;
        tracing::info!(
            job = %job.id,
            status = ?job.status,
            clips = timeline.clip_count(),
            duration = timeline.total_duration,
            ?tier,
            "starting export to {:?}",
            destination
        );
        let renderer = Arc::clone(&self.renderer);
        let cancel = Arc::clone(&self.cancel_flag);
        let preset = tier.preset();
        let dest = destination.clone();

        let rendered = tokio::task::spawn_blocking(move || {
            renderer.render(&timeline, preset, &dest, &cancel)
        })
        .await;

        match rendered {
            Ok(Ok(())) => {
                job.status = ExportStatus::Succeeded;
                tracing::info!(
                    job = %job.id,
                    status = ?job.status,
                    "export complete: {:?}",
                    destination
                );
                Ok(ExportedFile {
                    location: destination,
                    quality: tier,
                    rendered_at: chrono::Utc::now(),
                })
            }
            Ok(Err(e)) => {
                job.status = ExportStatus::Failed;
                tracing::error!(job = %job.id, status = ?job.status, "export failed: {e}");
                self.store.delete(&destination);
                Err(e)
            }
            Err(join_err) => {
                job.status = ExportStatus::Failed;
                tracing::error!(
                    job = %job.id,
                    status = ?job.status,
                    "export task panicked: {join_err}"
                );
                self.store.delete(&destination);
                Err(ExportError::Encoding(format!(
                    "render task panicked: {join_err}"
                )))
            }
        }
    }
}

/// Renderer that writes a JSON description of the timeline instead of
/// encoding video. Placeholder backend for tests and headless development.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn render(
        &self,
        timeline: &Timeline,
        _preset: EncoderPreset,
        destination: &Path,
        cancel: &AtomicBool,
    ) -> Result<(), ExportError> {
        if cancel.load(Ordering::SeqCst) {
            return Err(ExportError::Cancelled);
        }
        let manifest = serde_json::to_vec_pretty(timeline)
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
        std::fs::write(destination, manifest)?;
        Ok(())
    }
}
