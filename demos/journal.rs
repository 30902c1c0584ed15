//! Headless walkthrough of a full record, pause, stop, export cycle.
//!
//! Run with: cargo run --example journal

use std::sync::Arc;

use cliproll::capture::{RawOrientation, StubCaptureBackend};
use cliproll::export::{ExportEngine, NullRenderer};
use cliproll::recorder::{RecordingSessionController, SessionEvent, SessionOptions};
use cliproll::{MediaStore, OutputMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let scratch = tempfile::tempdir()?;
    let store = MediaStore::new(scratch.path());
    let engine = Arc::new(ExportEngine::new(store.clone(), Arc::new(NullRenderer)));

    let options = SessionOptions {
        output_mode: OutputMode::Video,
        ..SessionOptions::default()
    };
    let mut controller = RecordingSessionController::new(
        Box::new(StubCaptureBackend::default()),
        store,
        engine,
        options,
    );

    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::DurationTick { display: elapsed, .. } => {
                    tracing::info!("recording {elapsed}");
                }
                other => tracing::info!("session event: {other:?}"),
            }
        }
    });

    // Record two clips with a pause in between.
    controller.handle_orientation(RawOrientation::Portrait);
    controller.start().await?;
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    controller.pause().await?;

    controller.start().await?;
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    controller.pause().await?;

    let clips = controller.stop(false).await?;
    tracing::info!("stopped with {} clips", clips.len());

    let tier = controller.options().quality_tier;
    let result = controller.export(tier)?.await?;
    match result {
        Ok(file) => tracing::info!("exported {:?}", file.location),
        Err(err) => tracing::error!("export failed: {err}"),
    }
    Ok(())
}
