//! FFmpeg-backed rendering and media probing
//!
//! The renderer shells out to the `ffmpeg` CLI with a filter graph built
//! from the timeline: one input per clip, per-layer orientation transpose,
//! aspect-preserving scale, centered pad, then a concat that realizes the
//! hard-cut schedule (each layer ends exactly where the next begins).
//! `ffprobe` supplies clip metadata for backends that finalize real files.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capture::traits::SegmentFile;
use crate::composition::timeline::{LayerInstruction, Timeline};
use crate::composition::transform::{FrameOrientation, PixelSize, Transform2D};
use crate::export::engine::RenderBackend;
use crate::export::types::{EncoderPreset, ExportError};

/// Metadata read from a media file via ffprobe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Playable duration in seconds
    pub duration: f64,
    /// Rotation stamped on the video stream, in degrees
    pub rotation: i32,
    pub codec: String,
}

/// Renderer invoking the ffmpeg CLI
#[derive(Debug, Default)]
pub struct FfmpegRenderer;

impl RenderBackend for FfmpegRenderer {
    fn render(
        &self,
        timeline: &Timeline,
        preset: EncoderPreset,
        destination: &Path,
        cancel: &AtomicBool,
    ) -> Result<(), ExportError> {
        if cancel.load(Ordering::SeqCst) {
            return Err(ExportError::Cancelled);
        }

        let args = build_encode_args(timeline, preset, destination);
        tracing::debug!("ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExportError::Encoding(format!("failed to start ffmpeg: {e}")))?;

        // Poll so a cancel request can tear the encode down promptly.
        loop {
            if cancel.load(Ordering::SeqCst) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExportError::Cancelled);
            }
            match child.try_wait() {
                Ok(Some(status)) => {
                    if status.success() {
                        return Ok(());
                    }
                    let mut stderr = String::new();
                    if let Some(mut pipe) = child.stderr.take() {
                        use std::io::Read;
                        let _ = pipe.read_to_string(&mut stderr);
                    }
                    return Err(ExportError::Encoding(format!(
                        "ffmpeg exited with {status}: {}",
                        stderr.lines().last().unwrap_or("")
                    )));
                }
                Ok(None) => std::thread::sleep(Duration::from_millis(100)),
                Err(e) => {
                    return Err(ExportError::Encoding(format!(
                        "failed to wait for ffmpeg: {e}"
                    )))
                }
            }
        }
    }
}

/// Transpose filter presenting a rotated source upright, if one is needed
fn transpose_filter(orientation: FrameOrientation) -> Option<&'static str> {
    match orientation {
        FrameOrientation::Up => None,
        FrameOrientation::Right => Some("transpose=1"),
        FrameOrientation::Left => Some("transpose=2"),
        FrameOrientation::Down => Some("hflip,vflip"),
    }
}

/// Filter chain normalizing one layer into the render frame
fn build_layer_filter(
    index: usize,
    layer: &LayerInstruction,
    render_size: PixelSize,
    frame_rate: u32,
) -> String {
    let mut chain: Vec<String> = Vec::new();
    if let Some(t) = transpose_filter(layer.clip.preferred_transform.orientation()) {
        chain.push(t.to_string());
    }
    chain.push(format!(
        "scale={w}:{h}:force_original_aspect_ratio=decrease",
        w = render_size.width,
        h = render_size.height
    ));
    chain.push(format!(
        "pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:black",
        w = render_size.width,
        h = render_size.height
    ));
    chain.push("setsar=1".to_string());
    chain.push(format!("fps={frame_rate}"));

    format!("[{index}:v]{}[v{index}]", chain.join(","))
}

/// Full filter graph for a timeline; outputs are `[vout]` and `[aout]`
pub fn build_filter_graph(timeline: &Timeline) -> String {
    let mut parts = Vec::new();
    let mut concat_inputs = String::new();

    for (index, layer) in timeline.layers.iter().enumerate() {
        parts.push(build_layer_filter(
            index,
            layer,
            timeline.render_size,
            timeline.frame_rate,
        ));
        parts.push(format!("[{index}:a]asetpts=PTS-STARTPTS[a{index}]"));
        concat_inputs.push_str(&format!("[v{index}][a{index}]"));
    }

    parts.push(format!(
        "{concat_inputs}concat=n={}:v=1:a=1[vout][aout]",
        timeline.layers.len()
    ));
    parts.join(";")
}

/// Complete ffmpeg argument list for encoding a timeline
fn build_encode_args(
    timeline: &Timeline,
    preset: EncoderPreset,
    destination: &Path,
) -> Vec<String> {
    let mut args = vec!["-y".to_string()];
    for layer in &timeline.layers {
        args.push("-i".to_string());
        args.push(layer.clip.location.to_string_lossy().into_owned());
    }
    args.extend([
        "-filter_complex".to_string(),
        build_filter_graph(timeline),
        "-map".to_string(),
        "[vout]".to_string(),
        "-map".to_string(),
        "[aout]".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-crf".to_string(),
        preset.crf.to_string(),
        "-preset".to_string(),
        preset.speed.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-c:a".to_string(),
        "aac".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        destination.to_string_lossy().into_owned(),
    ]);
    args
}

/// Parse an ffprobe frame-rate string ("30/1", "30000/1001" or "29.97")
fn parse_frame_rate(raw: &str) -> f64 {
    if let Some((num, den)) = raw.split_once('/') {
        let num: f64 = num.parse().unwrap_or(0.0);
        let den: f64 = den.parse().unwrap_or(1.0);
        if den > 0.0 {
            num / den
        } else {
            0.0
        }
    } else {
        raw.parse().unwrap_or(0.0)
    }
}

/// Map a stream rotation tag to the equivalent preferred transform
pub fn transform_for_rotation(degrees: i32) -> Transform2D {
    Transform2D::rotation_quarter_turns(degrees.div_euclid(90))
}

/// Probe a media file with ffprobe
pub fn probe_video(path: &Path) -> Result<VideoMetadata, ExportError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
            "-select_streams",
            "v:0",
            path.to_str().unwrap_or(""),
        ])
        .output()
        .map_err(|e| ExportError::Preflight(format!("failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(ExportError::Preflight(format!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| ExportError::Preflight(format!("unreadable ffprobe output: {e}")))?;

    let stream = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|s| s.first())
        .ok_or_else(|| ExportError::Preflight("no video stream found".into()))?;

    let width = stream.get("width").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
    let height = stream.get("height").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
    let codec = stream
        .get("codec_name")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();
    let fps = stream
        .get("r_frame_rate")
        .and_then(|v| v.as_str())
        .map(parse_frame_rate)
        .unwrap_or(0.0);

    // Rotation lives either in stream tags or display-matrix side data.
    let rotation = stream
        .get("tags")
        .and_then(|t| t.get("rotate"))
        .and_then(|r| r.as_str())
        .and_then(|r| r.parse::<i32>().ok())
        .or_else(|| {
            stream
                .get("side_data_list")
                .and_then(|l| l.as_array())
                .and_then(|l| l.first())
                .and_then(|d| d.get("rotation"))
                .and_then(|r| r.as_i64())
                .map(|r| r as i32)
        })
        .unwrap_or(0);

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoMetadata {
        width,
        height,
        fps,
        duration,
        rotation,
        codec,
    })
}

/// Build segment metadata from a finalized media file. Real capture
/// backends use this in `finish_segment`.
pub fn probe_segment(path: &Path) -> Result<SegmentFile, ExportError> {
    let meta = probe_video(path)?;
    Ok(SegmentFile {
        location: path.to_path_buf(),
        duration: meta.duration,
        natural_size: PixelSize::new(meta.width, meta.height),
        preferred_transform: transform_for_rotation(meta.rotation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::build_timeline;
    use crate::recorder::clips::Clip;
    use std::path::PathBuf;

    fn timeline_for(clips: Vec<Clip>, render: PixelSize) -> Timeline {
        build_timeline(&clips, render).unwrap()
    }

    fn landscape_clip(name: &str) -> Clip {
        Clip::new(
            PathBuf::from(name),
            1.0,
            PixelSize::new(1920, 1080),
            Transform2D::identity(),
        )
    }

    fn portrait_clip(name: &str) -> Clip {
        Clip::new(
            PathBuf::from(name),
            1.0,
            PixelSize::new(1920, 1080),
            Transform2D::rotation_quarter_turns(1),
        )
    }

    #[test]
    fn single_clip_graph() {
        let timeline = timeline_for(vec![landscape_clip("a.mov")], PixelSize::new(1280, 720));
        let graph = build_filter_graph(&timeline);
        assert_eq!(
            graph,
            "[0:v]scale=1280:720:force_original_aspect_ratio=decrease,\
             pad=1280:720:(ow-iw)/2:(oh-ih)/2:black,setsar=1,fps=30[v0];\
             [0:a]asetpts=PTS-STARTPTS[a0];\
             [v0][a0]concat=n=1:v=1:a=1[vout][aout]"
        );
    }

    #[test]
    fn portrait_clip_gets_transposed() {
        let timeline = timeline_for(vec![portrait_clip("a.mov")], PixelSize::new(1080, 1920));
        let graph = build_filter_graph(&timeline);
        assert!(graph.starts_with("[0:v]transpose=1,scale=1080:1920"));
    }

    #[test]
    fn multi_clip_graph_concats_in_order() {
        let timeline = timeline_for(
            vec![landscape_clip("a.mov"), landscape_clip("b.mov")],
            PixelSize::new(1280, 720),
        );
        let graph = build_filter_graph(&timeline);
        assert!(graph.ends_with("[v0][a0][v1][a1]concat=n=2:v=1:a=1[vout][aout]"));
    }

    #[test]
    fn encode_args_carry_preset() {
        let timeline = timeline_for(vec![landscape_clip("a.mov")], PixelSize::new(1280, 720));
        let args = build_encode_args(
            &timeline,
            crate::export::types::QualityTier::High.preset(),
            Path::new("/tmp/out.mov"),
        );
        let joined = args.join(" ");
        assert!(joined.contains("-crf 18"));
        assert!(joined.contains("-preset slow"));
        assert!(joined.contains("-i a.mov"));
    }

    #[test]
    fn frame_rate_parsing() {
        assert!((parse_frame_rate("30/1") - 30.0).abs() < 1e-9);
        assert!((parse_frame_rate("30000/1001") - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97") - 29.97).abs() < 1e-9);
    }

    #[test]
    fn rotation_maps_to_quarter_turns() {
        assert_eq!(
            transform_for_rotation(90).orientation(),
            FrameOrientation::Right
        );
        assert_eq!(
            transform_for_rotation(-90).orientation(),
            FrameOrientation::Left
        );
        assert_eq!(
            transform_for_rotation(180).orientation(),
            FrameOrientation::Down
        );
        assert_eq!(transform_for_rotation(0).orientation(), FrameOrientation::Up);
    }
}
