//! Timeline construction
//!
//! Builds a single normalized timeline from an ordered clip list: per-clip
//! time ranges, aspect-preserving fit transforms into the render frame, and
//! a hard-cut opacity schedule at every clip boundary.

use thiserror::Error;

use crate::composition::timeline::{LayerInstruction, Timeline, TIMELINE_FRAME_RATE};
use crate::composition::transform::{PixelSize, Transform2D};
use crate::recorder::clips::Clip;

/// Errors from timeline construction
#[derive(Error, Debug, PartialEq)]
pub enum CompositionError {
    #[error("cannot build a timeline from an empty clip list")]
    EmptyComposition,

    #[error("render size {0} has a zero dimension")]
    InvalidRenderSize(PixelSize),
}

/// Build a timeline placing `clips` back to back inside `render_size`.
///
/// Pure function: reads clip metadata only, no I/O. Each clip is scaled to
/// fit entirely inside the render frame (letterbox/pillarbox, never crop)
/// and centered; all but the last clip get a zero-opacity keyframe at their
/// end time so the next clip appears as an instant cut.
pub fn build_timeline(
    clips: &[Clip],
    render_size: PixelSize,
) -> Result<Timeline, CompositionError> {
    if clips.is_empty() {
        return Err(CompositionError::EmptyComposition);
    }
    if render_size.is_zero() {
        return Err(CompositionError::InvalidRenderSize(render_size));
    }

    let mut layers = Vec::with_capacity(clips.len());
    let mut cursor = 0.0_f64;

    for (index, clip) in clips.iter().enumerate() {
        let is_last = index == clips.len() - 1;
        let transform = fit_transform(clip, render_size);

        let layer = LayerInstruction {
            clip: clip.clone(),
            start: cursor,
            duration: clip.duration,
            transform,
            opacity_cut: (!is_last).then_some(cursor + clip.duration),
        };
        cursor += clip.duration;
        layers.push(layer);
    }

    tracing::debug!(
        clips = clips.len(),
        total_duration = cursor,
        render_size = %render_size,
        "built timeline"
    );

    Ok(Timeline {
        render_size,
        frame_rate: TIMELINE_FRAME_RATE,
        total_duration: cursor,
        layers,
    })
}

/// Uniform scale factor that fits the clip inside the render frame without
/// cropping. Portrait sources present with their natural axes exchanged, so
/// the ratios are computed against the swapped dimensions.
pub fn scale_to_fit(clip: &Clip, render_size: PixelSize) -> f64 {
    let source = if clip.preferred_transform.is_portrait() {
        clip.natural_size.swapped()
    } else {
        clip.natural_size
    };
    let width_ratio = render_size.width as f64 / source.width as f64;
    let height_ratio = render_size.height as f64 / source.height as f64;
    width_ratio.min(height_ratio)
}

/// Composite transform for one clip: preferred transform, then scale to fit,
/// then a translation centering the scaled frame in the render frame.
fn fit_transform(clip: &Clip, render_size: PixelSize) -> Transform2D {
    let ratio = scale_to_fit(clip, render_size);

    let presented = if clip.preferred_transform.is_portrait() {
        clip.natural_size.swapped()
    } else {
        clip.natural_size
    };
    let scaled_w = presented.width as f64 * ratio;
    let scaled_h = presented.height as f64 * ratio;

    // Unused margin split evenly on each side.
    let x_fix = (render_size.width as f64 - scaled_w) / 2.0;
    let y_fix = (render_size.height as f64 - scaled_h) / 2.0;

    clip.preferred_transform
        .concat(&Transform2D::scale(ratio, ratio))
        .concat(&Transform2D::translation(x_fix, y_fix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn clip(duration: f64, size: PixelSize, transform: Transform2D) -> Clip {
        Clip::new(PathBuf::from("clip.mov"), duration, size, transform)
    }

    #[test]
    fn empty_clip_list_is_an_error() {
        let err = build_timeline(&[], PixelSize::new(1920, 1080)).unwrap_err();
        assert_eq!(err, CompositionError::EmptyComposition);
    }

    #[test]
    fn zero_render_size_is_an_error() {
        let clips = vec![clip(1.0, PixelSize::new(1920, 1080), Transform2D::identity())];
        let err = build_timeline(&clips, PixelSize::new(0, 1080)).unwrap_err();
        assert!(matches!(err, CompositionError::InvalidRenderSize(_)));
    }

    #[test]
    fn single_clip_has_no_opacity_cut() {
        let clips = vec![clip(2.0, PixelSize::new(1920, 1080), Transform2D::identity())];
        let timeline = build_timeline(&clips, PixelSize::new(1920, 1080)).unwrap();
        assert_eq!(timeline.clip_count(), 1);
        assert!(timeline.layers[0].opacity_cut.is_none());
        assert!((timeline.total_duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn matching_portrait_clip_gets_identity_scale() {
        // 1080x1920 portrait source (natural 1920x1080 rotated 90 degrees)
        // into a 1080x1920 render frame: scale factor must be exactly 1.
        let portrait = clip(
            3.0,
            PixelSize::new(1920, 1080),
            Transform2D::rotation_quarter_turns(1),
        );
        let render = PixelSize::new(1080, 1920);
        assert!((scale_to_fit(&portrait, render) - 1.0).abs() < 1e-12);

        let timeline = build_timeline(&[portrait], render).unwrap();
        let t = &timeline.layers[0].transform;
        // Linear part is the bare quarter turn; centering adds no offset
        // beyond the rotation itself.
        assert_eq!(t.a, 0.0);
        assert_eq!(t.b, 1.0);
        assert_eq!(t.c, -1.0);
        assert_eq!(t.d, 0.0);
    }

    #[test]
    fn scale_never_crops() {
        let render = PixelSize::new(1280, 720);
        let sources = [
            clip(1.0, PixelSize::new(1920, 1080), Transform2D::identity()),
            clip(1.0, PixelSize::new(640, 480), Transform2D::identity()),
            clip(
                1.0,
                PixelSize::new(1920, 1080),
                Transform2D::rotation_quarter_turns(1),
            ),
        ];
        for source in &sources {
            let ratio = scale_to_fit(source, render);
            let presented = if source.preferred_transform.is_portrait() {
                source.natural_size.swapped()
            } else {
                source.natural_size
            };
            assert!(presented.width as f64 * ratio <= render.width as f64 + 1e-9);
            assert!(presented.height as f64 * ratio <= render.height as f64 + 1e-9);
        }
    }

    #[test]
    fn cuts_fall_on_cumulative_boundaries() {
        let clips = vec![
            clip(1.5, PixelSize::new(1920, 1080), Transform2D::identity()),
            clip(2.0, PixelSize::new(1920, 1080), Transform2D::identity()),
            clip(0.5, PixelSize::new(1920, 1080), Transform2D::identity()),
        ];
        let timeline = build_timeline(&clips, PixelSize::new(1920, 1080)).unwrap();
        assert_eq!(timeline.layers[0].opacity_cut, Some(1.5));
        assert_eq!(timeline.layers[1].opacity_cut, Some(3.5));
        assert_eq!(timeline.layers[2].opacity_cut, None);
        assert!((timeline.total_duration - 4.0).abs() < 1e-9);
        assert!((timeline.layers[2].start - 3.5).abs() < 1e-9);
    }

    #[test]
    fn undersized_clip_is_centered() {
        // 640x480 into 1280x720: fit ratio is 1.5 on height, 2.0 on width,
        // so height binds (ratio 1.5), scaled frame is 960x720 and the
        // 320px horizontal margin splits evenly.
        let c = clip(1.0, PixelSize::new(640, 480), Transform2D::identity());
        let timeline = build_timeline(&[c], PixelSize::new(1280, 720)).unwrap();
        let t = &timeline.layers[0].transform;
        assert!((t.a - 1.5).abs() < 1e-9);
        assert!((t.tx - 160.0).abs() < 1e-9);
        assert!((t.ty - 0.0).abs() < 1e-9);
    }
}
