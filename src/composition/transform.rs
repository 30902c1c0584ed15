//! 2D affine transform maths for clip geometry
//!
//! Transforms follow the convention recorded by capture devices:
//! a point maps as `x' = a*x + c*y + tx`, `y' = b*x + d*y + ty`.

use serde::{Deserialize, Serialize};

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether the frame is taller than it is wide
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// Same frame with the axes exchanged
    pub fn swapped(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Source orientation denoted by a clip's preferred transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameOrientation {
    /// Identity transform, frame is already right-side-up
    Up,
    /// 180 degree rotation
    Down,
    /// -90 degree rotation (portrait source)
    Left,
    /// 90 degree rotation (portrait source)
    Right,
}

impl FrameOrientation {
    /// Portrait sources have their natural width/height exchanged when
    /// presented right-side-up.
    pub fn is_portrait(&self) -> bool {
        matches!(self, FrameOrientation::Left | FrameOrientation::Right)
    }
}

/// 2D affine transform `[a b c d tx ty]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform2D {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Rotation by `turns * 90` degrees counter-clockwise, normalized to a
    /// quarter-turn so the matrix stays exact.
    pub fn rotation_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::identity(),
            1 => Self::new(0.0, 1.0, -1.0, 0.0, 0.0, 0.0),
            2 => Self::new(-1.0, 0.0, 0.0, -1.0, 0.0, 0.0),
            _ => Self::new(0.0, -1.0, 1.0, 0.0, 0.0, 0.0),
        }
    }

    /// Composition that applies `self` first, then `other`.
    pub fn concat(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.tx * other.a + self.ty * other.c + other.tx,
            ty: self.tx * other.b + self.ty * other.d + other.ty,
        }
    }

    pub fn apply_to_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }

    /// Size of a `width * height` frame after the linear part of the
    /// transform, with negative extents folded back to positive.
    pub fn apply_to_size(&self, size: PixelSize) -> PixelSize {
        let w = self.a * size.width as f64 + self.c * size.height as f64;
        let h = self.b * size.width as f64 + self.d * size.height as f64;
        PixelSize::new(w.abs().round() as u32, h.abs().round() as u32)
    }

    /// Classify the rotation/mirroring a capture device recorded.
    ///
    /// Only the four exact quarter-turn matrices are recognized; anything
    /// else is treated as an upright landscape source.
    pub fn orientation(&self) -> FrameOrientation {
        if self.a == 0.0 && self.b == 1.0 && self.c == -1.0 && self.d == 0.0 {
            FrameOrientation::Right
        } else if self.a == 0.0 && self.b == -1.0 && self.c == 1.0 && self.d == 0.0 {
            FrameOrientation::Left
        } else if self.a == -1.0 && self.b == 0.0 && self.c == 0.0 && self.d == -1.0 {
            FrameOrientation::Down
        } else {
            FrameOrientation::Up
        }
    }

    /// Whether the transform denotes a portrait source.
    pub fn is_portrait(&self) -> bool {
        self.orientation().is_portrait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_orientations() {
        assert_eq!(
            Transform2D::rotation_quarter_turns(1).orientation(),
            FrameOrientation::Right
        );
        assert_eq!(
            Transform2D::rotation_quarter_turns(-1).orientation(),
            FrameOrientation::Left
        );
        assert_eq!(
            Transform2D::rotation_quarter_turns(2).orientation(),
            FrameOrientation::Down
        );
        assert_eq!(
            Transform2D::identity().orientation(),
            FrameOrientation::Up
        );
    }

    #[test]
    fn portrait_transform_swaps_size() {
        let rot = Transform2D::rotation_quarter_turns(1);
        let size = rot.apply_to_size(PixelSize::new(1920, 1080));
        assert_eq!(size, PixelSize::new(1080, 1920));
    }

    #[test]
    fn concat_applies_left_to_right() {
        let scale = Transform2D::scale(2.0, 2.0);
        let translate = Transform2D::translation(10.0, 20.0);
        let combined = scale.concat(&translate);
        assert_eq!(combined.apply_to_point(3.0, 4.0), (16.0, 28.0));
    }

    #[test]
    fn unrecognized_matrix_reads_as_landscape() {
        let skew = Transform2D::new(1.0, 0.2, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(skew.orientation(), FrameOrientation::Up);
        assert!(!skew.is_portrait());
    }
}
