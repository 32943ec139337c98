#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, SCALE_FLOOR};
use crate::geom::Point;

/// Affine view transform applied to the scene root: translate, then uniform scale.
///
/// `translate_x` / `translate_y` are in container pixels.
/// `scale` is a zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 };

    #[must_use]
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self { translate_x, translate_y, scale }
    }

    /// Raise the scale to the positive floor. Non-finite scales collapse to the floor too.
    #[must_use]
    pub fn floored(self) -> Self {
        let scale = if self.scale.is_finite() { self.scale.max(SCALE_FLOOR) } else { SCALE_FLOOR };
        Self { scale, ..self }
    }

    /// Clamp the scale into `range`, keeping the translation.
    #[must_use]
    pub fn clamped(self, range: ScaleRange) -> Self {
        Self { scale: range.clamp(self.scale), ..self }
    }

    /// Convert a container-space point to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a scene-space point to container coordinates.
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point {
            x: scene.x * self.scale + self.translate_x,
            y: scene.y * self.scale + self.translate_y,
        }
    }

    /// Rescale to `scale` while keeping the scene point under `anchor` fixed on screen.
    #[must_use]
    pub fn zoomed_about(&self, anchor: Point, scale: f64) -> Self {
        let pinned = self.screen_to_scene(anchor);
        Self {
            translate_x: anchor.x - pinned.x * scale,
            translate_y: anchor.y - pinned.y * scale,
            scale,
        }
    }

    /// Component-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.translate_x - other.translate_x).abs() <= epsilon
            && (self.translate_y - other.translate_y).abs() <= epsilon
            && (self.scale - other.scale).abs() <= epsilon
    }
}

/// Inclusive scale bounds for gestures and explicit controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_SCALE, max: DEFAULT_MAX_SCALE }
    }
}

impl ScaleRange {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `scale` into the range. NaN maps to the lower bound.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }
}
