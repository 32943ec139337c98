//! Owner of the current view transform.
//!
//! Transforms that originate outside the recognizer (fit results, numeric controls) reach
//! the scene through [`ViewportController::apply_transform`]. When a recognizer is attached
//! the transform is routed through it first so its private state matches what is on screen;
//! without one the scene is written directly. Two writes skip that path: a recognizer's own
//! output, which it already holds, and the identity reset that precedes a fit.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::codec;
use crate::consts::SCALE_FLOOR;
use crate::geom::{ContainerBounds, SceneBounds};
use crate::gesture::{BindingId, GestureInput, ZoomGesture};
use crate::scene::SceneGraph;
use crate::transform::{ScaleRange, Transform};

/// Transform state plus the (optional) recognizer bound to the current scene.
#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: Transform,
    gesture: Option<ZoomGesture>,
    binding: Option<BindingId>,
    next_binding: u64,
    range: ScaleRange,
    wheel_sensitivity: f64,
}

impl ViewportController {
    #[must_use]
    pub fn new(range: ScaleRange, wheel_sensitivity: f64) -> Self {
        Self {
            transform: Transform::IDENTITY,
            gesture: None,
            binding: None,
            next_binding: 1,
            range,
            wheel_sensitivity,
        }
    }

    // --- Queries ---

    /// The transform last applied to the scene.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The binding currently accepting gesture input, if any.
    #[must_use]
    pub fn binding(&self) -> Option<BindingId> {
        self.binding
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.gesture.is_some()
    }

    #[must_use]
    pub fn scale_range(&self) -> ScaleRange {
        self.range
    }

    /// Whether the next node click ends a pan and should be ignored. Clears the flag.
    pub fn take_click_suppressed(&mut self) -> bool {
        self.gesture.as_mut().is_some_and(ZoomGesture::take_click_suppressed)
    }

    // --- Lifecycle ---

    /// Bind a fresh recognizer, starting from identity. Any previous binding becomes inert.
    pub fn attach(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;

        self.transform = Transform::IDENTITY;
        let mut gesture = ZoomGesture::new(self.range, self.wheel_sensitivity);
        gesture.set_transform(self.transform);
        self.gesture = Some(gesture);
        self.binding = Some(id);
        log::debug!("viewport: attached gesture binding {}", id.0);
        id
    }

    /// Forget the recognizer and reset to identity. Called when the scene is discarded.
    pub fn detach(&mut self) {
        self.gesture = None;
        self.binding = None;
        self.transform = Transform::IDENTITY;
    }

    // --- Transform writes ---

    /// The single path by which a transform reaches the scene.
    ///
    /// Scale is raised to a strictly positive floor. Returns the transform written.
    pub fn apply_transform(&mut self, scene: &mut dyn SceneGraph, t: Transform) -> Transform {
        let t = t.floored();
        let applied = match self.gesture.as_mut() {
            Some(gesture) => gesture.set_transform(t),
            None => t,
        };
        scene.set_root_transform(&codec::serialize(&applied));
        self.transform = applied;
        applied
    }

    /// Apply an explicitly entered transform. Scale is clamped into the configured range.
    pub fn translate_and_scale(&mut self, scene: &mut dyn SceneGraph, t: Transform) -> Transform {
        self.apply_transform(scene, t.clamped(self.range))
    }

    /// Route one input to the recognizer bound as `binding`.
    ///
    /// Returns the applied transform when the view changed. Inputs for a stale or absent
    /// binding are ignored.
    pub fn on_gesture(
        &mut self,
        binding: BindingId,
        input: GestureInput,
        scene: &mut dyn SceneGraph,
    ) -> Option<Transform> {
        if self.binding != Some(binding) {
            log::trace!("viewport: dropping input for stale binding {}", binding.0);
            return None;
        }
        let next = self.gesture.as_mut()?.handle(input)?;
        scene.set_root_transform(&codec::serialize(&next));
        self.transform = next;
        Some(next)
    }

    /// Centre the scene in the container at the largest scale that fits inside `padding`.
    ///
    /// Returns `None` without touching the scene when the scene cannot be measured or the
    /// container has no area. Running it twice on unchanged geometry yields the same result.
    pub fn fit_to_view(
        &mut self,
        scene: &mut dyn SceneGraph,
        container: Option<ContainerBounds>,
        padding: f64,
    ) -> Option<Transform> {
        let bounds = match scene.bounding_box() {
            Ok(bounds) => bounds,
            Err(e) => {
                log::debug!("viewport: fit skipped, {e}");
                return None;
            }
        };
        let Some((width, height)) = resolve_size(container, scene.client_rect()) else {
            log::debug!("viewport: fit skipped, container has no size");
            return None;
        };
        let fitted = fit_transform(bounds, width, height, padding)?;

        scene.set_root_transform(&codec::serialize(&Transform::IDENTITY));
        scene.clear_view_box();
        Some(self.apply_transform(scene, fitted))
    }
}

/// Compute the transform that centres `bounds` in a `width` x `height` container.
///
/// `None` for degenerate bounds or containers.
#[must_use]
pub fn fit_transform(bounds: SceneBounds, width: f64, height: f64, padding: f64) -> Option<Transform> {
    if bounds.is_degenerate() || ContainerBounds::sized(width, height).is_degenerate() {
        return None;
    }
    let scale_x = (width - 2.0 * padding) / bounds.width;
    let scale_y = (height - 2.0 * padding) / bounds.height;
    let scale = scale_x.min(scale_y).max(SCALE_FLOOR);
    if !scale.is_finite() {
        return None;
    }
    Some(Transform {
        translate_x: (width - bounds.width * scale) / 2.0 - bounds.x * scale,
        translate_y: (height - bounds.height * scale) / 2.0 - bounds.y * scale,
        scale,
    })
}

/// Container size per dimension, falling back to the scene's own rect.
fn resolve_size(container: Option<ContainerBounds>, scene_rect: Option<ContainerBounds>) -> Option<(f64, f64)> {
    let pick = |primary: Option<f64>, fallback: Option<f64>| {
        primary
            .filter(|v| v.is_finite() && *v > 0.0)
            .or_else(|| fallback.filter(|v| v.is_finite() && *v > 0.0))
    };
    let width = pick(container.map(|c| c.width), scene_rect.map(|c| c.width))?;
    let height = pick(container.map(|c| c.height), scene_rect.map(|c| c.height))?;
    Some((width, height))
}
