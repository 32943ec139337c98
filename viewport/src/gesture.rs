//! Pointer-driven pan/zoom recognizer bound to the scene's interactive surface.
//!
//! `ZoomGesture` keeps its own copy of the view transform. Every input is interpreted
//! against that private copy, so a transform written from elsewhere (fit, numeric
//! controls) must be pushed in through [`ZoomGesture::set_transform`] or the next
//! gesture would continue from a stale origin and jump.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::consts::{DOUBLE_CLICK_ZOOM, PINCH_WHEEL_MULTIPLIER};
use crate::geom::Point;
use crate::transform::{ScaleRange, Transform};

/// Identifies one attach of a recognizer to a scene graph.
///
/// The host tags forwarded inputs with the id it was handed; inputs carrying an older id
/// belong to a replaced scene and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u64);

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Raw input forwarded from the interactive surface, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureInput {
    PointerDown { point: Point, button: Button },
    PointerMove { point: Point },
    PointerUp { point: Point },
    /// `dy` is in pixels, positive = scroll down = zoom out.
    Wheel { point: Point, dy: f64, ctrl: bool },
    DoubleClick { point: Point, shift: bool },
}

#[derive(Debug, Clone, Copy, Default)]
enum DragState {
    #[default]
    Idle,
    Panning {
        /// Screen position of the previous pointer event.
        last: Point,
        /// The view has moved since the press.
        moved: bool,
    },
}

/// Pan/zoom recognizer with a bounded scale extent.
#[derive(Debug, Clone)]
pub struct ZoomGesture {
    transform: Transform,
    range: ScaleRange,
    wheel_sensitivity: f64,
    drag: DragState,
    /// The last press ended a pan that moved, so the click it produces is swallowed.
    click_suppressed: bool,
}

impl ZoomGesture {
    #[must_use]
    pub fn new(range: ScaleRange, wheel_sensitivity: f64) -> Self {
        Self { transform: Transform::IDENTITY, range, wheel_sensitivity, drag: DragState::Idle, click_suppressed: false }
    }

    /// The recognizer's private view of the current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.drag, DragState::Panning { .. })
    }

    /// Whether the click following the last release belongs to a pan. Clears the flag.
    pub fn take_click_suppressed(&mut self) -> bool {
        std::mem::take(&mut self.click_suppressed)
    }

    /// Replace the private state and return the transform to apply to the scene.
    ///
    /// The scale extent is not enforced here; it constrains gestures only.
    pub fn set_transform(&mut self, t: Transform) -> Transform {
        self.transform = t;
        self.transform
    }

    /// Interpret one input. Returns the new transform when the view changed.
    pub fn handle(&mut self, input: GestureInput) -> Option<Transform> {
        match input {
            GestureInput::PointerDown { point, button } => {
                self.click_suppressed = false;
                if button == Button::Primary {
                    self.drag = DragState::Panning { last: point, moved: false };
                }
                None
            }
            GestureInput::PointerMove { point } => {
                let DragState::Panning { last, moved } = self.drag else {
                    return None;
                };
                let panned = self.pan_by(point.x - last.x, point.y - last.y);
                self.drag = DragState::Panning { last: point, moved: moved || panned.is_some() };
                panned
            }
            GestureInput::PointerUp { .. } => {
                if let DragState::Panning { moved, .. } = self.drag {
                    self.click_suppressed = moved;
                }
                self.drag = DragState::Idle;
                None
            }
            GestureInput::Wheel { point, dy, ctrl } => {
                let multiplier = if ctrl { PINCH_WHEEL_MULTIPLIER } else { 1.0 };
                let factor = (-dy * self.wheel_sensitivity * multiplier).exp2();
                self.zoom_to(point, self.transform.scale * factor)
            }
            GestureInput::DoubleClick { point, shift } => {
                let factor = if shift { 1.0 / DOUBLE_CLICK_ZOOM } else { DOUBLE_CLICK_ZOOM };
                self.zoom_to(point, self.transform.scale * factor)
            }
        }
    }

    fn pan_by(&mut self, dx: f64, dy: f64) -> Option<Transform> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
        Some(self.transform)
    }

    fn zoom_to(&mut self, anchor: Point, scale: f64) -> Option<Transform> {
        let scale = self.range.clamp(scale);
        if (scale - self.transform.scale).abs() < f64::EPSILON {
            return None;
        }
        self.transform = self.transform.zoomed_about(anchor, scale);
        Some(self.transform)
    }
}
