//! Read-only projection of scene geometry and the live transform.
//!
//! ARCHITECTURE
//! ============
//! The reporter reads state back from the scene (its on-screen rect, its root transform
//! attribute, its bounding box) rather than trusting the controller's copy, so whatever is
//! actually on screen is what gets shown. The same read also resynchronizes the paired
//! controls, which is how gesture-driven changes reach the sliders.

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

use crate::codec;
use crate::controls::TransformControls;
use crate::scene::SceneGraph;
use crate::transform::Transform;

/// Text shown in the metrics panel, one field per display slot.
///
/// Empty until the first successful refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsDisplay {
    /// Scene element position and size in CSS pixels, rounded.
    pub svg_x: String,
    pub svg_y: String,
    pub svg_w: String,
    pub svg_h: String,
    /// Root transform: translation to 2 decimals, scale to 3.
    pub g_tx: String,
    pub g_ty: String,
    pub g_scale: String,
    /// Root group content size, rounded. Left unchanged when unmeasurable.
    pub g_w: String,
    pub g_h: String,
}

#[derive(Debug, Clone, Default)]
pub struct MetricsReporter {
    display: MetricsDisplay,
}

impl MetricsReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn display(&self) -> &MetricsDisplay {
        &self.display
    }

    /// Re-read geometry and transform from `scene` into the display and `controls`.
    ///
    /// No-op returning `None` when there is no scene. Returns the transform read back.
    pub fn refresh(&mut self, scene: Option<&dyn SceneGraph>, controls: &mut TransformControls) -> Option<Transform> {
        let scene = scene?;

        if let Some(rect) = scene.client_rect() {
            self.display.svg_x = rounded(rect.left);
            self.display.svg_y = rounded(rect.top);
            self.display.svg_w = rounded(rect.width);
            self.display.svg_h = rounded(rect.height);
        }

        let t = codec::parse_attr(scene.root_transform().as_deref());
        self.display.g_tx = format!("{:.2}", t.translate_x);
        self.display.g_ty = format!("{:.2}", t.translate_y);
        self.display.g_scale = format!("{:.3}", t.scale);
        controls.sync_from(t);

        match scene.bounding_box() {
            Ok(bounds) => {
                self.display.g_w = rounded(bounds.width);
                self.display.g_h = rounded(bounds.height);
            }
            Err(e) => log::trace!("metrics: size unknown, {e}"),
        }
        Some(t)
    }
}

/// Round half toward positive infinity and print as an integer.
fn rounded(v: f64) -> String {
    // `+ 0.0` folds -0 into 0.
    format!("{:.0}", (v + 0.5).floor() + 0.0)
}
