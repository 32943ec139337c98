//! Seams to the external collaborators: the rendered scene graph and the engine that
//! produces it from markup.
//!
//! The browser host implements these over the DOM and the Mermaid JS engine; the
//! [`crate::svg`] module implements them headlessly over SVG text.

use crate::geom::{ContainerBounds, SceneBounds};

/// The bounding-box query is unsupported or failed. Always handled locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scene bounding box unavailable: {reason}")]
pub struct BoundsUnavailable {
    pub reason: String,
}

impl BoundsUnavailable {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Error returned when the engine cannot produce a scene graph.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The engine rejected the markup.
    #[error("diagram engine failed: {message}")]
    Engine { message: String },
    /// The engine produced SVG that could not be parsed.
    #[error("rendered SVG is malformed: {0}")]
    Svg(#[from] roxmltree::Error),
    /// The rendered SVG has no transformable root group.
    #[error("rendered SVG has no root <g> element")]
    MissingRootGroup,
}

/// An interactive node exposed by the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneNode {
    /// Raw element id as emitted by the engine (e.g. `flowchart-A-0`).
    pub dom_id: String,
    /// Visible label text, when the node has one.
    pub label: Option<String>,
}

/// A rendered diagram rooted at a single transformable group.
pub trait SceneGraph {
    /// Current value of the root group's `transform` attribute.
    fn root_transform(&self) -> Option<String>;

    /// Overwrite the root group's `transform` attribute.
    fn set_root_transform(&mut self, encoded: &str);

    /// Content bounds in the root group's untransformed coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsUnavailable`] when the scene cannot be measured yet.
    fn bounding_box(&self) -> Result<SceneBounds, BoundsUnavailable>;

    /// On-screen rectangle of the scene's outer element, when laid out.
    fn client_rect(&self) -> Option<ContainerBounds>;

    /// Stretch the scene to fill its container and disable native touch/selection.
    fn normalize_sizing(&mut self);

    /// Drop the outer `viewBox` so the root transform alone governs the view.
    fn clear_view_box(&mut self);

    /// Interactive nodes, in document order.
    fn nodes(&self) -> Vec<SceneNode>;

    /// Toggle the hover highlight on the node with `dom_id`.
    fn set_node_highlight(&mut self, dom_id: &str, on: bool);
}

/// How the engine reports that layout has settled after a render request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// Geometry is final when `render` returns.
    Immediate,
    /// The host calls back with the render ticket once layout completes.
    Signal,
    /// No completion signal; wait this many milliseconds and hope layout settled.
    Delay(f64),
}

/// Produces a fresh scene graph from diagram markup.
pub trait RenderEngine {
    /// Replace any previous output with a scene built from `markup`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when the markup cannot be rendered.
    fn render(&mut self, markup: &str) -> Result<Box<dyn SceneGraph>, RenderError>;

    /// How completion of the last render is reported.
    fn completion(&self) -> Completion;
}

/// Reads the viewport container's size on demand.
pub trait Surface {
    fn container_bounds(&self) -> Option<ContainerBounds>;
}

impl<F> Surface for F
where
    F: Fn() -> Option<ContainerBounds>,
{
    fn container_bounds(&self) -> Option<ContainerBounds> {
        self()
    }
}
