//! `SceneGraph` over the `<svg>` Mermaid inserts into the diagram container.
//!
//! The engine lays out asynchronously, so nothing is cached: every call looks the `<svg>`
//! and its first `<g>` up again and quietly does nothing while they are missing.

use viewport::geom::{ContainerBounds, SceneBounds};
use viewport::scene::{BoundsUnavailable, SceneGraph, SceneNode};
use wasm_bindgen::JsCast;
use web_sys::{Element, SvgElement, SvgGraphicsElement};

const HIGHLIGHT_FILL: &str = "lightblue";
const SHAPE_SELECTOR: &str = "rect, polygon";

pub struct DomScene {
    container: Element,
}

impl DomScene {
    #[must_use]
    pub fn new(container: Element) -> Self {
        Self { container }
    }

    /// The rendered `<svg>`, once the engine has produced it.
    pub fn svg(&self) -> Option<Element> {
        query(&self.container, "svg")
    }

    fn root_group(&self) -> Option<Element> {
        query(&self.svg()?, "g")
    }

    fn node_element(&self, dom_id: &str) -> Option<Element> {
        let svg = self.svg()?;
        all(&svg, ".node").into_iter().find(|el| el.id() == dom_id)
    }
}

impl SceneGraph for DomScene {
    fn root_transform(&self) -> Option<String> {
        self.root_group()?.get_attribute("transform")
    }

    fn set_root_transform(&mut self, encoded: &str) {
        let Some(g) = self.root_group() else {
            return;
        };
        if let Err(e) = g.set_attribute("transform", encoded) {
            log::warn!("dom: transform write failed: {e:?}");
        }
    }

    fn bounding_box(&self) -> Result<SceneBounds, BoundsUnavailable> {
        let g = self
            .root_group()
            .ok_or_else(|| BoundsUnavailable::new("no rendered root group"))?;
        let graphics = g
            .dyn_into::<SvgGraphicsElement>()
            .map_err(|_| BoundsUnavailable::new("root group is not an SVG graphics element"))?;
        let rect = graphics
            .get_b_box()
            .map_err(|e| BoundsUnavailable::new(format!("getBBox threw: {e:?}")))?;
        Ok(SceneBounds::new(
            f64::from(rect.x()),
            f64::from(rect.y()),
            f64::from(rect.width()),
            f64::from(rect.height()),
        ))
    }

    fn client_rect(&self) -> Option<ContainerBounds> {
        let rect = self.svg()?.get_bounding_client_rect();
        Some(ContainerBounds { left: rect.x(), top: rect.y(), width: rect.width(), height: rect.height() })
    }

    fn normalize_sizing(&mut self) {
        let Some(svg) = self.svg().and_then(|el| el.dyn_into::<SvgElement>().ok()) else {
            return;
        };
        let style = svg.style();
        for (prop, value) in [
            ("overflow", "hidden"),
            ("min-width", "100%"),
            ("min-height", "100%"),
            ("touch-action", "none"),
            ("user-select", "none"),
            ("-webkit-user-drag", "none"),
            ("-webkit-tap-highlight-color", "rgba(0, 0, 0, 0)"),
        ] {
            if let Err(e) = style.set_property(prop, value) {
                log::debug!("dom: style {prop} rejected: {e:?}");
            }
        }
    }

    fn clear_view_box(&mut self) {
        if let Some(svg) = self.svg() {
            if let Err(e) = svg.remove_attribute("viewBox") {
                log::debug!("dom: viewBox removal failed: {e:?}");
            }
        }
    }

    fn nodes(&self) -> Vec<SceneNode> {
        let Some(svg) = self.svg() else {
            return Vec::new();
        };
        all(&svg, ".node")
            .into_iter()
            .filter(|el| !el.id().is_empty())
            .map(|el| SceneNode {
                dom_id: el.id(),
                label: query(&el, ".nodeLabel").and_then(|label| label.text_content()),
            })
            .collect()
    }

    fn set_node_highlight(&mut self, dom_id: &str, on: bool) {
        let Some(node) = self.node_element(dom_id) else {
            return;
        };
        let fill = if on { HIGHLIGHT_FILL } else { "" };
        for shape in all(&node, SHAPE_SELECTOR) {
            let Ok(shape) = shape.dyn_into::<SvgElement>() else {
                continue;
            };
            if let Err(e) = shape.style().set_property("fill", fill) {
                log::debug!("dom: highlight on {dom_id} failed: {e:?}");
            }
        }
    }
}

/// First match of `selector` under `root`.
pub fn query(root: &Element, selector: &str) -> Option<Element> {
    match root.query_selector(selector) {
        Ok(found) => found,
        Err(e) => {
            log::debug!("dom: bad selector {selector:?}: {e:?}");
            None
        }
    }
}

/// Every element match of `selector` under `root`, in document order.
pub fn all(root: &Element, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            log::debug!("dom: bad selector {selector:?}: {e:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
