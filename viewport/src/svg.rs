//! Headless scene graph over rendered SVG text.
//!
//! `SvgScene` reads the document once with `roxmltree` and keeps an owned model of the
//! parts the viewer touches: the root group's transform, the outer `viewBox`, the content
//! extent, and the interactive nodes. Writes are recorded on the model, so the viewer can
//! run end to end without a browser.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::Display;

use roxmltree::{Document, Node};

use crate::geom::{ContainerBounds, SceneBounds};
use crate::scene::{BoundsUnavailable, Completion, RenderEngine, RenderError, SceneGraph, SceneNode};

#[derive(Debug, Clone, PartialEq)]
pub struct SvgScene {
    root_transform: Option<String>,
    view_box: Option<String>,
    content: Option<SceneBounds>,
    rect: Option<ContainerBounds>,
    nodes: Vec<SceneNode>,
    highlighted: Vec<String>,
    normalized: bool,
}

impl SvgScene {
    /// Parse rendered SVG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Svg`] for malformed XML and [`RenderError::MissingRootGroup`]
    /// when the document has no `<g>` element.
    pub fn parse(svg_text: &str) -> Result<Self, RenderError> {
        let doc = Document::parse(svg_text)?;
        let svg = doc.root_element();
        let root_group = svg
            .descendants()
            .find(|n| n.has_tag_name("g"))
            .ok_or(RenderError::MissingRootGroup)?;

        let view_box = svg.attribute("viewBox").map(str::to_owned);
        let content = view_box.as_deref().and_then(parse_view_box).or_else(|| {
            let width = svg.attribute("width").and_then(parse_length)?;
            let height = svg.attribute("height").and_then(parse_length)?;
            Some(SceneBounds::new(0.0, 0.0, width, height))
        });

        let nodes = svg
            .descendants()
            .filter(|n| n.has_tag_name("g") && has_class(*n, "node"))
            .filter_map(|n| {
                let dom_id = n.attribute("id")?.to_owned();
                let label = n.descendants().find(|d| has_class(*d, "nodeLabel")).map(text_of);
                Some(SceneNode { dom_id, label })
            })
            .collect();

        Ok(Self {
            root_transform: root_group.attribute("transform").map(str::to_owned),
            view_box,
            content,
            rect: None,
            nodes,
            highlighted: Vec::new(),
            normalized: false,
        })
    }

    /// Give the scene an on-screen rectangle, as a laid-out page would.
    #[must_use]
    pub fn with_client_rect(mut self, rect: ContainerBounds) -> Self {
        self.rect = Some(rect);
        self
    }

    #[must_use]
    pub fn view_box(&self) -> Option<&str> {
        self.view_box.as_deref()
    }

    #[must_use]
    pub fn highlighted(&self) -> &[String] {
        &self.highlighted
    }

    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }
}

impl SceneGraph for SvgScene {
    fn root_transform(&self) -> Option<String> {
        self.root_transform.clone()
    }

    fn set_root_transform(&mut self, encoded: &str) {
        self.root_transform = Some(encoded.to_owned());
    }

    fn bounding_box(&self) -> Result<SceneBounds, BoundsUnavailable> {
        self.content
            .ok_or_else(|| BoundsUnavailable::new("svg declares neither viewBox nor numeric width/height"))
    }

    fn client_rect(&self) -> Option<ContainerBounds> {
        self.rect
    }

    fn normalize_sizing(&mut self) {
        self.normalized = true;
    }

    fn clear_view_box(&mut self) {
        self.view_box = None;
    }

    fn nodes(&self) -> Vec<SceneNode> {
        self.nodes.clone()
    }

    fn set_node_highlight(&mut self, dom_id: &str, on: bool) {
        self.highlighted.retain(|id| id != dom_id);
        if on {
            self.highlighted.push(dom_id.to_owned());
        }
    }
}

/// Adapts a markup-to-SVG function into a [`RenderEngine`] whose output is final at once.
pub struct HeadlessEngine<F> {
    render_svg: F,
    rect: Option<ContainerBounds>,
}

impl<F, E> HeadlessEngine<F>
where
    F: FnMut(&str) -> Result<String, E>,
    E: Display,
{
    pub fn new(render_svg: F) -> Self {
        Self { render_svg, rect: None }
    }

    /// Report `rect` as the client rectangle of every scene produced.
    #[must_use]
    pub fn with_client_rect(mut self, rect: ContainerBounds) -> Self {
        self.rect = Some(rect);
        self
    }
}

impl<F, E> RenderEngine for HeadlessEngine<F>
where
    F: FnMut(&str) -> Result<String, E>,
    E: Display,
{
    fn render(&mut self, markup: &str) -> Result<Box<dyn SceneGraph>, RenderError> {
        let svg = (self.render_svg)(markup).map_err(|e| RenderError::Engine { message: e.to_string() })?;
        let mut scene = SvgScene::parse(&svg)?;
        scene.rect = self.rect;
        Ok(Box::new(scene))
    }

    fn completion(&self) -> Completion {
        Completion::Immediate
    }
}

fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.attribute("class").is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
}

fn text_of(node: Node<'_, '_>) -> String {
    node.descendants().filter(Node::is_text).filter_map(|n| n.text()).collect()
}

/// `min-x min-y width height`, separated by whitespace and/or commas.
fn parse_view_box(raw: &str) -> Option<SceneBounds> {
    let mut parts = raw.split(|c: char| c.is_ascii_whitespace() || c == ',').filter(|p| !p.is_empty());
    let mut next = || match parts.next()?.parse::<f64>() {
        Ok(v) => Some(v),
        Err(e) => {
            log::debug!("svg: unreadable viewBox {raw:?}: {e}");
            None
        }
    };
    let bounds = SceneBounds::new(next()?, next()?, next()?, next()?);
    if bounds.is_degenerate() { None } else { Some(bounds) }
}

/// A plain or `px` length. Percentages and other units have no intrinsic size.
fn parse_length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.strip_suffix("px").unwrap_or(raw);
    match number.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => None,
    }
}
