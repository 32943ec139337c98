//! Test doubles for the scene graph and the render engine.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geom::{ContainerBounds, SceneBounds};
use crate::scene::{BoundsUnavailable, Completion, RenderEngine, RenderError, SceneGraph, SceneNode};

/// Observable state behind a [`FakeScene`], shared with the test body.
#[derive(Debug, Clone)]
pub struct FakeSceneState {
    pub transform_attr: Option<String>,
    pub transform_writes: usize,
    pub bounds: Result<SceneBounds, BoundsUnavailable>,
    pub rect: Option<ContainerBounds>,
    pub has_view_box: bool,
    pub normalized: bool,
    pub nodes: Vec<SceneNode>,
    pub highlighted: Vec<String>,
}

impl Default for FakeSceneState {
    fn default() -> Self {
        Self {
            transform_attr: None,
            transform_writes: 0,
            bounds: Ok(SceneBounds::new(0.0, 0.0, 400.0, 200.0)),
            rect: Some(ContainerBounds { left: 12.4, top: 56.6, width: 800.0, height: 600.0 }),
            has_view_box: true,
            normalized: false,
            nodes: Vec::new(),
            highlighted: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeScene {
    pub state: Rc<RefCell<FakeSceneState>>,
}

impl FakeScene {
    pub fn with_bounds(bounds: SceneBounds) -> Self {
        let scene = Self::default();
        scene.state.borrow_mut().bounds = Ok(bounds);
        scene
    }

    pub fn unmeasurable() -> Self {
        let scene = Self::default();
        scene.state.borrow_mut().bounds = Err(BoundsUnavailable::new("getBBox unsupported"));
        scene
    }

    pub fn attr(&self) -> Option<String> {
        self.state.borrow().transform_attr.clone()
    }
}

impl SceneGraph for FakeScene {
    fn root_transform(&self) -> Option<String> {
        self.state.borrow().transform_attr.clone()
    }

    fn set_root_transform(&mut self, encoded: &str) {
        let mut state = self.state.borrow_mut();
        state.transform_attr = Some(encoded.to_owned());
        state.transform_writes += 1;
    }

    fn bounding_box(&self) -> Result<SceneBounds, BoundsUnavailable> {
        self.state.borrow().bounds.clone()
    }

    fn client_rect(&self) -> Option<ContainerBounds> {
        self.state.borrow().rect
    }

    fn normalize_sizing(&mut self) {
        self.state.borrow_mut().normalized = true;
    }

    fn clear_view_box(&mut self) {
        self.state.borrow_mut().has_view_box = false;
    }

    fn nodes(&self) -> Vec<SceneNode> {
        self.state.borrow().nodes.clone()
    }

    fn set_node_highlight(&mut self, dom_id: &str, on: bool) {
        let mut state = self.state.borrow_mut();
        state.highlighted.retain(|id| id != dom_id);
        if on {
            state.highlighted.push(dom_id.to_owned());
        }
    }
}

/// Engine that hands out [`FakeScene`]s and records every markup it was asked to render.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    pub rendered: Rc<RefCell<Vec<String>>>,
    pub scenes: Rc<RefCell<Vec<FakeScene>>>,
    pub completion: Completion,
    pub bounds: SceneBounds,
    pub nodes: Vec<SceneNode>,
}

impl FakeEngine {
    pub fn new(completion: Completion) -> Self {
        Self {
            rendered: Rc::default(),
            scenes: Rc::default(),
            completion,
            bounds: SceneBounds::new(0.0, 0.0, 400.0, 200.0),
            nodes: Vec::new(),
        }
    }

    pub fn render_log(&self) -> Vec<String> {
        self.rendered.borrow().clone()
    }

    pub fn last_scene(&self) -> Option<FakeScene> {
        self.scenes.borrow().last().cloned()
    }
}

impl RenderEngine for FakeEngine {
    fn render(&mut self, markup: &str) -> Result<Box<dyn SceneGraph>, RenderError> {
        self.rendered.borrow_mut().push(markup.to_owned());
        if markup.contains("syntax error") {
            return Err(RenderError::Engine { message: "Parse error on line 1".into() });
        }
        let scene = FakeScene::with_bounds(self.bounds);
        scene.state.borrow_mut().nodes = self.nodes.clone();
        self.scenes.borrow_mut().push(scene.clone());
        Ok(Box::new(scene))
    }

    fn completion(&self) -> Completion {
        self.completion
    }
}

pub fn node(dom_id: &str, label: Option<&str>) -> SceneNode {
    SceneNode { dom_id: dom_id.to_owned(), label: label.map(str::to_owned) }
}
