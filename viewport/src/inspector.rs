//! Node-level interactivity: hover highlight and the metadata modal.

#[cfg(test)]
#[path = "inspector_test.rs"]
mod inspector_test;

use std::sync::OnceLock;

use regex::Regex;

use crate::codec;
use crate::scene::{SceneGraph, SceneNode};

const UNKNOWN_LABEL: &str = "Unknown";

/// Metadata shown for a clicked node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMetadata {
    pub id: String,
    pub label: String,
}

/// How the modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    OverlayClick,
}

/// Overlay + dialog visibility and the node being shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataModal {
    node: Option<NodeMetadata>,
}

impl MetadataModal {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.node.is_some()
    }

    #[must_use]
    pub fn node(&self) -> Option<&NodeMetadata> {
        self.node.as_ref()
    }

    pub fn open(&mut self, node: NodeMetadata) {
        self.node = Some(node);
    }

    /// Close the modal. Returns false when it was already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if self.node.take().is_none() {
            return false;
        }
        log::trace!("inspector: modal closed via {reason:?}");
        true
    }
}

/// Tracks the interactive nodes of the current scene and which one is hovered.
#[derive(Debug, Clone, Default)]
pub struct NodeInteractivity {
    nodes: Vec<SceneNode>,
    hovered: Option<String>,
}

impl NodeInteractivity {
    /// Take the node list from a freshly settled scene. Clears hover state.
    pub fn bind(&mut self, scene: &dyn SceneGraph) {
        self.nodes = scene.nodes();
        self.hovered = None;
    }

    /// Forget all nodes; called when the scene is discarded.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.hovered = None;
    }

    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Highlight the node under the pointer, unhighlighting the previous one.
    pub fn pointer_enter(&mut self, scene: &mut dyn SceneGraph, dom_id: &str) {
        if !self.knows(dom_id) {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            scene.set_node_highlight(&prev, false);
        }
        scene.set_node_highlight(dom_id, true);
        self.hovered = Some(dom_id.to_owned());
    }

    pub fn pointer_leave(&mut self, scene: &mut dyn SceneGraph, dom_id: &str) {
        if self.hovered.as_deref() == Some(dom_id) {
            self.hovered = None;
            scene.set_node_highlight(dom_id, false);
        }
    }

    /// Metadata for a click on `dom_id`, or `None` for ids not in the current scene.
    #[must_use]
    pub fn click(&self, dom_id: &str) -> Option<NodeMetadata> {
        let node = self.nodes.iter().find(|n| n.dom_id == dom_id)?;
        Some(NodeMetadata {
            id: normalize_node_id(&node.dom_id),
            label: node.label.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_owned()),
        })
    }

    fn knows(&self, dom_id: &str) -> bool {
        self.nodes.iter().any(|n| n.dom_id == dom_id)
    }
}

/// Strip the engine's `flowchart-` prefix and trailing `-<n>` counter from an element id.
#[must_use]
pub fn normalize_node_id(dom_id: &str) -> String {
    static SUFFIX: OnceLock<Option<Regex>> = OnceLock::new();
    let stripped = dom_id.replacen("flowchart-", "", 1);
    match SUFFIX.get_or_init(|| codec::compile(r"-\d+$")) {
        Some(re) => re.replace(&stripped, "").into_owned(),
        None => stripped,
    }
}
