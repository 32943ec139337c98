//! The static page: element lookup, widget writes, and the JSON config blocks.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde::Deserialize;
use viewport::controls::{ControlBinding, ControlField, TransformControls};
use viewport::geom::ContainerBounds;
use viewport::inspector::NodeMetadata;
use viewport::metrics::MetricsDisplay;
use viewport::{ConfigError, ViewerConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::mermaid::MermaidOptions;

pub const MARKUP_ID: &str = "mermaid-code";
pub const DIAGRAM_ID: &str = "mermaid-diagram";
pub const FIT_BUTTON_ID: &str = "btn-fit";
pub const OVERLAY_ID: &str = "overlay";
pub const MODAL_ID: &str = "modal";
pub const CLOSE_BUTTON_ID: &str = "close-btn";
const NODE_ID_ID: &str = "node-id";
const NODE_LABEL_ID: &str = "node-label";
const VIEWER_CONFIG_ID: &str = "viewer-config";
const HOST_CONFIG_ID: &str = "host-config";

/// Slider id, number-field id for each control pair.
pub const CONTROL_IDS: [(ControlField, &str, &str); 3] = [
    (ControlField::TranslateX, "ctrl-tx", "ctrl-tx-num"),
    (ControlField::TranslateY, "ctrl-ty", "ctrl-ty-num"),
    (ControlField::Scale, "ctrl-scale", "ctrl-scale-num"),
];

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page has no #{0} element")]
    MissingElement(&'static str),
    #[error("#{id} is not a {expected}")]
    WrongElement { id: &'static str, expected: &'static str },
    #[error("no window or document")]
    NoDocument,
}

/// Host-only settings read from `<script type="application/json" id="host-config">`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub log_level: String,
    pub mermaid: MermaidOptions,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { log_level: "info".into(), mermaid: MermaidOptions::default() }
    }
}

impl HostConfig {
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Clone)]
pub struct Page {
    pub document: Document,
    pub markup: HtmlTextAreaElement,
    pub diagram: Element,
}

impl Page {
    /// Resolve the elements every session needs.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when the page lacks the editor or the diagram container.
    pub fn locate() -> Result<Self, PageError> {
        let document = web_sys::window().and_then(|w| w.document()).ok_or(PageError::NoDocument)?;
        let markup = document
            .get_element_by_id(MARKUP_ID)
            .ok_or(PageError::MissingElement(MARKUP_ID))?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| PageError::WrongElement { id: MARKUP_ID, expected: "textarea" })?;
        let diagram = document
            .get_element_by_id(DIAGRAM_ID)
            .ok_or(PageError::MissingElement(DIAGRAM_ID))?;
        Ok(Self { document, markup, diagram })
    }

    pub fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.element(id)?.dyn_into::<HtmlInputElement>().ok()
    }

    /// The diagram container's client size. A zero dimension is left for the fit to fill
    /// from the rendered `<svg>`, one dimension at a time.
    pub fn container_bounds(&self) -> Option<ContainerBounds> {
        let width = f64::from(self.diagram.client_width());
        let height = f64::from(self.diagram.client_height());
        Some(ContainerBounds::sized(width, height))
    }

    // --- Writes ---

    pub fn paint_metrics(&self, display: &MetricsDisplay) {
        for (id, text) in [
            ("svg-x", &display.svg_x),
            ("svg-y", &display.svg_y),
            ("svg-w", &display.svg_w),
            ("svg-h", &display.svg_h),
            ("g-tx", &display.g_tx),
            ("g-ty", &display.g_ty),
            ("g-scale", &display.g_scale),
            ("g-w", &display.g_w),
            ("g-h", &display.g_h),
        ] {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn paint_controls(&self, controls: &TransformControls) {
        for (field, slider_id, number_id) in CONTROL_IDS {
            let ControlBinding { slider, number } = controls.binding(field);
            if let Some(el) = self.input(slider_id) {
                el.set_value(slider);
            }
            if let Some(el) = self.input(number_id) {
                el.set_value(number);
            }
        }
    }

    pub fn show_modal(&self, node: &NodeMetadata) {
        if let Some(el) = self.element(NODE_ID_ID) {
            el.set_text_content(Some(&node.id));
        }
        if let Some(el) = self.element(NODE_LABEL_ID) {
            el.set_text_content(Some(&node.label));
        }
        self.set_modal_display("block");
    }

    pub fn hide_modal(&self) {
        self.set_modal_display("none");
    }

    fn set_modal_display(&self, display: &str) {
        for id in [OVERLAY_ID, MODAL_ID] {
            let Some(el) = self.element(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            if let Err(e) = el.style().set_property("display", display) {
                log::debug!("page: #{id} display rejected: {e:?}");
            }
        }
    }

    // --- Config ---

    fn json_block(&self, id: &str) -> Option<String> {
        self.element(id)?.text_content().filter(|t| !t.trim().is_empty())
    }

    /// Viewer config from `#viewer-config`, defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the block is present but malformed or inconsistent.
    pub fn viewer_config(&self) -> Result<ViewerConfig, ConfigError> {
        match self.json_block(VIEWER_CONFIG_ID) {
            Some(text) => ViewerConfig::from_json(&text),
            None => Ok(ViewerConfig::default()),
        }
    }

    /// Host config from `#host-config`, defaults when absent or malformed.
    pub fn host_config(&self) -> HostConfig {
        let Some(text) = self.json_block(HOST_CONFIG_ID) else {
            return HostConfig::default();
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            web_sys::console::warn_1(&format!("host-config ignored: {e}").into());
            HostConfig::default()
        })
    }
}
