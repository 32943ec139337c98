//! Bindings to the page's global `mermaid` object and the `RenderEngine` built on them.

#[cfg(test)]
#[path = "mermaid_test.rs"]
mod mermaid_test;

use serde::{Deserialize, Serialize};
use viewport::scene::{Completion, RenderEngine, RenderError, SceneGraph};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Response};

use crate::dom::DomScene;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = initialize)]
    fn mermaid_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = registerIconPacks)]
    fn mermaid_register_icon_packs(packs: &js_sys::Array) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = run)]
    fn mermaid_run(options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = contentLoaded)]
    fn mermaid_content_loaded() -> Result<(), JsValue>;
}

/// An icon pack fetched lazily by Mermaid the first time a diagram uses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPack {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartOptions {
    #[serde(rename = "useMaxWidth")]
    pub use_max_width: bool,
}

/// Options handed to `mermaid.initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MermaidOptions {
    #[serde(rename = "startOnLoad")]
    pub start_on_load: bool,
    #[serde(rename = "securityLevel")]
    pub security_level: String,
    pub flowchart: FlowchartOptions,
    #[serde(skip_serializing)]
    pub icon_packs: Vec<IconPack>,
}

impl Default for MermaidOptions {
    fn default() -> Self {
        Self {
            start_on_load: true,
            security_level: "loose".into(),
            flowchart: FlowchartOptions { use_max_width: true },
            icon_packs: vec![IconPack {
                name: "logos".into(),
                url: "https://unpkg.com/@iconify-json/logos@1/icons.json".into(),
            }],
        }
    }
}

impl Default for FlowchartOptions {
    fn default() -> Self {
        Self { use_max_width: true }
    }
}

/// Configure the global engine and register icon packs.
///
/// # Errors
///
/// Returns the JS exception when `mermaid` is missing or rejects the options.
pub fn initialize(options: &MermaidOptions) -> Result<(), JsValue> {
    let json = serde_json::to_string(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mermaid_initialize(&js_sys::JSON::parse(&json)?)?;

    if options.icon_packs.is_empty() {
        return Ok(());
    }
    let packs = js_sys::Array::new();
    for pack in &options.icon_packs {
        let entry = js_sys::Object::new();
        js_sys::Reflect::set(&entry, &"name".into(), &pack.name.as_str().into())?;
        js_sys::Reflect::set(&entry, &"loader".into(), &JsValue::from(icon_loader(pack.url.clone())))?;
        packs.push(&entry);
    }
    mermaid_register_icon_packs(&packs)
}

/// `() => fetch(url).then(res => res.json())`, kept alive for the page's lifetime.
fn icon_loader(url: String) -> js_sys::Function {
    let loader = Closure::<dyn FnMut() -> js_sys::Promise>::new(move || {
        let url = url.clone();
        wasm_bindgen_futures::future_to_promise(async move {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let response: Response = JsFuture::from(window.fetch_with_str(&url)).await?.dyn_into()?;
            JsFuture::from(response.json()?).await
        })
    });
    let function: js_sys::Function = loader.as_ref().unchecked_ref::<js_sys::Function>().clone();
    loader.forget();
    function
}

/// Renders by dropping a `<pre class="mermaid">` into the container and asking Mermaid to
/// process it with `mermaid.run`. Layout completes when the returned promise resolves.
/// If `run` is unavailable the engine falls back to `contentLoaded` and a fixed settle delay.
pub struct MermaidEngine {
    document: Document,
    container: Element,
    settle_ms: f64,
    /// Promise from the last `mermaid.run`, until the host takes it.
    layout: Option<js_sys::Promise>,
}

impl MermaidEngine {
    #[must_use]
    pub fn new(document: Document, container: Element, settle_ms: f64) -> Self {
        Self { document, container, settle_ms, layout: None }
    }

    /// The pending layout promise of the last render, handed out once.
    pub fn take_layout(&mut self) -> Option<js_sys::Promise> {
        self.layout.take()
    }

    fn run(&mut self, pre: &Element) -> Result<(), JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"nodes".into(), &js_sys::Array::of1(pre))?;
        match mermaid_run(&options) {
            Ok(promise) => self.layout = Some(promise),
            Err(e) => {
                log::warn!("mermaid: run unavailable, settling by delay: {e:?}");
                mermaid_content_loaded()?;
            }
        }
        Ok(())
    }
}

impl RenderEngine for MermaidEngine {
    fn render(&mut self, markup: &str) -> Result<Box<dyn SceneGraph>, RenderError> {
        let engine_err = |e: JsValue| RenderError::Engine { message: format!("{e:?}") };

        self.layout = None;
        self.container.set_inner_html("");
        let pre = self.document.create_element("pre").map_err(engine_err)?;
        pre.set_class_name("mermaid w-full h-full");
        // Text, never HTML: the markup is user input.
        pre.set_text_content(Some(markup));
        self.container.append_child(&pre).map_err(engine_err)?;
        self.run(&pre).map_err(engine_err)?;

        Ok(Box::new(DomScene::new(self.container.clone())))
    }

    fn completion(&self) -> Completion {
        if self.layout.is_some() { Completion::Signal } else { Completion::Delay(self.settle_ms) }
    }
}
