//! Browser host for the diagram viewer.
//!
//! Compiled to WebAssembly and loaded by a page that already provides the global
//! `mermaid` object. The host owns only DOM glue: it finds the page's elements, renders
//! through Mermaid, adapts the inserted `<svg>` to [`viewport::SceneGraph`], and turns DOM
//! events into calls on [`viewport::RenderOrchestrator`]. Every decision is made there.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Session state, event wiring, and action dispatch |
//! | [`dom`] | `SceneGraph` over the rendered `<svg>` |
//! | [`mermaid`] | `mermaid` JS bindings and the `RenderEngine` built on them |
//! | [`page`] | Element ids, widget writes, and JSON config blocks |

pub mod app;
pub mod dom;
pub mod mermaid;
pub mod page;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let page = match page::Page::locate() {
        Ok(page) => page,
        Err(e) => {
            web_sys::console::error_1(&format!("viewer not started: {e}").into());
            return;
        }
    };

    let host = page.host_config();
    if let Err(e) = console_log::init_with_level(host.level()) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }

    if let Err(e) = mermaid::initialize(&host.mermaid) {
        log::warn!("mermaid initialize failed: {e:?}");
    }

    let config = page.viewer_config().unwrap_or_else(|e| {
        log::warn!("viewer-config rejected, using defaults: {e}");
        viewport::ViewerConfig::default()
    });
    log::info!(
        "viewer starting: scale {}..{}, debounce {}ms, settle {}ms",
        config.min_scale,
        config.max_scale,
        config.debounce_ms,
        config.settle_ms
    );

    app::mount(page, config);
}
