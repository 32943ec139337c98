//! Session wiring: DOM events in, orchestrator actions out.
//!
//! One `App` lives for the page's lifetime behind `Rc<RefCell<_>>`. Every handler borrows
//! it just long enough to call one orchestrator entry point, releases the borrow, then
//! carries out the returned actions. Carrying out an action may re-enter the app (binding
//! listeners, scheduling a wake), which is why the two steps never overlap.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use viewport::controls::{ControlField, ControlSide};
use viewport::geom::Point;
use viewport::gesture::{BindingId, Button, GestureInput};
use viewport::inspector::CloseReason;
use viewport::{Action, RenderOrchestrator, RenderTicket, ViewerConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Event, EventTarget, HtmlInputElement, MouseEvent, PointerEvent, WheelEvent};

use crate::dom;
use crate::mermaid::MermaidEngine;
use crate::page::{CLOSE_BUTTON_ID, CONTROL_IDS, FIT_BUTTON_ID, OVERLAY_ID, Page};

/// Pixels per wheel line and per wheel page, matching the browser zoom conventions.
const WHEEL_LINE_PX: f64 = 25.0;
const WHEEL_PAGE_PX: f64 = 500.0;

type Shared = Rc<RefCell<App>>;

pub struct App {
    orch: RenderOrchestrator<MermaidEngine>,
    page: Page,
    /// Incremented per scheduled wake; only the newest timeout polls.
    wake_generation: u64,
    /// Listeners on the current `<svg>` and its nodes, removed when the scene is replaced.
    scene_listeners: Vec<Listener>,
}

/// An event listener that detaches itself when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::debug!("app: could not detach {} listener: {e:?}", self.event);
        }
    }
}

fn listen(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) -> Option<Listener> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => Some(Listener { target: target.clone(), event, closure }),
        Err(e) => {
            log::warn!("app: could not attach {event} listener: {e:?}");
            None
        }
    }
}

/// Attach a listener for the page's lifetime.
fn listen_forever(target: &EventTarget, event: &'static str, handler: impl FnMut(Event) + 'static) {
    if let Some(listener) = listen(target, event, handler) {
        std::mem::forget(listener);
    }
}

/// Return the current wall-clock time in milliseconds via the JS `Date.now()` API.
fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Build the session and render the editor's initial markup.
pub fn mount(page: Page, config: ViewerConfig) {
    let engine = MermaidEngine::new(page.document.clone(), page.diagram.clone(), config.settle_ms);
    let app = Rc::new(RefCell::new(App {
        orch: RenderOrchestrator::new(engine, config),
        page,
        wake_generation: 0,
        scene_listeners: Vec::new(),
    }));

    wire_page(&app);

    let markup = app.borrow().page.markup.value();
    run(&app, |app, now| {
        let App { orch, page, .. } = app;
        orch.render(now, &markup, &|| page.container_bounds())
    });
}

/// Call one orchestrator entry point, then carry out what it asked for.
fn run(app: &Shared, step: impl FnOnce(&mut App, f64) -> Vec<Action>) {
    let actions = {
        let mut app = app.borrow_mut();
        step(&mut app, now_ms())
    };
    apply(app, actions);
}

fn apply(app: &Shared, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::SceneReady { binding, nodes } => {
                let ids: Vec<String> = nodes.into_iter().map(|n| n.dom_id).collect();
                bind_scene(app, binding, &ids);
            }
            Action::MetricsChanged => {
                let app = app.borrow();
                app.page.paint_metrics(app.orch.metrics());
                app.page.paint_controls(app.orch.controls());
            }
            Action::RenderFailed { message } => log::warn!("app: diagram not rendered: {message}"),
            Action::Wake { at_ms } => schedule_wake(app, at_ms),
            Action::AwaitSettle { ticket } => await_settle(app, ticket),
            Action::ShowModal(node) => app.borrow().page.show_modal(&node),
            Action::HideModal => app.borrow().page.hide_modal(),
        }
    }
}

/// Replace the pending wake-up. Older timeouts still fire but find a newer generation.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn schedule_wake(app: &Shared, at_ms: f64) {
    let generation = {
        let mut app = app.borrow_mut();
        app.wake_generation += 1;
        app.wake_generation
    };
    let delay = (at_ms - now_ms()).max(0.0).ceil() as u32;
    let weak: Weak<RefCell<App>> = Rc::downgrade(app);
    Timeout::new(delay, move || {
        let Some(app) = weak.upgrade() else {
            return;
        };
        if app.borrow().wake_generation != generation {
            return;
        }
        run(&app, |app, now| {
            let App { orch, page, .. } = app;
            orch.poll(now, &|| page.container_bounds())
        });
    })
    .forget();
}

/// Finish the render once Mermaid's layout promise resolves. A rejected or missing promise
/// falls back to the settle delay.
fn await_settle(app: &Shared, ticket: RenderTicket) {
    let layout = app.borrow_mut().orch.engine_mut().take_layout();
    let Some(layout) = layout else {
        run(app, |app, now| app.orch.settle_failed(ticket, now));
        return;
    };
    let weak: Weak<RefCell<App>> = Rc::downgrade(app);
    wasm_bindgen_futures::spawn_local(async move {
        let settled = JsFuture::from(layout).await;
        let Some(app) = weak.upgrade() else {
            return;
        };
        match settled {
            Ok(_) => run(&app, |app, now| {
                let App { orch, page, .. } = app;
                orch.render_settled(ticket, now, &|| page.container_bounds())
            }),
            Err(e) => {
                log::warn!("app: mermaid layout for render {} failed: {e:?}", ticket.0);
                run(&app, |app, now| app.orch.settle_failed(ticket, now));
            }
        }
    });
}

// =============================================================
// Page-level listeners
// =============================================================

fn wire_page(app: &Shared) {
    let page = app.borrow().page.clone();

    {
        let app = Rc::clone(app);
        let markup = page.markup.clone();
        listen_forever(&page.markup, "input", move |_| {
            let text = markup.value();
            run(&app, |app, now| app.orch.markup_edited(now, text));
        });
    }

    if let Some(window) = web_sys::window() {
        let app = Rc::clone(app);
        listen_forever(&window, "resize", move |_| run(&app, |app, _| app.orch.resize()));
    }

    for (field, slider_id, number_id) in CONTROL_IDS {
        for (id, side) in [(slider_id, ControlSide::Slider), (number_id, ControlSide::Number)] {
            let Some(input) = page.element(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) else {
                log::debug!("app: no #{id} control on page");
                continue;
            };
            wire_control(app, &input, field, side);
        }
    }

    if let Some(button) = page.element(FIT_BUTTON_ID) {
        let app = Rc::clone(app);
        listen_forever(&button, "click", move |_| {
            run(&app, |app, _| {
                let App { orch, page, .. } = app;
                orch.fit(&|| page.container_bounds())
            });
        });
    }

    for (id, reason) in [(CLOSE_BUTTON_ID, CloseReason::CloseButton), (OVERLAY_ID, CloseReason::OverlayClick)] {
        if let Some(el) = page.element(id) {
            let app = Rc::clone(app);
            listen_forever(&el, "click", move |_| run(&app, |app, _| app.orch.close_modal(reason)));
        }
    }
}

fn wire_control(app: &Shared, input: &HtmlInputElement, field: ControlField, side: ControlSide) {
    let app = Rc::clone(app);
    let source = input.clone();
    listen_forever(input, "input", move |_| {
        let raw = source.value();
        run(&app, |app, _| app.orch.control_edited(field, side, &raw));
    });
}

// =============================================================
// Scene listeners
// =============================================================

fn bind_scene(app: &Shared, binding: BindingId, node_ids: &[String]) {
    let diagram = {
        let mut app = app.borrow_mut();
        app.scene_listeners.clear();
        app.page.diagram.clone()
    };
    let Some(svg) = dom::query(&diagram, "svg") else {
        return;
    };

    let mut listeners = Vec::new();
    listeners.extend(gesture_listener(app, &svg, "pointerdown", binding, |ev, at| {
        let ev = ev.dyn_ref::<PointerEvent>()?;
        Some(GestureInput::PointerDown { point: at, button: map_button(ev.button()) })
    }));
    listeners.extend(gesture_listener(app, &svg, "pointermove", binding, |_, at| {
        Some(GestureInput::PointerMove { point: at })
    }));
    for event in ["pointerup", "pointercancel", "pointerleave"] {
        listeners.extend(gesture_listener(app, &svg, event, binding, |_, at| {
            Some(GestureInput::PointerUp { point: at })
        }));
    }
    listeners.extend(gesture_listener(app, &svg, "wheel", binding, |ev, at| {
        let ev = ev.dyn_ref::<WheelEvent>()?;
        ev.prevent_default();
        Some(GestureInput::Wheel { point: at, dy: wheel_pixels(ev), ctrl: ev.ctrl_key() })
    }));
    listeners.extend(gesture_listener(app, &svg, "dblclick", binding, |ev, at| {
        let ev = ev.dyn_ref::<MouseEvent>()?;
        ev.prevent_default();
        Some(GestureInput::DoubleClick { point: at, shift: ev.shift_key() })
    }));

    for id in node_ids {
        let Some(node) = dom::all(&svg, ".node").into_iter().find(|el| &el.id() == id) else {
            continue;
        };
        listeners.extend(node_listener(app, &node, "mouseover", id, |app, id| {
            app.orch.node_entered(id);
            Vec::new()
        }));
        listeners.extend(node_listener(app, &node, "mouseout", id, |app, id| {
            app.orch.node_left(id);
            Vec::new()
        }));
        listeners.extend(node_listener(app, &node, "click", id, |app, id| app.orch.node_clicked(id)));
    }

    app.borrow_mut().scene_listeners = listeners;
}

fn gesture_listener(
    app: &Shared,
    svg: &Element,
    event: &'static str,
    binding: BindingId,
    to_input: impl Fn(&Event, Point) -> Option<GestureInput> + 'static,
) -> Option<Listener> {
    let app = Rc::clone(app);
    let surface = svg.clone();
    listen(svg, event, move |ev| {
        let Some(mouse) = ev.dyn_ref::<MouseEvent>() else {
            return;
        };
        let rect = surface.get_bounding_client_rect();
        let at = Point::new(f64::from(mouse.client_x()) - rect.left(), f64::from(mouse.client_y()) - rect.top());
        let Some(input) = to_input(&ev, at) else {
            return;
        };
        run(&app, |app, _| app.orch.gesture(binding, input));
    })
}

fn node_listener(
    app: &Shared,
    node: &Element,
    event: &'static str,
    dom_id: &str,
    handle: impl Fn(&mut App, &str) -> Vec<Action> + 'static,
) -> Option<Listener> {
    let app = Rc::clone(app);
    let dom_id = dom_id.to_owned();
    listen(node, event, move |_| run(&app, |app, _| handle(app, &dom_id)))
}

fn map_button(button: i16) -> Button {
    match button {
        1 => Button::Middle,
        2 => Button::Secondary,
        _ => Button::Primary,
    }
}

/// Wheel delta in pixels regardless of the event's delta mode.
fn wheel_pixels(ev: &WheelEvent) -> f64 {
    match ev.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => ev.delta_y() * WHEEL_LINE_PX,
        WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * WHEEL_PAGE_PX,
        _ => ev.delta_y(),
    }
}
