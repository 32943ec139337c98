//! Render lifecycle: markup in, settled interactive scene out.
//!
//! ARCHITECTURE
//! ============
//! `RenderOrchestrator` is the single owner of everything that lives and dies with a scene
//! graph. It follows the same contract as an input handler in a canvas engine: every entry
//! point mutates state and returns a list of [`Action`]s for the host to carry out (wake me
//! later, repaint the metrics, open the modal). No entry point blocks or sleeps.
//!
//! Render states
//! -------------
//! `Idle` -> `render` -> (`Settling` -> settle signal or settle delay ->) `Idle`
//!
//! Rendering destroys the current scene first. Post-processing (normalize sizing, attach a
//! fresh recognizer, fit, bind node interactivity, refresh metrics) runs only once the
//! engine's layout has settled, however the engine reports that.
//!
//! Timers
//! ------
//! Two slots: the markup debounce and the settle delay. The host keeps one pending wake-up;
//! every `Wake` carries the earliest deadline across both slots, so replacing the host's
//! timer with the newest `Wake` never loses a deadline.

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;

use crate::config::ViewerConfig;
use crate::controller::ViewportController;
use crate::controls::{ControlField, ControlSide, TransformControls};
use crate::gesture::{BindingId, GestureInput};
use crate::inspector::{CloseReason, MetadataModal, NodeInteractivity, NodeMetadata};
use crate::metrics::{MetricsDisplay, MetricsReporter};
use crate::scene::{Completion, RenderEngine, SceneGraph, SceneNode, Surface};
use crate::timer::{Debouncer, TimerSlot};

/// Identifies one render request, so a late settle signal for a replaced render is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTicket(pub u64);

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new scene is interactive. Forward gesture input tagged with `binding`.
    SceneReady { binding: BindingId, nodes: Vec<SceneNode> },
    /// Metrics display and controls changed; repaint them.
    MetricsChanged,
    /// The engine rejected the markup. There is no scene until the next successful render.
    RenderFailed { message: String },
    /// Call [`RenderOrchestrator::poll`] at or after `at_ms`, replacing any earlier request.
    Wake { at_ms: f64 },
    /// The engine signals completion itself. Report it with
    /// [`RenderOrchestrator::render_settled`], or [`RenderOrchestrator::settle_failed`] if the
    /// signal never comes.
    AwaitSettle { ticket: RenderTicket },
    ShowModal(NodeMetadata),
    HideModal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Settling { ticket: RenderTicket },
}

pub struct RenderOrchestrator<E> {
    engine: E,
    config: ViewerConfig,
    scene: Option<Box<dyn SceneGraph>>,
    phase: Phase,
    controller: ViewportController,
    metrics: MetricsReporter,
    controls: TransformControls,
    interactivity: NodeInteractivity,
    modal: MetadataModal,
    edits: Debouncer<String>,
    settle: TimerSlot,
    next_ticket: u64,
    renders: usize,
}

impl<E: RenderEngine> RenderOrchestrator<E> {
    pub fn new(engine: E, config: ViewerConfig) -> Self {
        Self {
            engine,
            controller: ViewportController::new(config.scale_range(), config.wheel_sensitivity),
            edits: Debouncer::new(config.debounce_ms),
            config,
            scene: None,
            phase: Phase::Idle,
            metrics: MetricsReporter::new(),
            controls: TransformControls::default(),
            interactivity: NodeInteractivity::default(),
            modal: MetadataModal::default(),
            settle: TimerSlot::default(),
            next_ticket: 1,
            renders: 0,
        }
    }

    // --- Queries ---

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> Option<&dyn SceneGraph> {
        self.scene.as_deref()
    }

    #[must_use]
    pub fn controller(&self) -> &ViewportController {
        &self.controller
    }

    #[must_use]
    pub fn metrics(&self) -> &MetricsDisplay {
        self.metrics.display()
    }

    #[must_use]
    pub fn controls(&self) -> &TransformControls {
        &self.controls
    }

    #[must_use]
    pub fn modal(&self) -> &MetadataModal {
        &self.modal
    }

    #[must_use]
    pub fn interactivity(&self) -> &NodeInteractivity {
        &self.interactivity
    }

    /// Number of times the engine has been asked to render.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The render awaiting its settle signal, if any.
    #[must_use]
    pub fn settling_ticket(&self) -> Option<RenderTicket> {
        match self.phase {
            Phase::Settling { ticket } => Some(ticket),
            Phase::Idle => None,
        }
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settling_ticket().is_some()
    }

    /// Earliest pending timer deadline.
    #[must_use]
    pub fn next_wake(&self) -> Option<f64> {
        match (self.edits.deadline(), self.settle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // --- Rendering ---

    /// Render `markup` now, bypassing the debounce. Used for the initial load.
    pub fn render(&mut self, now_ms: f64, markup: &str, surface: &dyn Surface) -> Vec<Action> {
        self.controller.detach();
        self.interactivity.clear();
        self.scene = None;
        self.settle.cancel();

        let ticket = RenderTicket(self.next_ticket);
        self.next_ticket += 1;
        self.renders += 1;
        log::debug!("orchestrator: render {} requested ({} bytes)", ticket.0, markup.len());

        let scene = match self.engine.render(markup) {
            Ok(scene) => scene,
            Err(e) => {
                log::warn!("orchestrator: render {} failed: {e}", ticket.0);
                self.phase = Phase::Idle;
                let mut actions = vec![Action::RenderFailed { message: e.to_string() }];
                self.resume_edits(now_ms, &mut actions);
                return actions;
            }
        };
        self.scene = Some(scene);

        match self.engine.completion() {
            Completion::Immediate => self.finish(now_ms, surface),
            Completion::Signal => {
                self.phase = Phase::Settling { ticket };
                vec![Action::AwaitSettle { ticket }]
            }
            Completion::Delay(delay_ms) => {
                self.phase = Phase::Settling { ticket };
                self.settle.arm(now_ms, delay_ms);
                self.wake().into_iter().collect()
            }
        }
    }

    /// Record a markup edit. The latest text renders once edits pause for the debounce window.
    pub fn markup_edited(&mut self, now_ms: f64, markup: impl Into<String>) -> Vec<Action> {
        self.edits.push(now_ms, markup.into());
        self.wake().into_iter().collect()
    }

    /// Fire whichever timers are due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64, surface: &dyn Surface) -> Vec<Action> {
        let mut actions = Vec::new();

        // A debounced edit maturing mid-settle waits for post-processing to finish.
        if self.is_settling() && self.edits.deadline().is_some_and(|at| now_ms >= at) {
            log::debug!("orchestrator: deferring edit until render settles");
            self.edits.hold();
        }

        if self.settle.take_due(now_ms) && self.is_settling() {
            actions.extend(self.finish(now_ms, surface));
        }

        if !self.is_settling() {
            if let Some(markup) = self.edits.take_due(now_ms) {
                actions.extend(self.render(now_ms, &markup, surface));
            }
        }

        actions.retain(|a| !matches!(a, Action::Wake { .. }));
        actions.extend(self.wake());
        actions
    }

    /// The engine reports that layout for `ticket` is final. Stale tickets are ignored.
    pub fn render_settled(&mut self, ticket: RenderTicket, now_ms: f64, surface: &dyn Surface) -> Vec<Action> {
        if self.settling_ticket() != Some(ticket) {
            log::trace!("orchestrator: ignoring settle signal for stale render {}", ticket.0);
            return Vec::new();
        }
        self.finish(now_ms, surface)
    }

    /// The engine's completion signal for `ticket` failed. Fall back to the settle delay.
    pub fn settle_failed(&mut self, ticket: RenderTicket, now_ms: f64) -> Vec<Action> {
        if self.settling_ticket() != Some(ticket) {
            return Vec::new();
        }
        log::debug!("orchestrator: render {} settling by delay", ticket.0);
        self.settle.arm(now_ms, self.config.settle_ms);
        self.wake().into_iter().collect()
    }

    /// Post-render sequence: normalize, attach, fit, bind nodes, refresh metrics.
    fn finish(&mut self, now_ms: f64, surface: &dyn Surface) -> Vec<Action> {
        self.phase = Phase::Idle;
        self.settle.cancel();
        let mut actions = Vec::new();

        if let Some(scene) = self.scene.as_deref_mut() {
            scene.normalize_sizing();
            let binding = self.controller.attach();
            self.controller
                .fit_to_view(scene, surface.container_bounds(), self.config.fit_padding);
            self.interactivity.bind(scene);
            log::debug!("orchestrator: scene settled with {} nodes", self.interactivity.nodes().len());

            actions.push(Action::SceneReady { binding, nodes: self.interactivity.nodes().to_vec() });
            actions.extend(self.refresh_metrics());
        }

        self.resume_edits(now_ms, &mut actions);
        actions
    }

    /// Restart the debounce for an edit held back while a render was settling.
    fn resume_edits(&mut self, now_ms: f64, actions: &mut Vec<Action>) {
        if self.edits.has_pending() && self.edits.deadline().is_none() {
            self.edits.rearm(now_ms);
            actions.extend(self.wake());
        }
    }

    fn wake(&self) -> Option<Action> {
        self.next_wake().map(|at_ms| Action::Wake { at_ms })
    }

    // --- View ---

    /// Container size changed. Metrics only; the user's pan and zoom are kept.
    pub fn resize(&mut self) -> Vec<Action> {
        self.refresh_metrics()
    }

    /// Forward one input from the interactive surface bound as `binding`.
    pub fn gesture(&mut self, binding: BindingId, input: GestureInput) -> Vec<Action> {
        let Some(scene) = self.scene.as_deref_mut() else {
            return Vec::new();
        };
        if self.controller.on_gesture(binding, input, scene).is_none() {
            return Vec::new();
        }
        self.refresh_metrics()
    }

    /// One widget of a control pair was edited.
    pub fn control_edited(&mut self, field: ControlField, side: ControlSide, raw: &str) -> Vec<Action> {
        let requested = self.controls.edit(field, side, raw);
        let Some(scene) = self.scene.as_deref_mut() else {
            return Vec::new();
        };
        self.controller.translate_and_scale(scene, requested);
        self.refresh_metrics()
    }

    /// Explicit fit trigger.
    pub fn fit(&mut self, surface: &dyn Surface) -> Vec<Action> {
        let Some(scene) = self.scene.as_deref_mut() else {
            return Vec::new();
        };
        if self
            .controller
            .fit_to_view(scene, surface.container_bounds(), self.config.fit_padding)
            .is_none()
        {
            return Vec::new();
        }
        self.refresh_metrics()
    }

    fn refresh_metrics(&mut self) -> Vec<Action> {
        match self.metrics.refresh(self.scene.as_deref(), &mut self.controls) {
            Some(_) => vec![Action::MetricsChanged],
            None => Vec::new(),
        }
    }

    // --- Nodes ---

    pub fn node_entered(&mut self, dom_id: &str) {
        if let Some(scene) = self.scene.as_deref_mut() {
            self.interactivity.pointer_enter(scene, dom_id);
        }
    }

    pub fn node_left(&mut self, dom_id: &str) {
        if let Some(scene) = self.scene.as_deref_mut() {
            self.interactivity.pointer_leave(scene, dom_id);
        }
    }

    /// A click that ends a pan is part of the pan, not a node selection.
    pub fn node_clicked(&mut self, dom_id: &str) -> Vec<Action> {
        if self.controller.take_click_suppressed() {
            log::trace!("orchestrator: click on {dom_id} ended a pan");
            return Vec::new();
        }
        let Some(meta) = self.interactivity.click(dom_id) else {
            return Vec::new();
        };
        self.modal.open(meta.clone());
        vec![Action::ShowModal(meta)]
    }

    pub fn close_modal(&mut self, reason: CloseReason) -> Vec<Action> {
        if self.modal.close(reason) { vec![Action::HideModal] } else { Vec::new() }
    }
}
