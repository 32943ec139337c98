//! View-transform core for an interactive diagram viewer.
//!
//! A diagram engine turns markup into a scene graph rooted at one transformable group.
//! This crate owns everything that happens to that group afterwards: parsing and writing
//! its `transform` attribute, fitting it to the container, panning and zooming it from
//! pointer input or numeric controls, reporting metrics, and re-rendering on edits. It has
//! no browser dependency; the host crate wires it to the DOM and returns here for every
//! decision through [`orchestrator::RenderOrchestrator`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`orchestrator`] | Render lifecycle, debounce, settle handling, host [`orchestrator::Action`]s |
//! | [`controller`] | Owner of the current transform; fit-to-view and the single write path |
//! | [`gesture`] | Pan/zoom recognizer driven by pointer, wheel, and double-click input |
//! | [`codec`] | `translate(x,y) scale(k)` parsing and serialization |
//! | [`transform`] | Transform value type and scale range |
//! | [`metrics`] | Read-back of geometry and transform into display text |
//! | [`controls`] | Paired slider / number widgets for the transform |
//! | [`inspector`] | Node hover highlight and metadata modal |
//! | [`scene`] | Traits for the scene graph and the render engine |
//! | [`svg`] | Headless scene graph over SVG text |
//! | [`timer`] | Deadline slots and the debouncer |
//! | [`config`] | Viewer tuning from env keys or JSON |
//! | [`geom`] | Points and bounds |
//! | [`consts`] | Shared numeric defaults |

pub mod codec;
pub mod config;
pub mod consts;
pub mod controller;
pub mod controls;
pub mod geom;
pub mod gesture;
pub mod inspector;
pub mod metrics;
pub mod orchestrator;
pub mod scene;
pub mod svg;
pub mod timer;
pub mod transform;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, ViewerConfig};
pub use orchestrator::{Action, RenderOrchestrator, RenderTicket};
pub use scene::{BoundsUnavailable, Completion, RenderEngine, RenderError, SceneGraph, SceneNode, Surface};
pub use transform::{ScaleRange, Transform};
