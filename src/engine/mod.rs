//! Platform-neutral particle background engine.
//!
//! - [`particles`]: particle state, initialization and the per-frame step
//! - [`render`]: proximity rendering onto any [`Surface`]
//! - [`driver`]: mount/resize/teardown lifecycle around the frame loop
//!
//! Nothing in here touches the DOM; the browser binding lives in
//! `components::particle_background`.

pub mod driver;
pub mod particles;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::{AnimationDriver, DriverPhase, tick_shared};
pub use particles::{Particle, ParticleSet};
pub use render::{Surface, connection_alpha, render_frame};
