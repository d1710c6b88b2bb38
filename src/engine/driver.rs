//! Lifecycle of one particle background instance.
//!
//! The driver owns the particle set, the drawing surface and the random
//! source. The host (a browser binding, or a test) calls [`AnimationDriver::tick`]
//! once per display refresh and forwards viewport resizes.
//!
//! ```text
//! Uninitialized --mount--> Running --stop--> Stopped
//!                           |   ^
//!                           +---+ resize (particles regenerated)
//! ```
//!
//! `Stopped` is terminal. A new mount needs a new driver.

use std::cell::RefCell;
use std::rc::Weak;

use log::debug;
use rand::Rng;

use crate::config::ParticleConfig;
use crate::theme::ThemeMode;

use super::particles::ParticleSet;
use super::render::{Surface, render_frame};

/// Where a driver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverPhase {
	/// Created but not yet mounted; nothing is drawn.
	Uninitialized,
	/// Mounted; every tick draws a frame.
	Running,
	/// Torn down for good.
	Stopped,
}

/// Owns the particles and surface of one mounted background.
pub struct AnimationDriver<S, R> {
	surface: S,
	rng: R,
	config: ParticleConfig,
	particles: ParticleSet,
	phase: DriverPhase,
}

impl<S: Surface, R: Rng> AnimationDriver<S, R> {
	/// A driver that has not been mounted yet.
	pub fn new(surface: S, config: ParticleConfig, rng: R) -> Self {
		Self {
			surface,
			rng,
			config,
			particles: ParticleSet::default(),
			phase: DriverPhase::Uninitialized,
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> DriverPhase {
		self.phase
	}

	/// Particles as of the last frame.
	pub fn particles(&self) -> &ParticleSet {
		&self.particles
	}

	/// The surface being drawn on.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Tuning this driver was created with.
	pub fn config(&self) -> &ParticleConfig {
		&self.config
	}

	/// Size the surface to the viewport, create the particles and start running.
	///
	/// Returns `true` only on the first mount, which is when the host should
	/// play its one-time fade-in. Mounting a running or stopped driver does
	/// nothing.
	pub fn mount(&mut self, width: f64, height: f64) -> bool {
		if self.phase != DriverPhase::Uninitialized {
			return false;
		}
		self.reseed(width, height);
		self.phase = DriverPhase::Running;
		debug!(
			"particle driver mounted at {width}x{height} with {} particles",
			self.particles.len()
		);
		true
	}

	/// Render one frame if running. Returns whether a frame was drawn, so a
	/// host can stop rescheduling once this turns `false`.
	pub fn tick(&mut self, theme: ThemeMode) -> bool {
		if self.phase != DriverPhase::Running {
			return false;
		}
		render_frame(&mut self.particles, &mut self.surface, &self.config, theme);
		true
	}

	/// Follow a viewport resize: resize the surface and replace every particle.
	/// Ignored unless running.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if self.phase != DriverPhase::Running {
			return false;
		}
		self.reseed(width, height);
		debug!(
			"particle driver resized to {width}x{height}, {} particles",
			self.particles.len()
		);
		true
	}

	/// Stop for good. Later ticks and resizes are no-ops.
	pub fn stop(&mut self) {
		if self.phase != DriverPhase::Stopped {
			debug!("particle driver stopped");
		}
		self.phase = DriverPhase::Stopped;
	}

	fn reseed(&mut self, width: f64, height: f64) {
		self.surface.resize(width, height);
		// The surface may round the requested size (canvas sizes are integral).
		let (w, h) = self.surface.size();
		self.particles =
			ParticleSet::initialize(w, h, self.config.max_count, self.config.speed, &mut self.rng);
	}
}

/// Run one frame callback for a driver shared with the host's scheduler.
///
/// Returns whether the host should schedule another frame. The callback only
/// holds a weak handle, so one that fires after teardown (driver dropped or
/// stopped) draws nothing and returns `false`.
pub fn tick_shared<S: Surface, R: Rng>(
	driver: &Weak<RefCell<AnimationDriver<S, R>>>,
	theme: ThemeMode,
) -> bool {
	let Some(shared) = driver.upgrade() else {
		return false;
	};
	let Ok(mut guard) = shared.try_borrow_mut() else {
		return false;
	};
	guard.tick(theme)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::testing::{DrawOp, RecordingSurface};
	use rand::SeedableRng;
	use rand::rngs::SmallRng;
	use std::rc::Rc;

	fn driver() -> AnimationDriver<RecordingSurface, SmallRng> {
		AnimationDriver::new(
			RecordingSurface::default(),
			ParticleConfig::default(),
			SmallRng::seed_from_u64(11),
		)
	}

	#[test]
	fn test_starts_uninitialized_and_idle() {
		let mut d = driver();
		assert_eq!(d.phase(), DriverPhase::Uninitialized);
		assert!(!d.tick(ThemeMode::Dark));
		assert!(!d.resize(100.0, 100.0));
		assert!(d.surface().ops().is_empty());
	}

	#[test]
	fn test_mount_full_hd_caps_at_max_count() {
		let mut d = driver();
		assert!(d.mount(1920.0, 1080.0));
		assert_eq!(d.phase(), DriverPhase::Running);
		assert_eq!(d.particles().len(), 150);
		assert_eq!(d.surface().size(), (1920.0, 1080.0));
	}

	#[test]
	fn test_mount_narrow_viewport() {
		let mut d = driver();
		d.mount(800.0, 600.0);
		assert_eq!(d.particles().len(), 80);
	}

	#[test]
	fn test_fade_in_only_once() {
		let mut d = driver();
		assert!(d.mount(800.0, 600.0));
		assert!(!d.mount(800.0, 600.0));
		assert_eq!(d.particles().len(), 80);
	}

	#[test]
	fn test_tick_draws_every_particle() {
		let mut d = driver();
		d.mount(800.0, 600.0);
		assert!(d.tick(ThemeMode::Light));
		let circles = d
			.surface()
			.ops()
			.iter()
			.filter(|op| matches!(op, DrawOp::Circle { .. }))
			.count();
		assert_eq!(circles, 80);
	}

	#[test]
	fn test_resize_regenerates_particles() {
		let mut d = driver();
		d.mount(1920.0, 1080.0);
		let before = d.particles().particles().to_vec();

		assert!(d.resize(500.0, 400.0));
		assert_eq!(d.particles().len(), 50);
		assert_eq!(d.surface().size(), (500.0, 400.0));
		assert!(d.particles().particles().iter().all(|p| p.x < 500.0 && p.y < 400.0));

		// Same size again still regenerates rather than keeping the old set.
		assert!(d.resize(1920.0, 1080.0));
		assert_eq!(d.particles().len(), 150);
		assert_ne!(d.particles().particles(), &before[..]);
	}

	#[test]
	fn test_resize_storm_keeps_one_set() {
		let mut d = driver();
		d.mount(1920.0, 1080.0);
		for i in 0..500 {
			let w = 200.0 + (i % 20) as f64 * 90.0;
			d.resize(w, 700.0);
			assert_eq!(d.particles().len(), d.config().particle_count(w));
			assert!(d.tick(ThemeMode::Dark));
		}
		assert_eq!(d.phase(), DriverPhase::Running);
	}

	#[test]
	fn test_resize_to_zero_width() {
		let mut d = driver();
		d.mount(800.0, 600.0);
		d.resize(0.0, 600.0);
		assert!(d.particles().is_empty());
		assert!(d.tick(ThemeMode::Dark));
	}

	#[test]
	fn test_stale_tick_after_stop_is_noop() {
		let mut d = driver();
		d.mount(800.0, 600.0);
		d.tick(ThemeMode::Dark);
		d.stop();
		assert_eq!(d.phase(), DriverPhase::Stopped);

		let recorded = d.surface().ops().len();
		let snapshot = d.particles().particles().to_vec();
		assert!(!d.tick(ThemeMode::Dark));
		assert!(!d.resize(1024.0, 768.0));
		assert_eq!(d.surface().ops().len(), recorded);
		assert_eq!(d.particles().particles(), &snapshot[..]);
	}

	#[test]
	fn test_no_resume_after_stop() {
		let mut d = driver();
		d.mount(800.0, 600.0);
		d.stop();
		d.stop();
		assert!(!d.mount(800.0, 600.0));
		assert_eq!(d.phase(), DriverPhase::Stopped);
	}

	#[test]
	fn test_shared_tick_reschedules_while_running() {
		let shared = Rc::new(RefCell::new(driver()));
		shared.borrow_mut().mount(800.0, 600.0);
		let weak = Rc::downgrade(&shared);
		assert!(tick_shared(&weak, ThemeMode::Dark));
		assert!(!shared.borrow().surface().ops().is_empty());
	}

	#[test]
	fn test_late_callback_after_stop_draws_nothing() {
		let shared = Rc::new(RefCell::new(driver()));
		shared.borrow_mut().mount(800.0, 600.0);
		let weak = Rc::downgrade(&shared);
		shared.borrow_mut().stop();

		let recorded = shared.borrow().surface().ops().len();
		assert!(!tick_shared(&weak, ThemeMode::Dark));
		assert_eq!(shared.borrow().surface().ops().len(), recorded);
	}

	#[test]
	fn test_late_callback_after_drop_is_noop() {
		let shared = Rc::new(RefCell::new(driver()));
		shared.borrow_mut().mount(800.0, 600.0);
		let weak = Rc::downgrade(&shared);
		drop(shared);
		assert!(!tick_shared(&weak, ThemeMode::Light));
	}

	#[test]
	fn test_reentrant_callback_is_skipped() {
		let shared = Rc::new(RefCell::new(driver()));
		shared.borrow_mut().mount(800.0, 600.0);
		let weak = Rc::downgrade(&shared);
		let _held = shared.borrow_mut();
		assert!(!tick_shared(&weak, ThemeMode::Dark));
	}
}
