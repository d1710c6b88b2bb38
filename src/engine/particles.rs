//! Bouncing particles for the background effect.
//!
//! Particles carry a fixed velocity chosen at creation. The only thing that
//! ever changes a velocity is reflection at the canvas edges.

use rand::Rng;

/// Horizontal pixels per particle when deriving the particle count from the
/// canvas width.
pub const PIXELS_PER_PARTICLE: f64 = 10.0;

/// A single floating point mass in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
	/// Horizontal position in pixels.
	pub x: f64,
	/// Vertical position in pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
}

impl Particle {
	/// Particle at `(x, y)` moving by `(vx, vy)` each frame.
	pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
		Self { x, y, vx, vy }
	}

	/// Advance one frame, then reflect each axis that left `[0, width] x [0, height]`.
	///
	/// Reflection only flips the sign of the velocity; the particle is not
	/// pushed back inside, so a fast particle may sit outside the bounds for a
	/// single frame before it heads back in.
	pub fn step(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	/// Euclidean distance between the two positions.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// Number of particles for a canvas of the given width: one per
/// [`PIXELS_PER_PARTICLE`] pixels, capped at `max_count`.
pub fn particle_count(width: f64, max_count: usize) -> usize {
	// Also rejects NaN.
	if !(width > 0.0) {
		return 0;
	}
	((width / PIXELS_PER_PARTICLE).floor() as usize).min(max_count)
}

/// The full set of particles drawn on one canvas.
///
/// Particles have no identity beyond their index. The set is never resized in
/// place; a new canvas size gets a freshly initialized set.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
	particles: Vec<Particle>,
}

impl ParticleSet {
	/// Scatter [`particle_count`] particles uniformly over the canvas, each
	/// velocity component drawn from `[-speed/2, speed/2)`.
	pub fn initialize<R: Rng + ?Sized>(
		width: f64,
		height: f64,
		max_count: usize,
		speed: f64,
		rng: &mut R,
	) -> Self {
		let count = particle_count(width, max_count);
		let mut particles = Vec::with_capacity(count);

		for _ in 0..count {
			particles.push(Particle {
				x: rng.r#gen::<f64>() * width,
				y: rng.r#gen::<f64>() * height,
				vx: (rng.r#gen::<f64>() - 0.5) * speed,
				vy: (rng.r#gen::<f64>() - 0.5) * speed,
			});
		}

		Self { particles }
	}

	/// Build a set from explicit particles, keeping their order.
	pub fn from_particles(particles: Vec<Particle>) -> Self {
		Self { particles }
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether there are no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// The particles, in creation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Step every particle once. Particles do not interact, so order is irrelevant.
	pub fn step_all(&mut self, width: f64, height: f64) {
		for p in &mut self.particles {
			p.step(width, height);
		}
	}
}
