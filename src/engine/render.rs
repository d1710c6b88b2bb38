//! Frame rendering for the particle background.
//!
//! Each frame clears the surface, steps and draws every particle, and links
//! nearby pairs with a line that fades out with distance. Drawing goes
//! through [`Surface`] so the algorithm does not care whether it lands on an
//! HTML canvas or a test recorder.

use crate::config::ParticleConfig;
use crate::theme::{Color, ThemeMode};

use super::particles::ParticleSet;

/// Opacity of a connection between two particles at the same spot.
pub const MAX_LINK_ALPHA: f64 = 0.8;

/// A 2D drawing target owned by one animation loop.
pub trait Surface {
	/// Current drawable size as `(width, height)`.
	fn size(&self) -> (f64, f64);
	/// Resize the backing buffer.
	fn resize(&mut self, width: f64, height: f64);
	/// Wipe the whole surface.
	fn clear(&mut self);
	/// Set fill and stroke color for subsequent draws.
	fn set_color(&mut self, color: Color);
	/// Fill a circle centered at `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
	/// Stroke a straight line at the given opacity without changing the
	/// opacity of later draws.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64);
	/// Drop any global transparency override back to fully opaque.
	fn reset_alpha(&mut self);
}

/// Opacity of the line between two particles `distance` apart, or `None`
/// when they are too far apart to be linked.
///
/// Strictly below the threshold: particles exactly `threshold` apart are not
/// linked.
pub fn connection_alpha(distance: f64, threshold: f64) -> Option<f64> {
	if distance < threshold {
		Some((1.0 - distance / threshold) * MAX_LINK_ALPHA)
	} else {
		None
	}
}

/// Step the simulation by one frame and draw it.
///
/// Particle `i` is stepped and drawn before its links to particles `j > i`
/// are checked, so those links see `i` at its new position and `j` at its
/// previous one. Every unordered pair is considered exactly once.
pub fn render_frame<S: Surface + ?Sized>(
	particles: &mut ParticleSet,
	surface: &mut S,
	config: &ParticleConfig,
	theme: ThemeMode,
) {
	let (width, height) = surface.size();

	surface.clear();
	surface.set_color(theme.ink());

	let particles = particles.particles_mut();
	for i in 0..particles.len() {
		particles[i].step(width, height);
		let p = particles[i];
		surface.fill_circle(p.x, p.y, config.radius);

		for other in &particles[i + 1..] {
			if let Some(alpha) = connection_alpha(p.distance_to(other), config.distance_threshold) {
				surface.stroke_line((p.x, p.y), (other.x, other.y), alpha);
			}
		}
	}

	surface.reset_alpha();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::particles::Particle;
	use crate::engine::testing::{DrawOp, RecordingSurface};

	fn still(x: f64, y: f64) -> Particle {
		Particle::new(x, y, 0.0, 0.0)
	}

	fn lines(ops: &[DrawOp]) -> Vec<(f64, f64, f64, f64, f64)> {
		ops.iter()
			.filter_map(|op| match *op {
				DrawOp::Line { from, to, alpha } => Some((from.0, from.1, to.0, to.1, alpha)),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn test_alpha_at_zero_distance() {
		assert_eq!(connection_alpha(0.0, 150.0), Some(0.8));
	}

	#[test]
	fn test_alpha_at_threshold_is_not_linked() {
		assert_eq!(connection_alpha(150.0, 150.0), None);
		assert_eq!(connection_alpha(151.0, 150.0), None);
		assert!(connection_alpha(149.999, 150.0).is_some());
	}

	#[test]
	fn test_alpha_decreases_with_distance() {
		let mut last = f64::INFINITY;
		for step in 0..150 {
			let alpha = connection_alpha(step as f64, 150.0).unwrap();
			assert!(alpha < last);
			assert!(alpha > 0.0 && alpha <= 0.8);
			last = alpha;
		}
	}

	#[test]
	fn test_frame_order() {
		let mut set = ParticleSet::from_particles(vec![still(10.0, 10.0), still(20.0, 10.0)]);
		let mut surface = RecordingSurface::new(100.0, 100.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Dark);

		let ops = surface.take_ops();
		assert_eq!(ops.first(), Some(&DrawOp::Clear));
		assert_eq!(ops.get(1), Some(&DrawOp::Color(Color::rgb(255, 255, 255))));
		assert_eq!(ops.get(2), Some(&DrawOp::Circle { x: 10.0, y: 10.0, radius: 2.0 }));
		assert!(matches!(ops.get(3), Some(DrawOp::Line { .. })));
		assert_eq!(ops.get(4), Some(&DrawOp::Circle { x: 20.0, y: 10.0, radius: 2.0 }));
		assert_eq!(ops.last(), Some(&DrawOp::ResetAlpha));
		assert_eq!(ops.len(), 6);
	}

	#[test]
	fn test_light_theme_uses_dark_ink() {
		let mut set = ParticleSet::from_particles(vec![still(1.0, 1.0)]);
		let mut surface = RecordingSurface::new(10.0, 10.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Light);
		assert!(surface.ops().contains(&DrawOp::Color(Color::rgb(0, 0, 0))));
	}

	#[test]
	fn test_each_pair_linked_once_with_fade() {
		// Three particles on a line: 0-1 at 30px, 1-2 at 120px, 0-2 at 150px.
		let mut set = ParticleSet::from_particles(vec![
			still(0.0, 50.0),
			still(30.0, 50.0),
			still(150.0, 50.0),
		]);
		let mut surface = RecordingSurface::new(200.0, 100.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Dark);

		let drawn = lines(surface.ops());
		assert_eq!(drawn.len(), 2);
		assert_eq!(drawn[0], (0.0, 50.0, 30.0, 50.0, (1.0 - 30.0 / 150.0) * 0.8));
		assert_eq!(drawn[1], (30.0, 50.0, 150.0, 50.0, (1.0 - 120.0 / 150.0) * 0.8));
	}

	#[test]
	fn test_coincident_particles_link_at_full_alpha() {
		let mut set = ParticleSet::from_particles(vec![still(5.0, 5.0), still(5.0, 5.0)]);
		let mut surface = RecordingSurface::new(10.0, 10.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Dark);
		let drawn = lines(surface.ops());
		assert_eq!(drawn.len(), 1);
		assert_eq!(drawn[0].4, 0.8);
	}

	#[test]
	fn test_render_steps_particles() {
		let mut set = ParticleSet::from_particles(vec![Particle::new(99.5, 10.0, 1.0, 0.0)]);
		let mut surface = RecordingSurface::new(100.0, 100.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Dark);

		let p = set.particles()[0];
		assert_eq!(p.x, 100.5);
		assert_eq!(p.vx, -1.0);
		assert!(surface.ops().contains(&DrawOp::Circle { x: 100.5, y: 10.0, radius: 2.0 }));
	}

	#[test]
	fn test_empty_set_still_clears() {
		let mut set = ParticleSet::default();
		let mut surface = RecordingSurface::new(0.0, 0.0);
		render_frame(&mut set, &mut surface, &ParticleConfig::default(), ThemeMode::Dark);
		assert_eq!(
			surface.ops(),
			&[DrawOp::Clear, DrawOp::Color(Color::rgb(255, 255, 255)), DrawOp::ResetAlpha]
		);
	}
}
