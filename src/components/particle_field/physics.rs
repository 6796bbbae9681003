//! Per-frame integration: drift, spin, wraparound, damping, pointer pull.
//!
//! Everything here is a plain numeric transform over the store; there is no
//! failure path.

use super::particles::Particle;

/// Distance past the container edge a particle may travel before wrapping.
pub const WRAP_MARGIN: f64 = 50.0;
/// Velocity multiplier applied every frame.
pub const DAMPING: f64 = 0.99;
/// Pointer influence radius in pixels.
pub const ATTRACT_RADIUS: f64 = 100.0;
/// Peak velocity increment per frame at the pointer itself.
pub const ATTRACT_STRENGTH: f64 = 0.02;
/// Below this distance the pointer direction is undefined; no force applies.
pub const ATTRACT_EPSILON: f64 = 1e-6;

/// Bounds and tuning for one integration step.
#[derive(Clone, Copy, Debug)]
pub struct StepParams {
	pub width: f64,
	pub height: f64,
	pub max_depth: f64,
	pub speed: f64,
	/// Pointer position in container coordinates, when interaction is on and
	/// the pointer has been seen.
	pub pointer: Option<(f64, f64)>,
}

/// Wrap `value` onto the half-open interval `[lo, hi)`.
pub fn wrap(value: f64, lo: f64, hi: f64) -> f64 {
	let span = hi - lo;
	if span <= 0.0 || !value.is_finite() {
		return lo;
	}
	if (lo..hi).contains(&value) {
		return value;
	}
	// rem_euclid (and the add back) can round up to `hi` for offsets just
	// below zero
	let wrapped = lo + (value - lo).rem_euclid(span);
	if wrapped >= hi { lo } else { wrapped }
}

/// Advance every particle by one frame.
pub fn step(particles: &mut [Particle], params: &StepParams) {
	for p in particles.iter_mut() {
		step_particle(p, params);
	}
}

fn step_particle(p: &mut Particle, params: &StepParams) {
	p.x += p.vx;
	p.y += p.vy;
	p.z += p.vz;

	p.rotation = (p.rotation + p.rotation_speed).rem_euclid(360.0);

	p.x = wrap(p.x, -WRAP_MARGIN, params.width + WRAP_MARGIN);
	p.y = wrap(p.y, -WRAP_MARGIN, params.height + WRAP_MARGIN);
	p.z = wrap(p.z, -params.max_depth, params.max_depth);

	p.vx *= DAMPING;
	p.vy *= DAMPING;
	p.vz *= DAMPING;

	if let Some((px, py)) = params.pointer {
		let (dx, dy) = (px - p.x, py - p.y);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance > ATTRACT_EPSILON && distance < ATTRACT_RADIUS {
			let force = (ATTRACT_RADIUS - distance) / ATTRACT_RADIUS;
			let pull = force * ATTRACT_STRENGTH * params.speed;
			p.vx += dx / distance * pull;
			p.vy += dy / distance * pull;
		}
	}
}
