//! Perspective projection from the particle volume onto the canvas plane.

use super::particles::Particle;

/// Distance from the eye to the `z = 0` plane.
pub const PERSPECTIVE: f64 = 800.0;

/// Particles whose scale falls below this are too far back to draw or link.
pub const MIN_VISIBLE_SCALE: f64 = 0.1;

/// A particle's apparent position and size factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

impl Projected {
	pub fn is_visible(&self) -> bool {
		self.scale >= MIN_VISIBLE_SCALE
	}
}

/// `perspective / (perspective + z)`; zero when the point is at or behind
/// the eye.
pub fn depth_scale(z: f64) -> f64 {
	let denom = PERSPECTIVE + z;
	if denom <= 0.0 { 0.0 } else { PERSPECTIVE / denom }
}

pub fn project(p: &Particle) -> Projected {
	let scale = depth_scale(p.z);
	Projected {
		x: p.x * scale,
		y: p.y * scale,
		scale,
	}
}
