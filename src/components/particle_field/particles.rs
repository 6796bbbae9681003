//! Particle records and the store that owns one generation of them.

use super::rng::Rng;

/// Container area (px²) covered by one particle at density 1.0.
pub const AREA_PER_PARTICLE: f64 = 15_000.0;

pub const SIZE_MIN: f64 = 10.0;
pub const SIZE_SPAN: f64 = 20.0;
pub const OPACITY_MIN: f64 = 0.2;
pub const OPACITY_SPAN: f64 = 0.6;
pub const CONNECTION_MIN: f64 = 80.0;
pub const CONNECTION_SPAN: f64 = 100.0;

/// Largest connection radius a particle can be created with (exclusive).
pub const CONNECTION_MAX: f64 = CONNECTION_MIN + CONNECTION_SPAN;

/// A single floating glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub id: usize,
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub vx: f64,
	pub vy: f64,
	pub vz: f64,
	/// Z-axis rotation in degrees.
	pub rotation: f64,
	/// Degrees per frame.
	pub rotation_speed: f64,
	/// Index into the theme's icon set.
	pub glyph: usize,
	pub size: f64,
	pub opacity: f64,
	/// Index into the theme's color palette.
	pub color: usize,
	/// This particle's share of the pairwise link threshold.
	pub connection_radius: f64,
}

/// Parameters a generation of particles is created from.
#[derive(Clone, Copy, Debug)]
pub struct SpawnParams {
	pub density: f64,
	pub speed: f64,
	pub max_depth: f64,
	pub palette_len: usize,
	pub glyph_count: usize,
}

/// Number of particles for a container. Pure in its inputs; zero for an
/// unmeasured container or a non-positive density.
pub fn particle_count(width: f64, height: f64, density: f64) -> usize {
	if !(width > 0.0 && height > 0.0 && density > 0.0) || !(width * height).is_finite() {
		return 0;
	}
	((width * height) / (AREA_PER_PARTICLE / density)).floor() as usize
}

/// Owns every particle of the current generation.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
}

impl ParticleStore {
	/// Create a full generation for a `width × height` container, seeded from
	/// the container size.
	pub fn new(width: f64, height: f64, params: &SpawnParams) -> Self {
		let count = particle_count(width, height, params.density);
		let mut rng = Rng::for_viewport(width, height);
		let particles = (0..count)
			.map(|id| Self::spawn(id, &mut rng, width, height, params))
			.collect();

		Self {
			particles,
			width,
			height,
		}
	}

	fn spawn(id: usize, rng: &mut Rng, width: f64, height: f64, params: &SpawnParams) -> Particle {
		let m = params.max_depth;
		Particle {
			id,
			x: rng.range(0.0, width),
			y: rng.range(0.0, height),
			z: rng.range(-m, m),
			vx: rng.symmetric(0.25) * params.speed,
			vy: rng.symmetric(0.25) * params.speed,
			vz: rng.symmetric(0.15) * params.speed,
			rotation: rng.range(0.0, 360.0),
			rotation_speed: rng.symmetric(1.0) * params.speed,
			glyph: rng.pick(params.glyph_count),
			size: SIZE_MIN + rng.next_f64() * SIZE_SPAN,
			opacity: OPACITY_MIN + rng.next_f64() * OPACITY_SPAN,
			color: rng.pick(params.palette_len),
			connection_radius: CONNECTION_MIN + rng.next_f64() * CONNECTION_SPAN,
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}
}
