//! Uniform spatial grid over projected positions for link detection.
//!
//! Cells are at least as wide as the largest link threshold, so any linked
//! pair shares a cell or sits in adjacent cells. Each cell is paired with
//! itself and a half stencil of neighbours (right, down-left, down,
//! down-right), which visits every adjacent unordered pair exactly once.

use super::particles::{CONNECTION_MAX, Particle};
use super::projection::{Projected, project};

/// Cell edge length in projected pixels.
pub const CELL_SIZE: f64 = CONNECTION_MAX;

/// Opacity of a link between two coincident particles.
pub const LINK_OPACITY: f64 = 0.3;

/// Neighbour offsets `(dcol, drow)` scanned from each cell.
const HALF_STENCIL: [(isize, usize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// A link between two particles, `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	/// The lesser of the two particles' connection radii.
	pub threshold: f64,
}

impl Link {
	/// Fades linearly from [`LINK_OPACITY`] at distance 0 to zero at the
	/// threshold.
	pub fn alpha(&self) -> f64 {
		(1.0 - self.distance / self.threshold).max(0.0) * LINK_OPACITY
	}
}

/// Buckets of particle indices, rebuilt every frame.
#[derive(Clone, Debug, Default)]
pub struct SpatialGrid {
	cols: usize,
	rows: usize,
	origin_x: f64,
	origin_y: f64,
	cells: Vec<Vec<usize>>,
	projected: Vec<Projected>,
}

impl SpatialGrid {
	pub fn new() -> Self {
		Self::default()
	}

	/// Re-project every particle and re-bucket the visible ones. The grid
	/// covers the `width × height` canvas plus one cell of margin on every
	/// side; projections beyond it land in the nearest edge cell.
	pub fn rebuild(&mut self, particles: &[Particle], width: f64, height: f64) {
		self.projected.clear();
		self.projected.extend(particles.iter().map(project));

		let extent = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
		self.origin_x = -CELL_SIZE;
		self.origin_y = -CELL_SIZE;
		self.cols = (extent(width) / CELL_SIZE).ceil() as usize + 2;
		self.rows = (extent(height) / CELL_SIZE).ceil() as usize + 2;

		for cell in &mut self.cells {
			cell.clear();
		}
		self.cells.resize_with(self.cols * self.rows, Vec::new);

		for (i, p) in self.projected.iter().enumerate() {
			if p.is_visible() {
				let cell = self.cell_index(p.x, p.y);
				self.cells[cell].push(i);
			}
		}
	}

	// Clamping keeps neighbours within one cell of each other, so pairs
	// pushed to the edge are still scanned.
	fn cell_index(&self, x: f64, y: f64) -> usize {
		let clamp = |v: f64, origin: f64, count: usize| {
			((v - origin) / CELL_SIZE).floor().clamp(0.0, (count - 1) as f64) as usize
		};
		clamp(y, self.origin_y, self.rows) * self.cols + clamp(x, self.origin_x, self.cols)
	}

	/// Projections from the last rebuild, indexed like the particle slice.
	pub fn projected(&self) -> &[Projected] {
		&self.projected
	}

	#[cfg(test)]
	pub fn dimensions(&self) -> (usize, usize) {
		(self.cols, self.rows)
	}

	/// Visit every unordered pair of visible particles that share a cell or
	/// occupy adjacent cells. Each pair is visited once.
	pub fn for_each_candidate_pair(&self, mut visit: impl FnMut(usize, usize)) {
		for row in 0..self.rows {
			for col in 0..self.cols {
				let here = &self.cells[row * self.cols + col];
				if here.is_empty() {
					continue;
				}

				for (k, &a) in here.iter().enumerate() {
					for &b in &here[k + 1..] {
						visit(a, b);
					}
				}

				for &(dcol, drow) in &HALF_STENCIL {
					let ncol = col as isize + dcol;
					let nrow = row + drow;
					if ncol < 0 || ncol as usize >= self.cols || nrow >= self.rows {
						continue;
					}
					let there = &self.cells[nrow * self.cols + ncol as usize];
					for &a in here {
						for &b in there {
							visit(a, b);
						}
					}
				}
			}
		}
	}

	/// Collect links among `particles`, which must be the slice the grid was
	/// last rebuilt from. Distance uses the projected plane position plus the
	/// raw depth difference.
	pub fn links(&self, particles: &[Particle], out: &mut Vec<Link>) {
		out.clear();
		self.for_each_candidate_pair(|a, b| {
			let (pa, pb) = (&self.projected[a], &self.projected[b]);
			let (dx, dy) = (pa.x - pb.x, pa.y - pb.y);
			let dz = particles[a].z - particles[b].z;
			let distance = (dx * dx + dy * dy + dz * dz).sqrt();
			let threshold = particles[a]
				.connection_radius
				.min(particles[b].connection_radius);
			if distance < threshold {
				out.push(Link {
					a: a.min(b),
					b: a.max(b),
					distance,
					threshold,
				});
			}
		});
	}
}
