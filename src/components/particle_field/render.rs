//! Canvas rendering for the particle field.
//!
//! Rendering is split into two passes:
//! 1. [`build_frame`] turns a particle snapshot and its links into an ordered
//!    list of [`DrawCommand`]s (links first, so glyphs sit on top).
//! 2. [`paint`] replays those commands on a 2D canvas context.
//!
//! The first pass is pure and runs in tests without a browser.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::grid::Link;
use super::particles::Particle;
use super::projection::Projected;
use super::scale::SurfaceSize;
use super::theme::Theme;

/// Glow radius as a fraction of the projected glyph size.
pub const GLOW_FACTOR: f64 = 0.5;

/// One immutable drawing step, in CSS pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// A proximity link between two projected positions.
	Link {
		from: (f64, f64),
		to: (f64, f64),
		alpha: f64,
	},
	/// A glyph centred at `(x, y)`.
	Glyph {
		x: f64,
		y: f64,
		/// Radians, clockwise on screen.
		rotation: f64,
		/// Projected font size.
		size: f64,
		alpha: f64,
		/// Shadow blur for the glow pass.
		blur: f64,
		glyph: usize,
		color: usize,
	},
}

/// Build the draw list for one frame. `projected` and `particles` must be
/// index-aligned (see [`SpatialGrid::projected`](super::grid::SpatialGrid::projected)).
pub fn build_frame(
	particles: &[Particle],
	projected: &[Projected],
	links: &[Link],
	out: &mut Vec<DrawCommand>,
) {
	out.clear();

	for link in links {
		let alpha = link.alpha();
		if alpha <= 0.0 {
			continue;
		}
		let (a, b) = (&projected[link.a], &projected[link.b]);
		out.push(DrawCommand::Link {
			from: (a.x, a.y),
			to: (b.x, b.y),
			alpha,
		});
	}

	for (p, proj) in particles.iter().zip(projected) {
		if !proj.is_visible() {
			continue;
		}
		let size = p.size * proj.scale;
		out.push(DrawCommand::Glyph {
			x: proj.x,
			y: proj.y,
			rotation: p.rotation * PI / 180.0,
			size,
			alpha: (p.opacity * proj.scale).min(1.0),
			blur: size * GLOW_FACTOR,
			glyph: p.glyph,
			color: p.color,
		});
	}
}

/// Replay `commands` onto the canvas. The context transform is reset to the
/// device pixel ratio first, so commands stay in CSS pixels.
pub fn paint(
	ctx: &CanvasRenderingContext2d,
	commands: &[DrawCommand],
	surface: &SurfaceSize,
	theme: &Theme,
) {
	let ratio = surface.pixel_ratio();
	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	ctx.clear_rect(0.0, 0.0, surface.css_width(), surface.css_height());

	let _ = ctx.set_global_composite_operation("source-over");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for command in commands {
		match *command {
			DrawCommand::Link { from, to, alpha } => draw_link(ctx, theme, from, to, alpha),
			DrawCommand::Glyph {
				x,
				y,
				rotation,
				size,
				alpha,
				blur,
				glyph,
				color,
			} => {
				ctx.save();
				let _ = ctx.translate(x, y);
				let _ = ctx.rotate(rotation);
				draw_glyph(ctx, theme, size, alpha, blur, glyph, color);
				ctx.restore();
			}
		}
	}

	ctx.set_global_alpha(1.0);
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	from: (f64, f64),
	to: (f64, f64),
	alpha: f64,
) {
	ctx.set_global_alpha(alpha);
	ctx.set_stroke_style_str(&theme.link_color);
	ctx.set_line_width(theme.link_width);
	ctx.begin_path();
	ctx.move_to(from.0, from.1);
	ctx.line_to(to.0, to.1);
	ctx.stroke();
}

fn draw_glyph(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	size: f64,
	alpha: f64,
	blur: f64,
	glyph: usize,
	color: usize,
) {
	let (icon, color) = (theme.icon(glyph), theme.color(color));

	ctx.set_global_alpha(alpha);
	ctx.set_font(&theme.font(size));

	// Glow
	ctx.set_shadow_color(color);
	ctx.set_shadow_blur(blur);
	ctx.set_fill_style_str(color);
	let _ = ctx.fill_text(icon, 0.0, 0.0);

	// Outline
	ctx.set_shadow_blur(0.0);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(theme.outline_width);
	let _ = ctx.stroke_text(icon, 0.0, 0.0);
}

#[cfg(test)]
mod tests {
	use super::super::grid::{LINK_OPACITY, SpatialGrid};
	use super::super::projection::project;
	use super::*;

	fn particle(id: usize, x: f64, y: f64, z: f64) -> Particle {
		Particle {
			id,
			x,
			y,
			z,
			vx: 0.0,
			vy: 0.0,
			vz: 0.0,
			rotation: 90.0,
			rotation_speed: 0.0,
			glyph: id,
			size: 20.0,
			opacity: 0.5,
			color: id,
			connection_radius: 150.0,
		}
	}

	fn frame(particles: &[Particle]) -> Vec<DrawCommand> {
		let mut grid = SpatialGrid::new();
		grid.rebuild(particles, 1000.0, 800.0);
		let mut links = Vec::new();
		grid.links(particles, &mut links);
		let mut out = Vec::new();
		build_frame(particles, grid.projected(), &links, &mut out);
		out
	}

	#[test]
	fn empty_snapshot_draws_nothing() {
		assert!(frame(&[]).is_empty());
	}

	#[test]
	fn links_come_before_glyphs() {
		let particles = vec![particle(0, 100.0, 100.0, 0.0), particle(1, 140.0, 100.0, 0.0)];
		let commands = frame(&particles);
		assert_eq!(commands.len(), 3);
		assert!(matches!(commands[0], DrawCommand::Link { .. }));
		assert!(matches!(commands[1], DrawCommand::Glyph { glyph: 0, .. }));
		assert!(matches!(commands[2], DrawCommand::Glyph { glyph: 1, .. }));
	}

	#[test]
	fn link_alpha_reflects_proximity() {
		let particles = vec![particle(0, 100.0, 100.0, 0.0), particle(1, 175.0, 100.0, 0.0)];
		let commands = frame(&particles);
		let DrawCommand::Link { from, to, alpha } = commands[0] else {
			panic!("expected a link first, got {:?}", commands[0]);
		};
		assert_eq!(from, (100.0, 100.0));
		assert_eq!(to, (175.0, 100.0));
		assert!((alpha - 0.5 * LINK_OPACITY).abs() < 1e-12);
	}

	#[test]
	fn glyphs_scale_with_depth() {
		let p = particle(0, 400.0, 300.0, 800.0);
		let commands = frame(std::slice::from_ref(&p));
		let DrawCommand::Glyph {
			x,
			y,
			rotation,
			size,
			alpha,
			blur,
			..
		} = commands[0]
		else {
			panic!("expected a glyph");
		};
		let proj = project(&p);
		assert_eq!(proj.scale, 0.5);
		assert_eq!((x, y), (200.0, 150.0));
		assert!((rotation - PI / 2.0).abs() < 1e-12);
		assert_eq!(size, 10.0);
		assert_eq!(alpha, 0.25);
		assert_eq!(blur, 5.0);
	}

	#[test]
	fn glyph_alpha_never_exceeds_one() {
		let mut p = particle(0, 10.0, 10.0, -700.0);
		p.opacity = 0.8;
		let commands = frame(&[p]);
		let DrawCommand::Glyph { alpha, .. } = commands[0] else {
			panic!("expected a glyph");
		};
		assert_eq!(alpha, 1.0);
	}

	#[test]
	fn invisible_particles_are_skipped() {
		let commands = frame(&[particle(0, 10.0, 10.0, 9000.0)]);
		assert!(commands.is_empty());
	}
}
