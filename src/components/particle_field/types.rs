//! Configuration accepted by the particle background component.

use log::warn;
use serde::Deserialize;

use super::particles::CONNECTION_MAX;
use super::projection::PERSPECTIVE;
use super::theme::{BlendMode, DEFAULT_COLORS, DEFAULT_ICONS};

/// Deepest volume the camera can frame. Particles stay far enough in front of
/// the eye that their projections remain bounded.
pub const MAX_DEPTH_LIMIT: f64 = PERSPECTIVE - CONNECTION_MAX;

/// Options for the particle background. Every field has a default, so any
/// subset may be supplied as JSON (keys are camelCase).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
	/// Particle count multiplier per unit of container area.
	pub density: f64,
	/// Whether particles are drawn toward the pointer.
	pub interactive: bool,
	/// Global multiplier on initial velocities, spin, and pointer pull.
	pub speed: f64,
	/// Depth half-extent; particles live in `[-max_depth, max_depth]`.
	/// Capped at [`MAX_DEPTH_LIMIT`].
	pub max_depth: f64,
	/// CSS colors particles are tinted with.
	pub colors: Vec<String>,
	/// Glyphs drawn for particles.
	pub icons: Vec<String>,
	/// CSS `mix-blend-mode` of the canvas against the page (e.g. "screen",
	/// "lighter").
	pub blend_mode: String,
	/// Link stroke color. Defaults to the first palette color.
	pub link_color: Option<String>,
	/// CSS opacity of the canvas element.
	pub opacity: f64,
	/// Stacking order of the container.
	pub z_index: i32,
	/// Extra classes added to the container.
	pub class_name: Option<String>,
	/// Extra inline CSS appended to the container style.
	pub style: Option<String>,
}

impl Default for BackdropConfig {
	fn default() -> Self {
		Self {
			density: 0.8,
			interactive: true,
			speed: 1.0,
			max_depth: 250.0,
			colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
			icons: DEFAULT_ICONS.iter().map(|i| i.to_string()).collect(),
			blend_mode: "screen".into(),
			link_color: None,
			opacity: 0.6,
			z_index: 0,
			class_name: None,
			style: None,
		}
	}
}

impl BackdropConfig {
	/// Parse config JSON, falling back to defaults on malformed input.
	pub fn from_json(json: &str) -> Self {
		match serde_json::from_str::<BackdropConfig>(json) {
			Ok(config) => config.sanitized(),
			Err(e) => {
				warn!("particle-backdrop: invalid config, using defaults: {}", e);
				Self::default()
			}
		}
	}

	/// Replace values the engine cannot work with by their defaults.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		if !self.density.is_finite() || self.density < 0.0 {
			warn!("particle-backdrop: density {} out of range, using {}", self.density, defaults.density);
			self.density = defaults.density;
		}
		if !self.speed.is_finite() || self.speed < 0.0 {
			warn!("particle-backdrop: speed {} out of range, using {}", self.speed, defaults.speed);
			self.speed = defaults.speed;
		}
		if !self.max_depth.is_finite() || self.max_depth <= 0.0 {
			warn!("particle-backdrop: maxDepth {} out of range, using {}", self.max_depth, defaults.max_depth);
			self.max_depth = defaults.max_depth;
		}
		if self.max_depth > MAX_DEPTH_LIMIT {
			warn!("particle-backdrop: maxDepth {} too deep, using {}", self.max_depth, MAX_DEPTH_LIMIT);
			self.max_depth = MAX_DEPTH_LIMIT;
		}
		if !self.opacity.is_finite() {
			self.opacity = defaults.opacity;
		}
		self.opacity = self.opacity.clamp(0.0, 1.0);

		self.colors.retain(|c| !c.trim().is_empty());
		if self.colors.is_empty() {
			warn!("particle-backdrop: empty color palette, using defaults");
			self.colors = defaults.colors;
		}
		self.icons.retain(|i| !i.trim().is_empty());
		if self.icons.is_empty() {
			warn!("particle-backdrop: empty icon set, using defaults");
			self.icons = defaults.icons;
		}
		if BlendMode::from_name(&self.blend_mode).is_none() {
			warn!("particle-backdrop: unknown blend mode {:?}, using {:?}", self.blend_mode, defaults.blend_mode);
			self.blend_mode = defaults.blend_mode;
		}

		self
	}

	/// Inline style for the full-viewport container.
	pub fn container_style(&self) -> String {
		let mut style = format!(
			"position: fixed; inset: 0; pointer-events: none; background: transparent; z-index: {};",
			self.z_index
		);
		if let Some(extra) = &self.style {
			style.push(' ');
			style.push_str(extra.trim());
		}
		style
	}

	/// Inline style for the canvas. Backing-store size is set separately.
	pub fn canvas_style(&self) -> String {
		let blend = BlendMode::from_name(&self.blend_mode).unwrap_or_default();
		format!(
			"display: block; width: 100%; height: 100%; opacity: {}; mix-blend-mode: {};",
			self.opacity,
			blend.css_name()
		)
	}

	/// Container class list, always including the component's own class.
	pub fn container_class(&self) -> String {
		match &self.class_name {
			Some(extra) if !extra.trim().is_empty() => {
				format!("particle-backdrop {}", extra.trim())
			}
			_ => "particle-backdrop".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = BackdropConfig::from_json(r#"{ "density": 1.0, "maxDepth": 300 }"#);
		assert_eq!(config.density, 1.0);
		assert_eq!(config.max_depth, 300.0);
		assert!(config.interactive);
		assert_eq!(config.blend_mode, "screen");
	}

	#[test]
	fn full_json_is_read() {
		let config = BackdropConfig::from_json(
			r#"{
				"density": 1,
				"speed": 0.8,
				"maxDepth": 250,
				"interactive": false,
				"blendMode": "lighter",
				"colors": ["hsl(212, 100%, 65%)", "hsl(270, 60%, 45%)"],
				"icons": ["🧠", "💻"],
				"zIndex": 2,
				"className": "bg",
				"style": "filter: blur(1px);"
			}"#,
		);
		assert_eq!(config.speed, 0.8);
		assert!(!config.interactive);
		assert_eq!(config.blend_mode, "lighter");
		assert_eq!(config.colors.len(), 2);
		assert_eq!(config.icons, vec!["🧠".to_string(), "💻".to_string()]);
		assert_eq!(config.z_index, 2);
		assert_eq!(config.container_class(), "particle-backdrop bg");
		assert!(config.container_style().ends_with("filter: blur(1px);"));
	}

	#[test]
	fn malformed_json_falls_back() {
		assert_eq!(BackdropConfig::from_json("{ nope"), BackdropConfig::default());
	}

	#[test]
	fn sanitize_repairs_bad_values() {
		let config = BackdropConfig {
			density: -1.0,
			speed: f64::NAN,
			max_depth: 0.0,
			colors: vec!["  ".into()],
			icons: vec![],
			blend_mode: "plasma".into(),
			opacity: 3.0,
			..BackdropConfig::default()
		}
		.sanitized();
		let defaults = BackdropConfig::default();
		assert_eq!(config.density, defaults.density);
		assert_eq!(config.speed, defaults.speed);
		assert_eq!(config.max_depth, defaults.max_depth);
		assert_eq!(config.colors, defaults.colors);
		assert_eq!(config.icons, defaults.icons);
		assert_eq!(config.blend_mode, "screen");
		assert_eq!(config.opacity, 1.0);
	}

	#[test]
	fn depth_is_capped_in_front_of_the_eye() {
		let config = BackdropConfig::from_json(r#"{ "maxDepth": 1000 }"#);
		assert_eq!(config.max_depth, MAX_DEPTH_LIMIT);
		assert!(config.max_depth < PERSPECTIVE);
		let edge = BackdropConfig { max_depth: MAX_DEPTH_LIMIT, ..BackdropConfig::default() }.sanitized();
		assert_eq!(edge.max_depth, MAX_DEPTH_LIMIT);
	}

	#[test]
	fn canvas_style_carries_blend_and_opacity() {
		assert_eq!(
			BackdropConfig::default().canvas_style(),
			"display: block; width: 100%; height: 100%; opacity: 0.6; mix-blend-mode: screen;"
		);
		let lighter = BackdropConfig::from_json(r#"{ "blendMode": "lighter", "opacity": 1 }"#);
		assert!(lighter.canvas_style().ends_with("opacity: 1; mix-blend-mode: plus-lighter;"));
	}

	#[test]
	fn zero_density_is_allowed() {
		let config = BackdropConfig { density: 0.0, ..BackdropConfig::default() }.sanitized();
		assert_eq!(config.density, 0.0);
	}
}
