//! Visual theming for the particle field.
//!
//! Holds the default palette and glyph set, the blend modes the canvas can be
//! composited onto the page with, and the resolved [`Theme`] the painter
//! reads from.

use super::types::BackdropConfig;

/// Brand hues used when no palette is configured.
pub const DEFAULT_COLORS: [&str; 5] = [
	"hsl(212, 100%, 65%)", // Primary blue
	"hsl(270, 60%, 45%)",  // Purple
	"hsl(189, 100%, 60%)", // Cyan
	"hsl(212, 100%, 75%)", // Light blue
	"hsl(270, 60%, 65%)",  // Light purple
];

/// Tech glyphs used when no icon set is configured.
pub const DEFAULT_ICONS: [&str; 10] = [
	"🧠", "💻", "🔗", "⚡", "🌐", "📊", "🤖", "⚙️", "☁️", "🔮",
];

/// How the canvas is blended with the page content beneath it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
	/// Plain alpha compositing.
	Normal,
	/// Additive light.
	Lighter,
	/// Brightens what is underneath; the default.
	#[default]
	Screen,
	/// Darkens what is underneath.
	Multiply,
	/// Multiply or screen depending on the backdrop.
	Overlay,
	/// Keeps the darker of the two colors.
	Darken,
	/// Keeps the lighter of the two colors.
	Lighten,
}

impl BlendMode {
	/// Parse a blend mode name. Canvas compositing names are accepted as
	/// aliases (`"source-over"`, `"lighter"`).
	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"normal" | "source-over" => Some(Self::Normal),
			"lighter" | "plus-lighter" => Some(Self::Lighter),
			"screen" => Some(Self::Screen),
			"multiply" => Some(Self::Multiply),
			"overlay" => Some(Self::Overlay),
			"darken" => Some(Self::Darken),
			"lighten" => Some(Self::Lighten),
			_ => None,
		}
	}

	/// Value for the CSS `mix-blend-mode` property.
	pub fn css_name(self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::Lighter => "plus-lighter",
			Self::Screen => "screen",
			Self::Multiply => "multiply",
			Self::Overlay => "overlay",
			Self::Darken => "darken",
			Self::Lighten => "lighten",
		}
	}
}

/// Resolved drawing style. Particles refer to colors and glyphs by index.
#[derive(Clone, Debug)]
pub struct Theme {
	/// CSS colors, indexed by each particle's color slot.
	pub colors: Vec<String>,
	/// Glyph strings, indexed by each particle's glyph slot.
	pub icons: Vec<String>,
	/// Stroke color for proximity links.
	pub link_color: String,
	/// Link stroke width in CSS pixels.
	pub link_width: f64,
	/// Glyph outline width in CSS pixels.
	pub outline_width: f64,
	/// Font family glyphs are set in.
	pub font_family: &'static str,
}

impl Theme {
	/// Resolve a theme from configuration, filling in default palettes.
	pub fn from_config(config: &BackdropConfig) -> Self {
		let colors = if config.colors.is_empty() {
			DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
		} else {
			config.colors.clone()
		};
		let icons = if config.icons.is_empty() {
			DEFAULT_ICONS.iter().map(|i| i.to_string()).collect()
		} else {
			config.icons.clone()
		};
		let link_color = config
			.link_color
			.clone()
			.unwrap_or_else(|| colors[0].clone());

		Self {
			colors,
			icons,
			link_color,
			link_width: 1.0,
			outline_width: 1.0,
			font_family: "Arial",
		}
	}

	/// Palette color for an index, wrapping past the end.
	pub fn color(&self, index: usize) -> &str {
		&self.colors[index % self.colors.len()]
	}

	/// Glyph for an index, wrapping past the end.
	pub fn icon(&self, index: usize) -> &str {
		&self.icons[index % self.icons.len()]
	}

	/// CSS font shorthand for a glyph of the given pixel size.
	pub fn font(&self, size: f64) -> String {
		format!("{}px {}", size, self.font_family)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::from_config(&BackdropConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blend_names_map_to_css() {
		for name in ["normal", "screen", "multiply", "overlay", "darken", "lighten"] {
			let mode = BlendMode::from_name(name).unwrap();
			assert_eq!(mode.css_name(), name);
		}
		assert_eq!(BlendMode::from_name("lighter").map(BlendMode::css_name), Some("plus-lighter"));
		assert_eq!(BlendMode::from_name(" Screen "), Some(BlendMode::Screen));
		assert_eq!(BlendMode::from_name("source-over"), Some(BlendMode::Normal));
		assert_eq!(BlendMode::from_name("plasma"), None);
	}

	#[test]
	fn empty_palettes_fall_back_to_defaults() {
		let config = BackdropConfig {
			colors: vec![],
			icons: vec![],
			..BackdropConfig::default()
		};
		let theme = Theme::from_config(&config);
		assert_eq!(theme.colors.len(), DEFAULT_COLORS.len());
		assert_eq!(theme.icons.len(), DEFAULT_ICONS.len());
		assert_eq!(theme.link_color, DEFAULT_COLORS[0]);
	}

	#[test]
	fn link_color_override_is_kept() {
		let config = BackdropConfig {
			link_color: Some("#ffffff".into()),
			..BackdropConfig::default()
		};
		assert_eq!(Theme::from_config(&config).link_color, "#ffffff");
	}

	#[test]
	fn lookups_wrap_around() {
		let theme = Theme::default();
		assert_eq!(theme.color(DEFAULT_COLORS.len()), DEFAULT_COLORS[0]);
		assert_eq!(theme.icon(1), DEFAULT_ICONS[1]);
		assert_eq!(theme.font(12.5), "12.5px Arial");
	}
}
