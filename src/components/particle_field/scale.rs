//! Device-pixel-ratio scaling for the canvas backing store.
//!
//! # Coordinate Spaces
//!
//! - **CSS pixels**: layout units. The particle volume, pointer, and all draw
//!   commands use these.
//! - **Device pixels**: the canvas backing store. Its size is the CSS size
//!   multiplied by the pixel ratio, so glyphs and links stay crisp on
//!   high-density displays.

/// Measured container size plus the display's pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	css_width: f64,
	css_height: f64,
	pixel_ratio: f64,
}

impl Default for SurfaceSize {
	fn default() -> Self {
		Self {
			css_width: 0.0,
			css_height: 0.0,
			pixel_ratio: 1.0,
		}
	}
}

impl SurfaceSize {
	/// Non-finite or negative sizes are treated as unmeasured (zero), and an
	/// unusable pixel ratio as 1.
	pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
		let sanitize = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
		Self {
			css_width: sanitize(css_width),
			css_height: sanitize(css_height),
			pixel_ratio: if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
				pixel_ratio
			} else {
				1.0
			},
		}
	}

	/// Container width in CSS pixels.
	pub fn css_width(&self) -> f64 {
		self.css_width
	}

	/// Container height in CSS pixels.
	pub fn css_height(&self) -> f64 {
		self.css_height
	}

	/// Device pixels per CSS pixel.
	pub fn pixel_ratio(&self) -> f64 {
		self.pixel_ratio
	}

	/// Whether layout has produced a usable size yet.
	pub fn is_measured(&self) -> bool {
		self.css_width > 0.0 && self.css_height > 0.0
	}

	/// Backing-store dimensions in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.css_width * self.pixel_ratio).round() as u32,
			(self.css_height * self.pixel_ratio).round() as u32,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn backing_store_follows_pixel_ratio() {
		let surface = SurfaceSize::new(800.0, 600.0, 2.0);
		assert_eq!(surface.backing_size(), (1600, 1200));
		let fractional = SurfaceSize::new(333.0, 100.0, 1.5);
		assert_eq!(fractional.backing_size(), (500, 150));
	}

	#[test]
	fn bad_inputs_are_sanitized() {
		let surface = SurfaceSize::new(f64::NAN, -5.0, 0.0);
		assert!(!surface.is_measured());
		assert_eq!(surface.pixel_ratio(), 1.0);
		assert_eq!(surface.backing_size(), (0, 0));
		assert!(!SurfaceSize::default().is_measured());
	}
}
