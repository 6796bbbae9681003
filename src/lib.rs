//! particle-backdrop: decorative 3D glyph particle background.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! drifting, perspective-projected icon glyphs joined by fading proximity
//! links, pulled gently toward the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{BackdropConfig, BlendMode, ParticleBackground};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-backdrop: logging initialized");
}

/// Load background options from a script element with id="particle-config".
/// Expected format: JSON object with camelCase keys, any subset of
/// [`BackdropConfig`].
fn load_backdrop_config() -> Option<BackdropConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let Some(element) = document.get_element_by_id("particle-config") else {
		info!("particle-backdrop: no config block, using defaults");
		return None;
	};
	let Ok(script) = element.dyn_into::<HtmlScriptElement>() else {
		warn!("particle-backdrop: #particle-config is not a script element");
		return None;
	};
	let json_text = script.text().ok()?;

	let config = BackdropConfig::from_json(&json_text);
	info!(
		"particle-backdrop: loaded config (density {}, {} colors, {} icons)",
		config.density,
		config.colors.len(),
		config.icons.len()
	);
	Some(config)
}

/// Main application component.
/// Loads background options from the DOM and renders the background behind
/// the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_backdrop_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="page">
			<ParticleBackground config=config />
			<main class="page-content">
				<h1>"Portfolio"</h1>
				<p class="subtitle">"Move the pointer to pull the glyphs."</p>
			</main>
		</div>
	}
}
