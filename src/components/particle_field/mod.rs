//! 3D glyph particle background.
//!
//! Renders drifting icon glyphs on an HTML canvas with:
//! - Perspective projection of a shallow 3D volume
//! - Fading proximity links found through a uniform spatial grid
//! - Gentle attraction toward the pointer
//! - Pausing under `prefers-reduced-motion`
//!
//! The simulation (store, physics, grid, draw commands, scheduler) is plain
//! Rust and runs without a browser. [`ParticleBackground`] is the Leptos
//! host that connects it to a canvas.
//!
//! # Example
//!
//! ```ignore
//! use particle_backdrop::{BackdropConfig, ParticleBackground};
//!
//! let config = BackdropConfig {
//!     density: 1.0,
//!     blend_mode: "lighter".into(),
//!     ..BackdropConfig::default()
//! };
//!
//! view! { <ParticleBackground config=config /> }
//! ```

mod component;
mod grid;
mod particles;
mod physics;
mod projection;
mod render;
mod rng;
pub mod scale;
mod scheduler;
mod state;
pub mod theme;
mod types;

pub use component::ParticleBackground;
pub use scheduler::FrameDirective;
pub use state::{FieldEvent, ParticleFieldState};
pub use theme::{BlendMode, Theme};
pub use types::{BackdropConfig, MAX_DEPTH_LIMIT};
