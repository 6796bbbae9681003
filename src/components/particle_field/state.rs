//! Animation controller owning all per-instance particle field state.
//!
//! Browser callbacks never touch the particles directly. Each one is turned
//! into a [`FieldEvent`] and passed to [`ParticleFieldState::handle`], and the
//! animation-frame callback calls [`ParticleFieldState::frame`] to advance the
//! simulation and get the commands to paint.

use log::debug;

use super::grid::{Link, SpatialGrid};
use super::particles::{ParticleStore, SpawnParams};
use super::physics::{self, StepParams};
use super::render::{self, DrawCommand};
use super::scale::SurfaceSize;
use super::scheduler::{FrameDirective, FrameScheduler, SchedulerEvent};
use super::theme::Theme;
use super::types::BackdropConfig;

/// Everything the host can report to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldEvent {
	/// The container was measured (or re-measured).
	Resize(SurfaceSize),
	/// Pointer position in container coordinates.
	PointerMove {
		/// Pixels from the container's left edge.
		x: f64,
		/// Pixels from the container's top edge.
		y: f64,
	},
	/// The pointer left the page; attraction stops until it returns.
	PointerLeave,
	/// The `prefers-reduced-motion` preference changed; `true` means reduce.
	ReducedMotionChanged(bool),
	/// The animation-frame callback finished painting.
	FrameCompleted,
	/// The host is being torn down.
	Unmount,
}

/// One particle background instance.
pub struct ParticleFieldState {
	config: BackdropConfig,
	theme: Theme,
	surface: SurfaceSize,
	store: ParticleStore,
	grid: SpatialGrid,
	links: Vec<Link>,
	commands: Vec<DrawCommand>,
	scheduler: FrameScheduler,
	pointer: Option<(f64, f64)>,
}

impl ParticleFieldState {
	/// Create an instance. The store stays empty until the first
	/// [`FieldEvent::Resize`] with a measured size arrives.
	pub fn new(config: BackdropConfig, reduced_motion: bool) -> (Self, FrameDirective) {
		let config = config.sanitized();
		let theme = Theme::from_config(&config);
		let (scheduler, directive) = FrameScheduler::mount(reduced_motion);

		let state = Self {
			config,
			theme,
			surface: SurfaceSize::default(),
			store: ParticleStore::default(),
			grid: SpatialGrid::new(),
			links: Vec::new(),
			commands: Vec::new(),
			scheduler,
			pointer: None,
		};
		(state, directive)
	}

	/// Apply one event and return what the host must do with its frame
	/// request. Only scheduler events ever yield something other than
	/// [`FrameDirective::Idle`].
	pub fn handle(&mut self, event: FieldEvent) -> FrameDirective {
		match event {
			FieldEvent::Resize(surface) => {
				let size_changed = surface.css_width() != self.store.width()
					|| surface.css_height() != self.store.height();
				self.surface = surface;
				if size_changed {
					self.regenerate();
				}
				FrameDirective::Idle
			}
			FieldEvent::PointerMove { x, y } => {
				if self.config.interactive {
					self.pointer = Some((x, y));
				}
				FrameDirective::Idle
			}
			FieldEvent::PointerLeave => {
				self.pointer = None;
				FrameDirective::Idle
			}
			FieldEvent::ReducedMotionChanged(reduced) => {
				self.scheduler.handle(SchedulerEvent::ReducedMotionChanged(reduced))
			}
			FieldEvent::FrameCompleted => self.scheduler.handle(SchedulerEvent::FrameCompleted),
			FieldEvent::Unmount => self.scheduler.handle(SchedulerEvent::Unmount),
		}
	}

	fn regenerate(&mut self) {
		let params = SpawnParams {
			density: self.config.density,
			speed: self.config.speed,
			max_depth: self.config.max_depth,
			palette_len: self.theme.colors.len(),
			glyph_count: self.theme.icons.len(),
		};
		self.store = ParticleStore::new(
			self.surface.css_width(),
			self.surface.css_height(),
			&params,
		);
		debug!(
			"particle-backdrop: {} particles for {}x{}",
			self.store.len(),
			self.surface.css_width(),
			self.surface.css_height()
		);
	}

	/// Advance one frame and return the commands to paint. Empty while the
	/// container is unmeasured.
	pub fn frame(&mut self) -> &[DrawCommand] {
		if !self.surface.is_measured() || self.store.is_empty() {
			self.commands.clear();
			return &self.commands;
		}

		let step = StepParams {
			width: self.store.width(),
			height: self.store.height(),
			max_depth: self.config.max_depth,
			speed: self.config.speed,
			pointer: self.pointer.filter(|_| self.config.interactive),
		};
		physics::step(&mut self.store.particles, &step);

		self.grid.rebuild(&self.store.particles, self.store.width(), self.store.height());
		self.grid.links(&self.store.particles, &mut self.links);
		render::build_frame(
			&self.store.particles,
			self.grid.projected(),
			&self.links,
			&mut self.commands,
		);
		&self.commands
	}

	/// The sanitized configuration in use.
	pub fn config(&self) -> &BackdropConfig {
		&self.config
	}

	/// Resolved palette, glyphs, and stroke widths.
	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Last measured container size.
	pub fn surface(&self) -> &SurfaceSize {
		&self.surface
	}

	#[cfg(test)]
	pub fn store(&self) -> &ParticleStore {
		&self.store
	}

	/// Pointer position attraction is currently aimed at, if any.
	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	#[cfg(test)]
	pub fn scheduler(&self) -> &FrameScheduler {
		&self.scheduler
	}
}

#[cfg(test)]
mod tests {
	use super::super::scheduler::RunState;
	use super::super::types::MAX_DEPTH_LIMIT;
	use super::*;

	fn resize(w: f64, h: f64) -> FieldEvent {
		FieldEvent::Resize(SurfaceSize::new(w, h, 1.0))
	}

	#[test]
	fn unmeasured_container_draws_nothing() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		assert!(state.frame().is_empty());
		state.handle(resize(0.0, 0.0));
		assert!(state.store().is_empty());
		assert!(state.frame().is_empty());
	}

	#[test]
	fn first_measurement_creates_the_field() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		state.handle(resize(1000.0, 800.0));
		assert_eq!(state.store().len(), 42);
		assert!(!state.frame().is_empty());
	}

	#[test]
	fn same_size_resize_keeps_particles() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		state.handle(resize(1000.0, 800.0));
		state.frame();
		let moved = state.store().particles.clone();
		state.handle(resize(1000.0, 800.0));
		assert_eq!(state.store().particles, moved);
	}

	#[test]
	fn pixel_ratio_change_keeps_particles() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		state.handle(resize(1000.0, 800.0));
		state.frame();
		let moved = state.store().particles.clone();
		state.handle(FieldEvent::Resize(SurfaceSize::new(1000.0, 800.0, 2.0)));
		assert_eq!(state.store().particles, moved);
		assert_eq!(state.surface().backing_size(), (2000, 1600));
	}

	#[test]
	fn new_size_regenerates_deterministically() {
		let (mut a, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		let (mut b, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		a.handle(resize(1280.0, 720.0));
		a.frame();
		a.handle(resize(1000.0, 800.0));
		b.handle(resize(1000.0, 800.0));
		assert_eq!(a.store().particles, b.store().particles);
	}

	#[test]
	fn resize_does_not_touch_run_state() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), true);
		assert_eq!(state.handle(resize(1000.0, 800.0)), FrameDirective::Idle);
		assert_eq!(state.scheduler().state(), RunState::Paused);
	}

	#[test]
	fn reduced_motion_at_mount_requests_nothing() {
		let (mut state, directive) = ParticleFieldState::new(BackdropConfig::default(), true);
		assert_eq!(directive, FrameDirective::Idle);
		assert_eq!(state.handle(FieldEvent::PointerMove { x: 5.0, y: 5.0 }), FrameDirective::Idle);
		assert_eq!(state.handle(FieldEvent::FrameCompleted), FrameDirective::Idle);
		assert_eq!(
			state.handle(FieldEvent::ReducedMotionChanged(false)),
			FrameDirective::RequestFrame
		);
	}

	#[test]
	fn deep_volume_stays_drawable() {
		let config = BackdropConfig {
			max_depth: 1000.0,
			..BackdropConfig::default()
		};
		let (mut state, _) = ParticleFieldState::new(config, false);
		state.handle(resize(755.0, 1080.0));
		for _ in 0..30 {
			assert!(!state.frame().is_empty());
		}
		for p in &state.store().particles {
			assert!(p.z.abs() <= MAX_DEPTH_LIMIT);
		}
	}

	#[test]
	fn pointer_is_ignored_when_not_interactive() {
		let config = BackdropConfig {
			interactive: false,
			..BackdropConfig::default()
		};
		let (mut state, _) = ParticleFieldState::new(config, false);
		state.handle(FieldEvent::PointerMove { x: 10.0, y: 20.0 });
		assert_eq!(state.pointer(), None);
	}

	#[test]
	fn pointer_leave_clears_attraction() {
		let (mut state, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		state.handle(FieldEvent::PointerMove { x: 10.0, y: 20.0 });
		assert_eq!(state.pointer(), Some((10.0, 20.0)));
		state.handle(FieldEvent::PointerLeave);
		assert_eq!(state.pointer(), None);
	}

	#[test]
	fn instances_are_independent() {
		let (mut a, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		let (mut b, _) = ParticleFieldState::new(BackdropConfig::default(), false);
		a.handle(resize(1000.0, 800.0));
		b.handle(resize(1000.0, 800.0));
		for _ in 0..5 {
			a.frame();
		}
		assert_ne!(a.store().particles, b.store().particles);
		a.handle(FieldEvent::Unmount);
		assert!(b.scheduler().is_running());
	}

	#[test]
	fn unmount_cancels_the_pending_frame() {
		let (mut state, directive) = ParticleFieldState::new(BackdropConfig::default(), false);
		assert_eq!(directive, FrameDirective::RequestFrame);
		assert_eq!(state.handle(FieldEvent::Unmount), FrameDirective::CancelFrame);
		assert_eq!(state.handle(FieldEvent::FrameCompleted), FrameDirective::Idle);
	}
}
