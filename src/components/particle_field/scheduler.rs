//! Frame scheduling as an explicit RUNNING/PAUSED state machine.
//!
//! The scheduler never touches the browser. It consumes events and answers
//! with a [`FrameDirective`] that the host applies
//! (`requestAnimationFrame` / `cancelAnimationFrame`). At most one frame
//! request is outstanding at any time.

use log::debug;

/// Whether frames are being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
	Running,
	Paused,
}

/// Inputs that can change the run state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerEvent {
	/// The in-flight frame callback ran to completion.
	FrameCompleted,
	/// The host's reduced-motion preference changed; `true` means "reduce".
	ReducedMotionChanged(bool),
	/// The component is being torn down.
	Unmount,
}

/// What the host must do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameDirective {
	/// Request exactly one animation frame.
	RequestFrame,
	/// Cancel the outstanding frame request.
	CancelFrame,
	/// Nothing to do.
	Idle,
}

/// Run state plus bookkeeping for the single outstanding frame request.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
	state: RunState,
	mounted: bool,
	frame_pending: bool,
}

impl FrameScheduler {
	/// Start a scheduler for a freshly mounted component.
	pub fn mount(reduced_motion: bool) -> (Self, FrameDirective) {
		let mut scheduler = Self {
			state: if reduced_motion {
				RunState::Paused
			} else {
				RunState::Running
			},
			mounted: true,
			frame_pending: false,
		};
		let directive = scheduler.request_if_running();
		debug!("particle-backdrop: scheduler mounted {:?}", scheduler.state);
		(scheduler, directive)
	}

	#[cfg(test)]
	pub fn state(&self) -> RunState {
		self.state
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.state == RunState::Running
	}

	#[cfg(test)]
	pub fn is_mounted(&self) -> bool {
		self.mounted
	}

	#[cfg(test)]
	pub fn frame_pending(&self) -> bool {
		self.frame_pending
	}

	/// Apply one event and say what the host must do.
	pub fn handle(&mut self, event: SchedulerEvent) -> FrameDirective {
		match event {
			SchedulerEvent::FrameCompleted => {
				self.frame_pending = false;
				self.request_if_running()
			}
			SchedulerEvent::ReducedMotionChanged(true) => {
				if self.state == RunState::Running {
					debug!("particle-backdrop: reduced motion on, pausing");
				}
				self.pause()
			}
			SchedulerEvent::ReducedMotionChanged(false) => {
				if !self.mounted || self.state == RunState::Running {
					return FrameDirective::Idle;
				}
				debug!("particle-backdrop: reduced motion off, resuming");
				self.state = RunState::Running;
				self.request_if_running()
			}
			SchedulerEvent::Unmount => {
				self.mounted = false;
				self.pause()
			}
		}
	}

	fn pause(&mut self) -> FrameDirective {
		self.state = RunState::Paused;
		if self.frame_pending {
			self.frame_pending = false;
			FrameDirective::CancelFrame
		} else {
			FrameDirective::Idle
		}
	}

	fn request_if_running(&mut self) -> FrameDirective {
		if self.mounted && self.state == RunState::Running && !self.frame_pending {
			self.frame_pending = true;
			FrameDirective::RequestFrame
		} else {
			FrameDirective::Idle
		}
	}
}
