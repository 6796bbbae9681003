//! Leptos component hosting the particle field on a canvas.
//!
//! The component fills its container with a canvas and wires four browser
//! inputs into the controller as [`FieldEvent`]s: the animation-frame
//! callback, a `ResizeObserver` on the container, `mousemove` on the window
//! (interactive mode only), and the `prefers-reduced-motion` media query.
//! Teardown cancels the pending frame and detaches every listener.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, MediaQueryList, MediaQueryListEvent,
	MouseEvent, ResizeObserver, Window,
};

use super::render;
use super::scale::SurfaceSize;
use super::scheduler::FrameDirective;
use super::state::{FieldEvent, ParticleFieldState};
use super::theme::Theme;
use super::types::BackdropConfig;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;
type SharedHost = Rc<RefCell<Option<Host>>>;
type SharedListeners = Rc<RefCell<Option<Listeners>>>;

/// Controller plus the browser handles it draws through.
struct Host {
	window: Window,
	container: Element,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	theme: Theme,
	state: ParticleFieldState,
	frame_handle: Option<i32>,
}

impl Host {
	fn apply(&mut self, directive: FrameDirective, animate: &FrameCallback) {
		match directive {
			FrameDirective::RequestFrame => {
				if let Some(ref cb) = *animate.borrow() {
					self.frame_handle = self
						.window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok();
				}
			}
			FrameDirective::CancelFrame => {
				if let Some(handle) = self.frame_handle.take() {
					let _ = self.window.cancel_animation_frame(handle);
				}
			}
			FrameDirective::Idle => {}
		}
	}

	/// Re-measure the container, resizing the backing store when needed.
	fn measure(&mut self) {
		let rect = self.container.get_bounding_client_rect();
		let surface = SurfaceSize::new(
			rect.width(),
			rect.height(),
			self.window.device_pixel_ratio(),
		);
		let (w, h) = surface.backing_size();
		if self.canvas.width() != w || self.canvas.height() != h {
			self.canvas.set_width(w);
			self.canvas.set_height(h);
		}
		self.state.handle(FieldEvent::Resize(surface));
	}

	fn pointer_position(&self, ev: &MouseEvent) -> (f64, f64) {
		let rect = self.container.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}
}

/// Listener closures and the targets they are attached to.
struct Listeners {
	window: Window,
	observer: Option<ResizeObserver>,
	on_resize: Option<Closure<dyn FnMut(js_sys::Array)>>,
	on_pointer_move: Option<Closure<dyn FnMut(MouseEvent)>>,
	on_pointer_leave: Option<(Element, Closure<dyn FnMut(MouseEvent)>)>,
	on_motion: Option<(MediaQueryList, Closure<dyn FnMut(MediaQueryListEvent)>)>,
}

impl Listeners {
	fn detach(self) {
		if let Some(observer) = self.observer {
			observer.disconnect();
		}
		drop(self.on_resize);
		if let Some(cb) = self.on_pointer_move {
			let _ = self
				.window
				.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		if let Some((target, cb)) = self.on_pointer_leave {
			let _ = target.remove_event_listener_with_callback("mouseleave", cb.as_ref().unchecked_ref());
		}
		if let Some((query, cb)) = self.on_motion {
			let _ = query.remove_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
		}
	}
}

/// Route an event to the controller and act on its directive.
fn dispatch(host: &SharedHost, animate: &FrameCallback, event: FieldEvent) {
	if let Some(ref mut h) = *host.borrow_mut() {
		let directive = h.state.handle(event);
		h.apply(directive, animate);
	}
}

fn unmount(host: &SharedHost, animate: &FrameCallback, listeners: &SharedListeners) {
	dispatch(host, animate, FieldEvent::Unmount);
	if let Some(l) = listeners.borrow_mut().take() {
		l.detach();
	}
	animate.borrow_mut().take();
	host.borrow_mut().take();
	info!("particle-backdrop: unmounted");
}

/// Renders the 3D glyph particle background behind page content.
///
/// The container is fixed to the viewport and ignores pointer events. The
/// canvas backing store tracks the container size and device pixel ratio.
/// Animation is paused while the user prefers reduced motion.
#[component]
pub fn ParticleBackground(#[prop(optional)] config: BackdropConfig) -> impl IntoView {
	let config = config.sanitized();
	let container_class = config.container_class();
	let container_style = config.container_style();
	let canvas_style = config.canvas_style();

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host: SharedHost = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let listeners: SharedListeners = Rc::new(RefCell::new(None));
	let (host_init, animate_init, listeners_init) =
		(host.clone(), animate.clone(), listeners.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("particle-backdrop: no window, background disabled");
			return;
		};
		let Some(container) = canvas.parent_element() else {
			warn!("particle-backdrop: canvas has no container");
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particle-backdrop: 2d context unavailable");
			return;
		};

		let motion_query = window.match_media(REDUCED_MOTION_QUERY).ok().flatten();
		let reduced_motion = motion_query.as_ref().is_some_and(|q| q.matches());
		let (state, directive) = ParticleFieldState::new(config.clone(), reduced_motion);
		let interactive = state.config().interactive;
		info!(
			"particle-backdrop: mounted (interactive: {}, reduced motion: {})",
			interactive, reduced_motion
		);

		*host_init.borrow_mut() = Some(Host {
			window: window.clone(),
			container: container.clone(),
			canvas,
			ctx,
			theme: state.theme().clone(),
			state,
			frame_handle: None,
		});

		let (host_anim, animate_inner) = (host_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut h) = *host_anim.borrow_mut() {
				h.frame_handle = None;
				let surface = *h.state.surface();
				let commands = h.state.frame();
				if surface.is_measured() {
					render::paint(&h.ctx, commands, &surface, &h.theme);
				}
				let directive = h.state.handle(FieldEvent::FrameCompleted);
				h.apply(directive, &animate_inner);
			}
		}));

		let mut installed = Listeners {
			window: window.clone(),
			observer: None,
			on_resize: None,
			on_pointer_move: None,
			on_pointer_leave: None,
			on_motion: None,
		};

		let host_resize = host_init.clone();
		let on_resize = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
			if let Some(ref mut h) = *host_resize.borrow_mut() {
				h.measure();
			}
		});
		match ResizeObserver::new(on_resize.as_ref().unchecked_ref()) {
			Ok(observer) => {
				observer.observe(&container);
				installed.observer = Some(observer);
			}
			Err(_) => warn!("particle-backdrop: ResizeObserver unavailable, size is fixed"),
		}
		installed.on_resize = Some(on_resize);

		if interactive {
			let (host_move, animate_move) = (host_init.clone(), animate_init.clone());
			let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
				let position = host_move.borrow().as_ref().map(|h| h.pointer_position(&ev));
				if let Some((x, y)) = position {
					dispatch(&host_move, &animate_move, FieldEvent::PointerMove { x, y });
				}
			});
			let _ = window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
			installed.on_pointer_move = Some(on_move);

			if let Some(root) = window.document().and_then(|d| d.document_element()) {
				let (host_leave, animate_leave) = (host_init.clone(), animate_init.clone());
				let on_leave = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
					dispatch(&host_leave, &animate_leave, FieldEvent::PointerLeave);
				});
				let _ = root.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
				installed.on_pointer_leave = Some((root, on_leave));
			}
		}

		if let Some(query) = motion_query {
			let (host_motion, animate_motion) = (host_init.clone(), animate_init.clone());
			let on_motion = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
				dispatch(
					&host_motion,
					&animate_motion,
					FieldEvent::ReducedMotionChanged(ev.matches()),
				);
			});
			let _ = query.add_event_listener_with_callback("change", on_motion.as_ref().unchecked_ref());
			installed.on_motion = Some((query, on_motion));
		}

		*listeners_init.borrow_mut() = Some(installed);

		if let Some(ref mut h) = *host_init.borrow_mut() {
			h.measure();
			h.apply(directive, &animate_init);
		}
	});

	let teardown = StoredValue::new_local((host, animate, listeners));
	on_cleanup(move || {
		teardown.try_with_value(|(host, animate, listeners)| unmount(host, animate, listeners));
	});

	view! {
		<div class=container_class style=container_style aria-hidden="true">
			<canvas node_ref=canvas_ref class="particle-backdrop-canvas" style=canvas_style />
		</div>
	}
}
