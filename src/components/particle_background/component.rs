//! Leptos component wrapping the particle background canvas.
//!
//! The component creates a viewport-sized canvas and binds an
//! [`AnimationDriver`] to it: frames come from `requestAnimationFrame`,
//! resizes from the window `resize` event. Unmounting cancels the pending
//! frame and removes the listener in one step.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::canvas::{CanvasSurface, SurfaceError, viewport_size};
use crate::config::ParticleConfig;
use crate::engine::{AnimationDriver, tick_shared};
use crate::theme::ThemeMode;

type Driver = AnimationDriver<CanvasSurface, SmallRng>;
/// The JS function registered with `requestAnimationFrame`.
type FrameSlot = Rc<RefCell<Option<js_sys::Function>>>;

/// Everything a running background holds on to in the browser.
///
/// The frame callback itself is owned by JS and only holds weak handles to
/// these fields, so it stays callable (and inert) after teardown.
struct FrameLoop {
	window: Window,
	driver: Rc<RefCell<Driver>>,
	frame: FrameSlot,
	pending: Rc<Cell<Option<i32>>>,
	on_resize: Option<Closure<dyn FnMut()>>,
}

impl FrameLoop {
	/// Cancel the outstanding frame, detach the resize listener and stop the
	/// driver. Safe to call more than once.
	fn teardown(&mut self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.on_resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		self.frame.borrow_mut().take();
		self.driver.borrow_mut().stop();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.teardown();
	}
}

/// Seed for the particle RNG, from the browser's `Math.random`.
fn browser_seed() -> u64 {
	let half = || (js_sys::Math::random() * u32::MAX as f64) as u64;
	(half() << 32) | half()
}

/// Hide the canvas, then reveal it on the next frame so the CSS transition
/// plays once. If no frame can be requested the canvas is shown right away.
fn fade_in(window: &Window, canvas: &HtmlCanvasElement) {
	// Explicit path: the leptos prelude brings in an unrelated `style` method.
	let style = web_sys::HtmlElement::style(canvas);
	let _ = style.set_property("opacity", "0");
	let reveal_style = style.clone();
	let reveal = Closure::once_into_js(move || {
		let _ = reveal_style.set_property("opacity", "1");
	});
	if window.request_animation_frame(reveal.unchecked_ref()).is_err() {
		warn!("particle background: fade-in frame unavailable, showing canvas directly");
		let _ = style.set_property("opacity", "1");
	}
}

fn request_frame(frame: &FrameSlot, pending: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *frame.borrow() {
		match window.request_animation_frame(cb) {
			Ok(id) => pending.set(Some(id)),
			Err(_) => warn!("particle background: requestAnimationFrame failed"),
		}
	}
}

fn start(
	canvas: HtmlCanvasElement,
	config: ParticleConfig,
	theme: Option<ReadSignal<ThemeMode>>,
) -> Result<FrameLoop, SurfaceError> {
	let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
	let (width, height) = viewport_size(&window)?;
	let surface = CanvasSurface::new(canvas.clone())?;

	let mut driver = AnimationDriver::new(surface, config, SmallRng::seed_from_u64(browser_seed()));
	if driver.mount(width, height) {
		fade_in(&window, &canvas);
	}
	info!(
		"particle background: mounted {}x{} with {} particles",
		width,
		height,
		driver.particles().len()
	);

	let driver = Rc::new(RefCell::new(driver));
	let frame: FrameSlot = Rc::new(RefCell::new(None));
	let pending = Rc::new(Cell::new(None));

	let (driver_frame, frame_inner, pending_frame) = (
		Rc::downgrade(&driver),
		Rc::downgrade(&frame),
		Rc::downgrade(&pending),
	);
	let on_frame: Closure<dyn FnMut()> = Closure::new(move || {
		if let Some(pending) = pending_frame.upgrade() {
			pending.set(None);
		}
		let mode = theme.and_then(|t| t.try_get_untracked()).unwrap_or_default();
		if !tick_shared(&driver_frame, mode) {
			return;
		}
		if let (Some(frame), Some(pending)) = (frame_inner.upgrade(), pending_frame.upgrade()) {
			request_frame(&frame, &pending);
		}
	});
	*frame.borrow_mut() = Some(on_frame.into_js_value().unchecked_into());

	let driver_resize = Rc::downgrade(&driver);
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let (Some(win), Some(driver)) = (web_sys::window(), driver_resize.upgrade()) else {
			return;
		};
		match viewport_size(&win) {
			Ok((w, h)) => {
				driver.borrow_mut().resize(w, h);
			}
			Err(e) => warn!("particle background: resize ignored: {e}"),
		}
	});
	if window
		.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
		.is_err()
	{
		warn!("particle background: could not listen for resize");
	}

	request_frame(&frame, &pending);

	Ok(FrameLoop {
		window,
		driver,
		frame,
		pending,
		on_resize: Some(on_resize),
	})
}

/// Full-viewport animated particle background.
///
/// Takes no props. Reads the theme from a `ReadSignal<ThemeMode>` in context
/// (dark if none is provided) and its tuning from a [`ParticleConfig`] in
/// context (defaults if none). If the canvas cannot be drawn on, the
/// component logs a warning and stays blank.
#[component]
pub fn ParticleBackground() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let theme = use_context::<ReadSignal<ThemeMode>>();
	let config = use_context::<ParticleConfig>().unwrap_or_default();
	let frame_loop = StoredValue::new_local(None::<FrameLoop>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if frame_loop.with_value(Option::is_some) {
			return;
		}
		match start(canvas, config.clone(), theme) {
			Ok(running) => frame_loop.set_value(Some(running)),
			Err(e) => warn!("particle background disabled: {e}"),
		}
	});

	on_cleanup(move || {
		if let Some(mut running) = frame_loop.try_update_value(Option::take).flatten() {
			running.teardown();
			info!("particle background: torn down");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; transition: opacity 0.6s ease;"
		/>
	}
}
