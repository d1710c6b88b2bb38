//! [`Surface`] implementation over an HTML canvas 2D context.

use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::engine::Surface;
use crate::theme::Color;

/// Why the background could not get something to draw on.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// Not running in a browser window.
	#[error("no global window")]
	NoWindow,
	/// `innerWidth`/`innerHeight` could not be read as numbers.
	#[error("viewport size unavailable")]
	NoViewport,
	/// The canvas refused a 2D context.
	#[error("canvas has no 2d context")]
	NoContext,
	/// The context object was of an unexpected type.
	#[error("2d context is not a CanvasRenderingContext2d")]
	NotCanvas2d,
}

/// Current `innerWidth` x `innerHeight` of the window.
pub fn viewport_size(window: &Window) -> Result<(f64, f64), SurfaceError> {
	let width = window.inner_width().ok().and_then(|v| v.as_f64());
	let height = window.inner_height().ok().and_then(|v| v.as_f64());
	match (width, height) {
		(Some(w), Some(h)) => Ok((w, h)),
		_ => Err(SurfaceError::NoViewport),
	}
}

/// A canvas element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wrap `canvas`, acquiring its 2D context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.ok_or(SurfaceError::NoContext)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SurfaceError::NotCanvas2d)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn set_color(&mut self, color: Color) {
		let css = color.to_css();
		self.ctx.set_fill_style_str(&css);
		self.ctx.set_stroke_style_str(&css);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64) {
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.save();
		self.ctx.set_global_alpha(alpha);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
		self.ctx.restore();
	}

	fn reset_alpha(&mut self) {
		self.ctx.set_global_alpha(1.0);
	}
}
