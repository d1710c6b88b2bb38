//! Test double for [`Surface`].

use crate::theme::Color;

use super::render::Surface;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawOp {
	Resize { width: f64, height: f64 },
	Clear,
	Color(Color),
	Circle { x: f64, y: f64, radius: f64 },
	Line { from: (f64, f64), to: (f64, f64), alpha: f64 },
	ResetAlpha,
}

/// Records every draw call instead of rasterizing.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
	width: f64,
	height: f64,
	ops: Vec<DrawOp>,
}

impl RecordingSurface {
	pub(crate) fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			ops: Vec::new(),
		}
	}

	pub(crate) fn ops(&self) -> &[DrawOp] {
		&self.ops
	}

	pub(crate) fn take_ops(&mut self) -> Vec<DrawOp> {
		std::mem::take(&mut self.ops)
	}
}

impl Surface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.ops.push(DrawOp::Resize { width, height });
	}

	fn clear(&mut self) {
		self.ops.push(DrawOp::Clear);
	}

	fn set_color(&mut self, color: Color) {
		self.ops.push(DrawOp::Color(color));
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.ops.push(DrawOp::Circle { x, y, radius });
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64) {
		self.ops.push(DrawOp::Line { from, to, alpha });
	}

	fn reset_alpha(&mut self) {
		self.ops.push(DrawOp::ResetAlpha);
	}
}
