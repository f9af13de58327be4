//! Drawing seam between the session and the canvas.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::types::{Triangle, Vertex, Viewport};

/// Radius of the highlight disc on an inspected vertex.
pub const NODE_RADIUS: f64 = 7.0;

const OUTLINE_COLOR: &str = "rgb(255, 0, 0)";
const NODE_COLOR: &str = "rgb(255, 0, 0)";
const WEIGHT_COLOR: &str = "rgb(0, 0, 255)";
const POINT_COLOR: &str = "rgb(255, 255, 255)";
const LABEL_FONT: &str = "16px monospace";
const LABEL_OFFSET: (f64, f64) = (-50.0, -20.0);

/// Drawing operations the session needs from its surface.
pub trait Renderer {
	/// Wipes the surface and strokes the triangle outline.
	fn clear_and_redraw_triangle(&mut self, triangle: &Triangle, viewport: Viewport);
	/// Draws the highlight disc, weight line and weight label for one vertex.
	fn draw_vertex_info(&mut self, vertex: &Vertex, triangle: &Triangle, viewport: Viewport);
	/// Fills one walker dot, in pixel coordinates.
	fn paint_point(&mut self, x: f64, y: f64, radius: f64);
}

/// Label drawn next to a hovered vertex.
pub fn weight_label(vertex: &Vertex) -> String {
	format!("Weight: {}", vertex.weight)
}

/// Last fill colour handed to the context.
#[derive(Debug, Default)]
struct FillCache(Option<&'static str>);

impl FillCache {
	/// Records `color`; true when the context still has to be told.
	fn swap(&mut self, color: &'static str) -> bool {
		if self.0 == Some(color) {
			return false;
		}
		self.0 = Some(color);
		true
	}

	fn invalidate(&mut self) {
		self.0 = None;
	}
}

/// [`Renderer`] backed by a 2D canvas context.
pub struct CanvasRenderer {
	ctx: CanvasRenderingContext2d,
	fill: FillCache,
}

impl CanvasRenderer {
	/// Wraps a 2D context.
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		Self {
			ctx,
			fill: FillCache::default(),
		}
	}

	fn set_fill(&mut self, color: &'static str) {
		if self.fill.swap(color) {
			self.ctx.set_fill_style_str(color);
		}
	}
}

impl Renderer for CanvasRenderer {
	fn clear_and_redraw_triangle(&mut self, triangle: &Triangle, viewport: Viewport) {
		// Resizing the canvas resets every context style.
		self.fill.invalidate();
		let ctx = &self.ctx;
		ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

		let vertices = triangle.vertices();
		ctx.set_stroke_style_str(OUTLINE_COLOR);
		ctx.begin_path();
		let (x0, y0) = viewport.to_pixels(vertices[0].x, vertices[0].y);
		ctx.move_to(x0, y0);
		for vertex in vertices.iter().cycle().skip(1).take(3) {
			let (x, y) = viewport.to_pixels(vertex.x, vertex.y);
			ctx.line_to(x, y);
		}
		ctx.stroke();
	}

	fn draw_vertex_info(&mut self, vertex: &Vertex, triangle: &Triangle, viewport: Viewport) {
		let (x, y) = viewport.to_pixels(vertex.x, vertex.y);

		self.set_fill(NODE_COLOR);
		let ctx = &self.ctx;
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();

		let centroid = triangle.centroid();
		let (cx, cy) = viewport.to_pixels(centroid.0, centroid.1);
		let (ex, ey) = vertex.weight_indicator_end(centroid);
		let (ex, ey) = viewport.to_pixels(ex, ey);
		ctx.set_stroke_style_str(WEIGHT_COLOR);
		ctx.begin_path();
		ctx.move_to(cx, cy);
		ctx.line_to(ex, ey);
		ctx.stroke();

		self.set_fill(WEIGHT_COLOR);
		let ctx = &self.ctx;
		ctx.set_font(LABEL_FONT);
		let _ = ctx.fill_text(
			&weight_label(vertex),
			x + LABEL_OFFSET.0,
			y + LABEL_OFFSET.1,
		);
	}

	fn paint_point(&mut self, x: f64, y: f64, radius: f64) {
		self.set_fill(POINT_COLOR);
		let ctx = &self.ctx;
		ctx.begin_path();
		// Canvas rejects negative radii; the dot is simply skipped.
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.fill();
	}
}
