//! Pointer picking.

use super::types::{Triangle, Viewport};

/// Pointer pick radius around a vertex, in pixels.
pub const HIT_RADIUS: f64 = 10.0;

/// Index of the first vertex strictly within [`HIT_RADIUS`] pixels of the pointer.
pub fn hit_test(triangle: &Triangle, px: f64, py: f64, viewport: Viewport) -> Option<usize> {
	triangle.vertices().iter().position(|vertex| {
		let (vx, vy) = viewport.to_pixels(vertex.x, vertex.y);
		let (dx, dy) = (vx - px, vy - py);
		dx * dx + dy * dy < HIT_RADIUS * HIT_RADIUS
	})
}
