//! The weighted random walk.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::controls::StartParams;
use super::render::Renderer;
use super::types::{Triangle, Viewport};

/// The chaos-game point process.
///
/// Each sub-step samples one of the three vertices uniformly and moves the
/// current position `weight` of the way towards it.
pub struct Walker {
	rng: SmallRng,
	position: (f64, f64),
	running: bool,
	batch_size: u32,
	point_radius: f64,
}

impl Walker {
	/// A stopped walker drawing from a deterministic random stream.
	pub fn seeded(seed: u64) -> Self {
		let StartParams { iterations, radius } = StartParams::default();
		Self {
			rng: SmallRng::seed_from_u64(seed),
			position: (0.0, 0.0),
			running: false,
			batch_size: iterations,
			point_radius: radius,
		}
	}

	/// Current position in normalized coordinates.
	pub fn position(&self) -> (f64, f64) {
		self.position
	}

	/// Whether another tick should follow the current one.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Sub-steps per tick.
	pub fn batch_size(&self) -> u32 {
		self.batch_size
	}

	/// Dot radius in pixels.
	pub fn point_radius(&self) -> f64 {
		self.point_radius
	}

	/// Reseeds the position uniformly in the unit square and marks the walker running.
	pub fn start(&mut self, params: StartParams) {
		self.batch_size = params.iterations;
		self.point_radius = params.radius;
		self.position = (self.rng.random(), self.rng.random());
		self.running = true;
	}

	/// Prevents the next tick. A batch already executing still completes.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// One sub-step. Returns the index of the sampled vertex.
	pub fn step(&mut self, triangle: &Triangle) -> usize {
		let index = self.rng.random_range(0..3);
		let vertex = &triangle.vertices()[index];
		let (x, y) = self.position;
		self.position = (x + (vertex.x - x) * vertex.weight, y + (vertex.y - y) * vertex.weight);
		index
	}

	/// Runs a full batch, painting every new position in generation order.
	pub fn tick(&mut self, triangle: &Triangle, viewport: Viewport, renderer: &mut impl Renderer) {
		for _ in 0..self.batch_size {
			self.step(triangle);
			let (px, py) = viewport.to_pixels(self.position.0, self.position.1);
			renderer.paint_point(px, py, self.point_radius);
		}
	}
}
