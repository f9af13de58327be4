//! Geometry: weighted vertices, the triangle and the viewport.

/// Default triangle: apex at the top, base along the lower fifth, every weight at one half.
const DEFAULT_VERTICES: [Vertex; 3] = [
	Vertex::new(0.5, 0.2, 0.5),
	Vertex::new(0.3, 0.8, 0.5),
	Vertex::new(0.7, 0.8, 0.5),
];

/// A weighted triangle corner in normalized canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
	/// Horizontal position as a fraction of the viewport width.
	pub x: f64,
	/// Vertical position as a fraction of the viewport height.
	pub y: f64,
	/// Fraction of the remaining distance the walker covers when this vertex is sampled.
	pub weight: f64,
}

impl Vertex {
	/// Builds a vertex without any range checks.
	pub const fn new(x: f64, y: f64, weight: f64) -> Self {
		Self { x, y, weight }
	}

	/// Far end of the weight indicator line, which starts at `centroid`.
	///
	/// A weight of 1 reaches the vertex itself, a weight of 0 collapses onto the centroid.
	pub fn weight_indicator_end(&self, centroid: (f64, f64)) -> (f64, f64) {
		(
			self.x + (centroid.0 - self.x) * (1.0 - self.weight),
			self.y + (centroid.1 - self.y) * (1.0 - self.weight),
		)
	}
}

/// The three vertices driving the walk. Order only matters for the outline.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
	vertices: [Vertex; 3],
}

impl Default for Triangle {
	fn default() -> Self {
		Self {
			vertices: DEFAULT_VERTICES,
		}
	}
}

impl Triangle {
	/// Builds a triangle from explicit vertices.
	pub fn new(vertices: [Vertex; 3]) -> Self {
		Self { vertices }
	}

	/// All three vertices in outline order.
	pub fn vertices(&self) -> &[Vertex; 3] {
		&self.vertices
	}

	/// Vertex at `index`, if it exists.
	pub fn vertex(&self, index: usize) -> Option<&Vertex> {
		self.vertices.get(index)
	}

	/// Restores the default configuration in place.
	pub fn reset_to_default(&mut self) {
		self.vertices = DEFAULT_VERTICES;
	}

	/// Moves a vertex. Values outside [0, 1] are kept as given.
	pub fn set_position(&mut self, index: usize, nx: f64, ny: f64) {
		if let Some(vertex) = self.vertices.get_mut(index) {
			vertex.x = nx;
			vertex.y = ny;
		}
	}

	/// Adjusts a weight by whole percentage points, clamped to [0, 1].
	///
	/// The current weight is rounded to the nearest percent before the delta is applied,
	/// so repeated steps never accumulate floating-point drift.
	pub fn set_weight(&mut self, index: usize, delta_percent: i32) {
		if let Some(vertex) = self.vertices.get_mut(index) {
			let percent = ((vertex.weight * 100.0).round() as i32).saturating_add(delta_percent);
			vertex.weight = f64::from(percent.clamp(0, 100)) / 100.0;
		}
	}

	/// Mean of the three vertex positions.
	pub fn centroid(&self) -> (f64, f64) {
		let [a, b, c] = &self.vertices;
		((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
	}
}

/// Current drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl Viewport {
	/// Builds a viewport of the given pixel size.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Normalized coordinates to pixels.
	pub fn to_pixels(&self, nx: f64, ny: f64) -> (f64, f64) {
		(nx * self.width, ny * self.height)
	}

	/// Pixels to normalized coordinates.
	pub fn to_normalized(&self, px: f64, py: f64) -> (f64, f64) {
		(px / self.width, py / self.height)
	}
}
