//! The session: pointer selection, geometry edits and walker scheduling in one place.

use log::{debug, info};

use super::controls::StartParams;
use super::hit::hit_test;
use super::render::Renderer;
use super::types::{Triangle, Viewport};
use super::walker::Walker;

/// Weight change per wheel notch, in percentage points.
pub const WEIGHT_STEP_PERCENT: i32 = 2;

/// Pointer selection over the triangle's vertices, by index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
	/// No vertex under the pointer.
	#[default]
	Idle,
	/// Pointer rests on a vertex; its info overlay is shown.
	Hovering(usize),
	/// Vertex follows the pointer until release.
	Dragging(usize),
}

impl Interaction {
	/// The vertex under inspection. A dragged vertex counts as hovered.
	pub fn hovered(self) -> Option<usize> {
		match self {
			Self::Idle => None,
			Self::Hovering(index) | Self::Dragging(index) => Some(index),
		}
	}

	/// The vertex being dragged, if any.
	pub fn dragged(self) -> Option<usize> {
		match self {
			Self::Dragging(index) => Some(index),
			_ => None,
		}
	}
}

/// Input delivered by the host, already translated from browser events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
	/// Pointer position in canvas pixels.
	PointerMove {
		/// Horizontal pixel offset.
		x: f64,
		/// Vertical pixel offset.
		y: f64,
	},
	/// Primary button pressed.
	PointerDown,
	/// Primary button released.
	PointerUp,
	/// Wheel movement.
	Scroll {
		/// Positive values scroll down.
		delta_y: f64,
	},
	/// Begin a fresh walk.
	Start(StartParams),
	/// Halt the walk after the current batch.
	Stop,
	/// Halt the walk and restore the default triangle.
	Reset,
	/// The surface changed size.
	Resize {
		/// New width in pixels.
		width: f64,
		/// New height in pixels.
		height: f64,
	},
}

/// What the host must do with its frame scheduler after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Schedule {
	/// Nothing to schedule.
	Idle,
	/// Call [`ChaosSession::advance`] before the next repaint.
	NextFrame,
}

/// Everything the visualizer mutates: geometry, pointer selection and the walker.
pub struct ChaosSession {
	triangle: Triangle,
	interaction: Interaction,
	walker: Walker,
	viewport: Viewport,
	tick_pending: bool,
}

impl ChaosSession {
	/// Default triangle, idle pointer and a stopped walker seeded with `seed`.
	pub fn new(viewport: Viewport, seed: u64) -> Self {
		Self {
			triangle: Triangle::default(),
			interaction: Interaction::Idle,
			walker: Walker::seeded(seed),
			viewport,
			tick_pending: false,
		}
	}

	/// Current geometry.
	pub fn triangle(&self) -> &Triangle {
		&self.triangle
	}

	/// Current pointer selection.
	pub fn interaction(&self) -> Interaction {
		self.interaction
	}

	/// The point process.
	pub fn walker(&self) -> &Walker {
		&self.walker
	}

	/// Surface size used for every pixel conversion.
	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// Whether the host currently owes an [`advance`](Self::advance) call.
	pub fn tick_pending(&self) -> bool {
		self.tick_pending
	}

	/// Paints the triangle outline on a fresh surface.
	pub fn redraw(&self, renderer: &mut impl Renderer) {
		renderer.clear_and_redraw_triangle(&self.triangle, self.viewport);
	}

	/// Applies one input event, drawing whatever it invalidates.
	pub fn handle(&mut self, event: SessionEvent, renderer: &mut impl Renderer) -> Schedule {
		match event {
			SessionEvent::PointerMove { x, y } => self.pointer_move(x, y, renderer),
			SessionEvent::PointerDown => {
				if let Interaction::Hovering(index) = self.interaction {
					debug!("drag start on vertex {index}");
					self.interaction = Interaction::Dragging(index);
				}
			}
			SessionEvent::PointerUp => {
				if let Interaction::Dragging(index) = self.interaction {
					debug!("drag end on vertex {index}");
					self.interaction = Interaction::Idle;
				}
			}
			SessionEvent::Scroll { delta_y } => {
				if let Some(index) = self.interaction.hovered() {
					self.triangle
						.set_weight(index, -WEIGHT_STEP_PERCENT * scroll_direction(delta_y));
					self.redraw_with_info(index, renderer);
				}
			}
			SessionEvent::Start(params) => {
				info!(
					"walk started: {} iterations per frame, radius {}",
					params.iterations, params.radius
				);
				self.redraw(renderer);
				self.walker.start(params);
				return self.request_tick();
			}
			SessionEvent::Stop => {
				info!("walk stopped");
				self.walker.stop();
			}
			SessionEvent::Reset => {
				info!("triangle reset");
				self.walker.stop();
				self.triangle.reset_to_default();
				self.interaction = Interaction::Idle;
				self.redraw(renderer);
			}
			SessionEvent::Resize { width, height } => {
				self.viewport = Viewport::new(width, height);
				self.redraw(renderer);
			}
		}
		Schedule::Idle
	}

	/// Runs one scheduled tick. Called by the host once per frame it was asked for.
	pub fn advance(&mut self, renderer: &mut impl Renderer) -> Schedule {
		self.tick_pending = false;
		if !self.walker.is_running() {
			return Schedule::Idle;
		}
		self.walker.tick(&self.triangle, self.viewport, renderer);
		if self.walker.is_running() {
			self.request_tick()
		} else {
			Schedule::Idle
		}
	}

	fn request_tick(&mut self) -> Schedule {
		if self.tick_pending {
			return Schedule::Idle;
		}
		self.tick_pending = true;
		Schedule::NextFrame
	}

	fn pointer_move(&mut self, x: f64, y: f64, renderer: &mut impl Renderer) {
		if let Interaction::Dragging(index) = self.interaction {
			let (nx, ny) = self.viewport.to_normalized(x, y);
			self.triangle.set_position(index, nx, ny);
			self.redraw_with_info(index, renderer);
			return;
		}

		match (self.interaction.hovered(), hit_test(&self.triangle, x, y, self.viewport)) {
			(Some(current), Some(hit)) if current == hit => {}
			(previous, Some(hit)) => {
				debug!("hover vertex {hit}");
				if previous.is_some() {
					self.redraw(renderer);
				}
				self.interaction = Interaction::Hovering(hit);
				self.draw_info(hit, renderer);
			}
			(Some(previous), None) => {
				debug!("hover left vertex {previous}");
				self.interaction = Interaction::Idle;
				self.redraw(renderer);
			}
			(None, None) => {}
		}
	}

	fn redraw_with_info(&mut self, index: usize, renderer: &mut impl Renderer) {
		self.redraw(renderer);
		self.draw_info(index, renderer);
	}

	// The overlay and the walker's dots share one surface, so inspecting a vertex halts the walk.
	fn draw_info(&mut self, index: usize, renderer: &mut impl Renderer) {
		self.walker.stop();
		if let Some(vertex) = self.triangle.vertex(index) {
			renderer.draw_vertex_info(vertex, &self.triangle, self.viewport);
		}
	}
}

/// Sign of a wheel delta, with zero for no movement.
fn scroll_direction(delta_y: f64) -> i32 {
	if delta_y > 0.0 {
		1
	} else if delta_y < 0.0 {
		-1
	} else {
		0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::chaos_game::types::Vertex;

	#[derive(Debug, PartialEq)]
	enum Call {
		Triangle,
		Info(usize),
		Point,
	}

	#[derive(Default)]
	struct Recorder(Vec<Call>);

	impl Renderer for Recorder {
		fn clear_and_redraw_triangle(&mut self, _: &Triangle, _: Viewport) {
			self.0.push(Call::Triangle);
		}
		fn draw_vertex_info(&mut self, vertex: &Vertex, triangle: &Triangle, _: Viewport) {
			let index = triangle.vertices().iter().position(|v| v == vertex);
			self.0.push(Call::Info(index.unwrap_or(usize::MAX)));
		}
		fn paint_point(&mut self, _: f64, _: f64, _: f64) {
			self.0.push(Call::Point);
		}
	}

	fn session() -> ChaosSession {
		ChaosSession::new(Viewport::new(1000.0, 1000.0), 1)
	}

	fn start(iterations: u32) -> SessionEvent {
		SessionEvent::Start(StartParams {
			iterations,
			radius: 1.0,
		})
	}

	#[test]
	fn hover_enters_and_leaves() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 502.0, y: 198.0 }, &mut r);
		assert_eq!(s.interaction(), Interaction::Hovering(0));
		assert_eq!(r.0, vec![Call::Info(0)]);

		let _ = s.handle(SessionEvent::PointerMove { x: 503.0, y: 199.0 }, &mut r);
		assert_eq!(r.0.len(), 1, "staying on the same vertex does not redraw");

		let _ = s.handle(SessionEvent::PointerMove { x: 600.0, y: 600.0 }, &mut r);
		assert_eq!(s.interaction(), Interaction::Idle);
		assert_eq!(r.0, vec![Call::Info(0), Call::Triangle]);

		let _ = s.handle(SessionEvent::PointerMove { x: 10.0, y: 10.0 }, &mut r);
		assert_eq!(r.0.len(), 2);
	}

	#[test]
	fn hover_switches_between_vertices() {
		let mut s = ChaosSession::new(Viewport::new(100.0, 100.0), 1);
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 50.0, y: 20.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerMove { x: 30.0, y: 80.0 }, &mut r);
		assert_eq!(s.interaction(), Interaction::Hovering(1));
		assert_eq!(r.0, vec![Call::Info(0), Call::Triangle, Call::Info(1)]);
	}

	#[test]
	fn pointer_down_only_grabs_hovered_vertex() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		assert_eq!(s.interaction(), Interaction::Idle);

		let _ = s.handle(SessionEvent::PointerMove { x: 700.0, y: 800.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		assert_eq!(s.interaction(), Interaction::Dragging(2));
		assert_eq!(s.interaction().hovered(), Some(2));
		assert_eq!(s.interaction().dragged(), Some(2));
	}

	#[test]
	fn drag_moves_vertex_without_clamping() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 300.0, y: 800.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		r.0.clear();

		for (x, y) in [(310.0, 790.0), (-50.0, 1200.0), (100.0, 200.0)] {
			let _ = s.handle(SessionEvent::PointerMove { x, y }, &mut r);
			let v = s.triangle().vertices()[1];
			assert_eq!((v.x, v.y, v.weight), (x / 1000.0, y / 1000.0, 0.5));
		}
		assert_eq!(s.interaction(), Interaction::Dragging(1));
		assert_eq!(r.0.iter().filter(|c| **c == Call::Info(1)).count(), 3);
		assert_eq!(r.0.iter().filter(|c| **c == Call::Triangle).count(), 3);
	}

	#[test]
	fn pointer_up_ends_drag_in_idle() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 500.0, y: 200.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		let _ = s.handle(SessionEvent::PointerUp, &mut r);
		assert_eq!(s.interaction(), Interaction::Idle);

		let _ = s.handle(SessionEvent::PointerMove { x: 500.0, y: 200.0 }, &mut r);
		assert_eq!(s.interaction(), Interaction::Hovering(0));
		let _ = s.handle(SessionEvent::PointerUp, &mut r);
		assert_eq!(s.interaction(), Interaction::Hovering(0));
	}

	#[test]
	fn scroll_adjusts_hovered_weight() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::Scroll { delta_y: -100.0 }, &mut r);
		assert_eq!(s.triangle(), &Triangle::default());
		assert!(r.0.is_empty());

		let _ = s.handle(SessionEvent::PointerMove { x: 500.0, y: 200.0 }, &mut r);
		let _ = s.handle(SessionEvent::Scroll { delta_y: -3.0 }, &mut r);
		assert_eq!(s.triangle().vertices()[0].weight, 0.52);
		let _ = s.handle(SessionEvent::Scroll { delta_y: 100.0 }, &mut r);
		let _ = s.handle(SessionEvent::Scroll { delta_y: 100.0 }, &mut r);
		assert_eq!(s.triangle().vertices()[0].weight, 0.48);
		r.0.clear();
		let _ = s.handle(SessionEvent::Scroll { delta_y: 0.0 }, &mut r);
		assert_eq!(s.triangle().vertices()[0].weight, 0.48);
		assert_eq!(r.0, vec![Call::Triangle, Call::Info(0)]);
	}

	#[test]
	fn scroll_while_dragging_adjusts_dragged_weight() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 700.0, y: 800.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		let _ = s.handle(SessionEvent::Scroll { delta_y: -1.0 }, &mut r);
		assert_eq!(s.triangle().vertices()[2].weight, 0.52);
	}

	#[test]
	fn start_schedules_single_frame_chain() {
		let mut s = session();
		let mut r = Recorder::default();
		assert_eq!(s.handle(start(4), &mut r), Schedule::NextFrame);
		assert_eq!(r.0, vec![Call::Triangle]);
		assert!(s.tick_pending());
		assert_eq!(s.handle(start(4), &mut r), Schedule::Idle);

		assert_eq!(s.advance(&mut r), Schedule::NextFrame);
		assert_eq!(r.0.iter().filter(|c| **c == Call::Point).count(), 4);
		assert_eq!(s.advance(&mut r), Schedule::NextFrame);
		assert_eq!(r.0.iter().filter(|c| **c == Call::Point).count(), 8);
	}

	#[test]
	fn stop_lets_pending_frame_finish_without_rescheduling() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(start(3), &mut r);
		let _ = s.handle(SessionEvent::Stop, &mut r);
		assert!(!s.walker().is_running());
		r.0.clear();
		assert_eq!(s.advance(&mut r), Schedule::Idle);
		assert!(r.0.is_empty());
		assert!(!s.tick_pending());
	}

	#[test]
	fn hovering_halts_the_walk() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(start(2), &mut r);
		assert!(s.walker().is_running());
		let _ = s.handle(SessionEvent::PointerMove { x: 500.0, y: 200.0 }, &mut r);
		assert!(!s.walker().is_running());
		assert_eq!(s.advance(&mut r), Schedule::Idle);
	}

	#[test]
	fn resize_updates_viewport_and_redraws() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(
			SessionEvent::Resize {
				width: 200.0,
				height: 100.0,
			},
			&mut r,
		);
		assert_eq!(s.viewport(), Viewport::new(200.0, 100.0));
		assert_eq!(r.0, vec![Call::Triangle]);
		let _ = s.handle(SessionEvent::PointerMove { x: 100.0, y: 20.0 }, &mut r);
		assert_eq!(s.interaction(), Interaction::Hovering(0));
	}

	#[test]
	fn reset_restores_defaults_and_clears_selection() {
		let mut s = session();
		let mut r = Recorder::default();
		let _ = s.handle(SessionEvent::PointerMove { x: 500.0, y: 200.0 }, &mut r);
		let _ = s.handle(SessionEvent::PointerDown, &mut r);
		let _ = s.handle(SessionEvent::PointerMove { x: 10.0, y: 10.0 }, &mut r);
		let _ = s.handle(SessionEvent::Scroll { delta_y: 1.0 }, &mut r);
		let _ = s.handle(start(5), &mut r);

		let _ = s.handle(SessionEvent::Reset, &mut r);
		assert_eq!(s.triangle(), &Triangle::default());
		assert_eq!(s.interaction(), Interaction::Idle);
		assert!(!s.walker().is_running());
		assert_eq!(r.0.last(), Some(&Call::Triangle));
	}

	#[test]
	fn scroll_direction_treats_zero_as_no_change() {
		assert_eq!(scroll_direction(53.0), 1);
		assert_eq!(scroll_direction(-0.5), -1);
		assert_eq!(scroll_direction(0.0), 0);
		assert_eq!(scroll_direction(-0.0), 0);
		assert_eq!(scroll_direction(f64::NAN), 0);
	}
}
