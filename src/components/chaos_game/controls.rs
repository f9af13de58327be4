//! Parsing of the raw overlay inputs into walker start parameters.

use thiserror::Error;

/// Iterations per frame used when the overlay has not been edited.
pub const DEFAULT_ITERATIONS: u32 = 100;
/// Dot radius in pixels used when the overlay has not been edited.
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Errors produced while reading the control inputs.
#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
	/// The iteration count is not a whole number.
	#[error("invalid iteration count: {input:?}")]
	InvalidIterations {
		/// The rejected text.
		input: String,
	},

	/// The walker needs at least one sub-step per frame.
	#[error("iteration count must be at least 1")]
	ZeroIterations,

	/// The radius is not a finite number.
	#[error("invalid point radius: {input:?}")]
	InvalidRadius {
		/// The rejected text.
		input: String,
	},
}

/// Sanitized arguments for starting a walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartParams {
	/// Sub-steps per scheduling tick, at least 1.
	pub iterations: u32,
	/// Radius of each painted dot in pixels. Zero or negative radii draw nothing visible.
	pub radius: f64,
}

impl Default for StartParams {
	fn default() -> Self {
		Self {
			iterations: DEFAULT_ITERATIONS,
			radius: DEFAULT_RADIUS,
		}
	}
}

impl StartParams {
	/// Reads the text of the iteration and radius inputs.
	pub fn parse(iterations: &str, radius: &str) -> Result<Self, ControlError> {
		let iterations = iterations.trim();
		let iterations: u32 = iterations
			.parse()
			.map_err(|_| ControlError::InvalidIterations {
				input: iterations.to_string(),
			})?;
		if iterations == 0 {
			return Err(ControlError::ZeroIterations);
		}

		let radius_text = radius.trim();
		let radius: f64 = radius_text
			.parse()
			.ok()
			.filter(|r: &f64| r.is_finite())
			.ok_or_else(|| ControlError::InvalidRadius {
				input: radius_text.to_string(),
			})?;

		Ok(Self { iterations, radius })
	}
}
