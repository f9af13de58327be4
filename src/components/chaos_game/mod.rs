//! Chaos game visualizer: geometry, interaction, walker and the canvas component.

mod component;
pub mod controls;
pub mod hit;
pub mod render;
pub mod state;
pub mod types;
pub mod walker;

pub use component::ChaosGameCanvas;
pub use controls::{ControlError, StartParams};
pub use hit::hit_test;
pub use render::Renderer;
pub use state::{ChaosSession, Interaction, Schedule, SessionEvent};
pub use types::{Triangle, Vertex, Viewport};
pub use walker::Walker;
