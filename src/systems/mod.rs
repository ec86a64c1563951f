//! Application systems
//!
//! The window, fixed-step simulation and GPU render systems that main.rs drives.

mod render;
mod simulation;
mod window;

pub use render::{load_rgba, RenderError, RenderSystem};
pub use simulation::{MotionForce, SimulationResult, SimulationSystem};
pub use window::{is_portrait, WindowError, WindowSystem};
