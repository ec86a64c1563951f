//! Input handling for Snowglobe
//!
//! This crate turns desktop input into what the scene understands:
//! pointer presses in canvas coordinates, and device-motion events
//! synthesized from arrow keys and window movement.

mod motion_controller;
mod pointer;

pub use motion_controller::MotionController;
pub use pointer::{PointerEvent, PointerTracker};
