//! 2D Mathematics Library
//!
//! This crate provides the vector and polygon helpers shared by the
//! Snowglobe physics, scene and render crates.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components (canvas pixels, y down)
//! - [`VertexSet`] - Ordered polygon outline
//!
//! The free functions in [`vertices`] operate on vertex sets the same way
//! regardless of where the points came from (SVG export or bundled JSON).

mod vec2;
pub mod vertices;

pub use vec2::Vec2;
pub use vertices::VertexSet;
