//! Core types for Snowglobe
//!
//! This crate sits between the physics world and the application:
//!
//! - [`Scene`] - Physics world plus per-body fill styles and categories
//! - [`FillStyle`] - How a body is painted
//! - [`Hsl`] and the category tables in [`palette`]
//! - [`DeviceMotion`] - Acceleration events that push the snow around
//! - Vertex-set JSON assets and SVG path sampling

mod asset_error;
mod motion;
pub mod palette;
mod scene;
pub mod svg;
pub mod vertex_asset;

pub use asset_error::AssetError;
pub use motion::{DeviceMotion, MotionSample};
pub use palette::{Hsl, Rgba};
pub use scene::{FillStyle, Scene};
pub use svg::{sample_path, vertex_sets_from_svg, SvgError, DEFAULT_SAMPLE_LENGTH};
pub use vertex_asset::{load_vertex_sets, parse_vertex_sets, save_vertex_sets, to_json};

// Re-export commonly used types from the lower crates for convenience
pub use snowglobe_math::{Vec2, VertexSet};
pub use snowglobe_physics::{BodyKey, Category, PhysicsConfig, PhysicsWorld, RigidBody2D};
