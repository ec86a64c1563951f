//! 2D Rendering Library
//!
//! This crate provides the wgpu-based rendering for the snow scene.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::BackdropPipeline`] - Radial sky gradient behind everything
//! - [`pipeline::ShapePipeline`] - Flat-coloured triangles (stars, snow, debug lines)
//! - [`pipeline::SpritePipeline`] - Textured overlay images
//! - [`renderable::SceneGeometry`] - Tessellates a [`Scene`] into shape vertices
//!
//! All pipelines work in canvas units: origin top-left, y down, one unit per
//! CSS-style pixel of the logical canvas.

pub mod context;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use snowglobe_core::{FillStyle, Rgba, Scene, Vec2};

pub use renderable::{RenderOptions, SceneGeometry};
