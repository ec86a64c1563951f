//! Rendering pipeline components
//!
//! Three pipelines draw a frame, in order: the backdrop gradient, the
//! scene's shapes, then the overlay sprites.

pub mod types;
pub mod backdrop_pipeline;
pub mod shape_pipeline;
pub mod sprite_pipeline;

// Re-export types
pub use types::{BackdropUniforms, ShapeVertex, SpriteRect, SpriteVertex, ViewUniforms};

// Re-export pipelines
pub use backdrop_pipeline::{farthest_corner_radius, BackdropPipeline, RadialGradient};
pub use shape_pipeline::ShapePipeline;
pub use sprite_pipeline::{Sprite, SpriteImage, SpritePipeline};
