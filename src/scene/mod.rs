//! Scene construction
//!
//! This module lays out the winter scene over a physics world.

mod scene_composer;

pub use scene_composer::{compose_scene, SceneAssets, SceneComposer};
