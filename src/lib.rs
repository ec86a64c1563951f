//! Snowglobe - a winter scene over a 2D physics world
//!
//! The library half of the application: configuration, scene composition,
//! the window/simulation/render systems and the SVG exporter. The binaries
//! in `src/main.rs` and `src/bin/svg_export.rs` wire these together.

pub mod config;
pub mod export;
pub mod input;
pub mod scene;
pub mod systems;
