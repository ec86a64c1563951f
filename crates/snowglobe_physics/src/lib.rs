//! 2D Physics simulation for Snowglobe
//!
//! This crate provides physics simulation for 2D rigid bodies, including:
//! - Collision shapes (circles, rectangles, concave polygon sets)
//! - Category/mask collision filtering
//! - Rigid body dynamics with gravity and air drag
//! - A pointer constraint for dragging bodies around

pub mod body;
pub mod collision;
pub mod constraint;
pub mod material;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, BodyType, RigidBody2D, DEFAULT_DENSITY};
pub use collision::{
    aabb_vs_aabb, circle_vs_aabb, circle_vs_circle, circle_vs_polygon, Category, CollisionFilter,
    CollisionLayer, Contact,
};
pub use constraint::{PointerConstraint, DEFAULT_POINTER_STIFFNESS};
pub use material::PhysicsMaterial;
pub use shapes::{Aabb, Circle, Collider, PolygonSet};
pub use world::{PhysicsConfig, PhysicsWorld, REFERENCE_STEP};
