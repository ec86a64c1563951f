//! Rigid body types for 2D physics simulation

use crate::collision::CollisionFilter;
use crate::material::PhysicsMaterial;
use crate::shapes::{Aabb, Circle, Collider, PolygonSet};
use snowglobe_math::{vertices, Vec2, VertexSet};
use slotmap::new_key_type;

new_key_type! {
    /// Key to a rigid body in the physics world
    ///
    /// Generational: a key to a removed body returns `None` even after its
    /// slot is reused.
    pub struct BodyKey;
}

/// Mass per unit area used when none is given
pub const DEFAULT_DENSITY: f32 = 0.001;

/// How a body participates in the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Integrated every step, pushed by gravity, forces and contacts
    #[default]
    Dynamic,
    /// Never moves
    Static,
}

/// A 2D rigid body with position, velocity, and collision shape
///
/// Bodies do not rotate; the scene only simulates circles and fixed terrain.
#[derive(Clone, Debug)]
pub struct RigidBody2D {
    /// Position in world space (center of mass)
    pub position: Vec2,
    /// Velocity in world units per second
    pub velocity: Vec2,
    /// Force accumulated since the last step
    pub force: Vec2,
    /// Fraction of velocity lost per reference step (1/60 s) to air drag
    pub air_friction: f32,
    /// The collision shape (stores absolute world position)
    pub collider: Collider,
    /// Which bodies this one may collide with
    pub filter: CollisionFilter,
    /// Friction and restitution used on contact
    pub material: PhysicsMaterial,
    body_type: BodyType,
    mass: f32,
}

impl RigidBody2D {
    fn from_collider(position: Vec2, collider: Collider) -> Self {
        let mass = collider.area() * DEFAULT_DENSITY;
        Self {
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            air_friction: 0.01,
            collider,
            filter: CollisionFilter::default(),
            material: PhysicsMaterial::default(),
            body_type: BodyType::Dynamic,
            mass,
        }
    }

    /// Create a new dynamic circle body
    pub fn new_circle(position: Vec2, radius: f32) -> Self {
        Self::from_collider(position, Collider::Circle(Circle::new(position, radius)))
    }

    /// Create a new dynamic rectangle centered at `position`
    pub fn new_rect(position: Vec2, width: f32, height: f32) -> Self {
        Self::from_collider(
            position,
            Collider::Rect(Aabb::from_center_size(position, width, height)),
        )
    }

    /// Create a body from vertex sets, placed so its area centroid sits at `position`
    ///
    /// The sets keep their relative layout; only the whole shape is moved.
    pub fn from_vertex_sets(position: Vec2, sets: &[VertexSet]) -> Self {
        let centroid = vertices::compound_centroid(sets);
        let offset = position - centroid;
        let parts = sets.iter().map(|set| vertices::translate(set, offset)).collect();
        Self::from_collider(position, Collider::Polygon(PolygonSet::new(parts)))
    }

    /// Create a static rectangle (walls)
    pub fn new_static_rect(position: Vec2, width: f32, height: f32) -> Self {
        Self::new_rect(position, width, height).with_body_type(BodyType::Static)
    }

    /// Set the body type
    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }

    /// Make this body static (never moves)
    pub fn with_static(self, is_static: bool) -> Self {
        self.with_body_type(if is_static { BodyType::Static } else { BodyType::Dynamic })
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass directly
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(0.0);
        self
    }

    /// Set the air friction, clamped to [0, 1]
    pub fn with_air_friction(mut self, air_friction: f32) -> Self {
        self.air_friction = air_friction.clamp(0.0, 1.0);
        self
    }

    /// Set the collision filter
    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the physics material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Get the body type
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Check if this body is static
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Check if this body is dynamic
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Mass of the body
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Inverse mass (0 for static or massless bodies)
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Radius if the collider is a circle
    pub fn radius(&self) -> Option<f32> {
        self.collider.radius()
    }

    /// Accumulate a force, consumed by the next step
    ///
    /// Bodies do not rotate, so the point of application only matters to
    /// callers that want to mirror a torque-aware engine; it does not change
    /// the resulting linear acceleration.
    pub fn apply_force(&mut self, _point: Vec2, force: Vec2) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    /// Update the position and sync the collider
    pub fn set_position(&mut self, position: Vec2) {
        let delta = position - self.position;
        self.apply_correction(delta);
    }

    /// Apply a positional correction (e.g., from collision resolution)
    pub fn apply_correction(&mut self, correction: Vec2) {
        self.position += correction;
        self.collider.translate(correction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circle_body() {
        let pos = Vec2::new(100.0, 50.0);
        let body = RigidBody2D::new_circle(pos, 5.0);

        assert_eq!(body.position, pos);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(body.is_dynamic());
        assert_eq!(body.radius(), Some(5.0));
        assert_eq!(body.collider.center(), pos);

        let expected_mass = std::f32::consts::PI * 25.0 * DEFAULT_DENSITY;
        assert!((body.mass() - expected_mass).abs() < 1e-6);
    }

    #[test]
    fn test_static_rect_has_no_inverse_mass() {
        let body = RigidBody2D::new_static_rect(Vec2::new(200.0, 2.0), 400.0, 4.0);
        assert!(body.is_static());
        assert_eq!(body.inverse_mass(), 0.0);
        assert_eq!(body.collider.bounds().min, Vec2::ZERO);
    }

    #[test]
    fn test_from_vertex_sets_centers_on_position() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let body = RigidBody2D::from_vertex_sets(Vec2::new(190.0, 660.0), &[square]);
        let center = body.collider.center();
        assert!((center.x - 190.0).abs() < 1e-3);
        assert!((center.y - 660.0).abs() < 1e-3);
        assert!(body.collider.contains(Vec2::new(186.0, 656.0)));
    }

    #[test]
    fn test_builder_methods() {
        let body = RigidBody2D::new_circle(Vec2::ZERO, 1.0)
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_mass(5.0)
            .with_air_friction(1.5)
            .with_material(PhysicsMaterial::FRICTIONLESS);

        assert_eq!(body.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(body.mass(), 5.0);
        assert_eq!(body.air_friction, 1.0);
        assert_eq!(body.material.friction, 0.0);
    }

    #[test]
    fn test_apply_force_ignored_on_static() {
        let mut body = RigidBody2D::new_circle(Vec2::ZERO, 1.0).with_static(true);
        body.apply_force(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert_eq!(body.force, Vec2::ZERO);

        let mut body = RigidBody2D::new_circle(Vec2::ZERO, 1.0);
        body.apply_force(Vec2::new(200.0, 400.0), Vec2::new(1.0, 1.0));
        body.apply_force(Vec2::new(200.0, 400.0), Vec2::new(1.0, 0.0));
        assert_eq!(body.force, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_set_position_moves_collider() {
        let mut body = RigidBody2D::new_circle(Vec2::ZERO, 1.0);
        body.set_position(Vec2::new(5.0, 10.0));
        assert_eq!(body.position, Vec2::new(5.0, 10.0));
        assert_eq!(body.collider.center(), Vec2::new(5.0, 10.0));
    }
}
