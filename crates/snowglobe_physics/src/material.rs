//! Physical material properties for collision response

/// Physical material properties for collision response
///
/// Materials define how bodies interact when they touch: friction (how much
/// they resist sliding) and restitution (bounciness). Drag through the air
/// is a per-body property, see [`RigidBody2D::air_friction`](crate::RigidBody2D).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0.0 = frictionless)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// No friction, no bounce. Terrain and snow both use this.
    pub const FRICTIONLESS: Self = Self {
        friction: 0.0,
        restitution: 0.0,
    };

    /// Create a new physics material with custom friction and restitution
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two materials for collision response
    ///
    /// Geometric mean for friction, maximum for restitution.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }
}
