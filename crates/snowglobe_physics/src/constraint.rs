//! Pointer drag constraint
//!
//! Grabs the dynamic body under the pointer on press and pulls it toward the
//! pointer every step until release.

use crate::body::BodyKey;
use crate::collision::CollisionFilter;
use snowglobe_math::Vec2;

/// Default pull strength per reference step
pub const DEFAULT_POINTER_STIFFNESS: f32 = 0.2;

/// Spring-like constraint between the pointer and a grabbed body
#[derive(Clone, Debug)]
pub struct PointerConstraint {
    /// Fraction of the remaining distance closed each step (0..=1)
    pub stiffness: f32,
    /// Which bodies the pointer may pick up
    pub filter: CollisionFilter,
    position: Vec2,
    body: Option<BodyKey>,
}

impl Default for PointerConstraint {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER_STIFFNESS)
    }
}

impl PointerConstraint {
    /// Create an unattached constraint
    pub fn new(stiffness: f32) -> Self {
        Self {
            stiffness: stiffness.clamp(0.0, 1.0),
            filter: CollisionFilter::pointer(),
            position: Vec2::ZERO,
            body: None,
        }
    }

    /// Current pointer position in world coordinates
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the pointer
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// The body currently held, if any
    pub fn body(&self) -> Option<BodyKey> {
        self.body
    }

    /// Whether a body is currently held
    pub fn is_dragging(&self) -> bool {
        self.body.is_some()
    }

    pub(crate) fn attach(&mut self, body: BodyKey) {
        self.body = Some(body);
    }

    /// Let go of the held body
    pub fn release(&mut self) -> Option<BodyKey> {
        self.body.take()
    }
}
