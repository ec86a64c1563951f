//! Physics world and simulation

use crate::body::{BodyKey, RigidBody2D};
use crate::collision::{
    aabb_vs_aabb, circle_vs_aabb, circle_vs_circle, circle_vs_polygon, CollisionFilter, Contact,
};
use crate::constraint::PointerConstraint;
use crate::shapes::{Aabb, Collider};
use snowglobe_math::Vec2;
use slotmap::SlotMap;

/// Step length that per-step coefficients (air friction, stiffness) refer to
pub const REFERENCE_STEP: f32 = 1.0 / 60.0;

/// Configuration for the physics simulation
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
    /// Gravity acceleration in world units per second squared (y down)
    pub gravity: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 100.0),
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }
}

/// Broad-phase entry captured at the start of collision resolution
struct Proxy {
    key: BodyKey,
    bounds: Aabb,
    filter: CollisionFilter,
    dynamic: bool,
}

/// The physics world containing all rigid bodies
pub struct PhysicsWorld {
    /// All rigid bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, RigidBody2D>,
    /// Pointer drag constraint
    pointer: PointerConstraint,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            pointer: PointerConstraint::default(),
            config,
        }
    }

    /// Replace the pointer constraint (e.g. to change stiffness)
    pub fn with_pointer(mut self, pointer: PointerConstraint) -> Self {
        self.pointer = pointer;
        self
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: RigidBody2D) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<RigidBody2D> {
        if self.pointer.body() == Some(key) {
            self.pointer.release();
        }
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&RigidBody2D> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut RigidBody2D> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over all bodies with their keys
    pub fn iter(&self) -> impl Iterator<Item = (BodyKey, &RigidBody2D)> {
        self.bodies.iter()
    }

    /// Accumulate a force on a body, applied during the next step
    ///
    /// Returns false if the key is stale.
    pub fn apply_force(&mut self, key: BodyKey, point: Vec2, force: Vec2) -> bool {
        match self.bodies.get_mut(key) {
            Some(body) => {
                body.apply_force(point, force);
                true
            }
            None => false,
        }
    }

    /// The pointer constraint
    pub fn pointer(&self) -> &PointerConstraint {
        &self.pointer
    }

    /// Press the pointer at `position`, grabbing the first dynamic body under it
    pub fn pointer_down(&mut self, position: Vec2) -> Option<BodyKey> {
        self.pointer.set_position(position);
        let filter = self.pointer.filter;
        let picked = self
            .bodies
            .iter()
            .find(|(_, body)| {
                body.is_dynamic()
                    && filter.collides_with(&body.filter)
                    && body.collider.contains(position)
            })
            .map(|(key, _)| key);

        if let Some(key) = picked {
            self.pointer.attach(key);
        }
        picked
    }

    /// Move the pointer (the held body follows during the next steps)
    pub fn pointer_move(&mut self, position: Vec2) {
        self.pointer.set_position(position);
    }

    /// Release the pointer
    pub fn pointer_up(&mut self) -> Option<BodyKey> {
        self.pointer.release()
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Force, gravity and air-drag integration for dynamic bodies
    /// 2. The pointer drag constraint
    /// 3. Collision detection and resolution between filtered pairs
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let gravity = self.config.gravity;
        let drag_exponent = dt / REFERENCE_STEP;

        for (_key, body) in &mut self.bodies {
            if body.is_static() {
                body.force = Vec2::ZERO;
                continue;
            }

            let acceleration = gravity + body.force * body.inverse_mass();
            body.velocity += acceleration * dt;
            body.velocity *= (1.0 - body.air_friction).max(0.0).powf(drag_exponent);
            body.force = Vec2::ZERO;

            let displacement = body.velocity * dt;
            body.apply_correction(displacement);
        }

        self.solve_pointer(dt);
        self.resolve_collisions();
    }

    /// Pull the held body toward the pointer
    fn solve_pointer(&mut self, dt: f32) {
        let Some(key) = self.pointer.body() else {
            return;
        };

        let target = self.pointer.position();
        let stiffness = 1.0 - (1.0 - self.pointer.stiffness).powf(dt / REFERENCE_STEP);
        match self.bodies.get_mut(key) {
            Some(body) if body.is_dynamic() => {
                let correction = (target - body.position) * stiffness;
                body.apply_correction(correction);
                body.velocity = correction / dt;
            }
            _ => {
                self.pointer.release();
            }
        }
    }

    /// Build the broad-phase list sorted along x
    fn proxies(&self) -> Vec<Proxy> {
        let mut proxies: Vec<Proxy> = self
            .bodies
            .iter()
            .map(|(key, body)| Proxy {
                key,
                bounds: body.collider.bounds(),
                filter: body.filter,
                dynamic: body.is_dynamic(),
            })
            .collect();
        proxies.sort_by(|a, b| a.bounds.min.x.total_cmp(&b.bounds.min.x));
        proxies
    }

    /// Candidate pairs: sweep along x, then filter and bounds checks
    fn candidate_pairs(&self) -> Vec<(BodyKey, BodyKey)> {
        let proxies = self.proxies();
        let mut pairs = Vec::new();

        for (i, a) in proxies.iter().enumerate() {
            for b in &proxies[i + 1..] {
                if b.bounds.min.x > a.bounds.max.x {
                    break;
                }
                if !a.dynamic && !b.dynamic {
                    continue;
                }
                if !a.filter.collides_with(&b.filter) || !a.bounds.intersects(&b.bounds) {
                    continue;
                }
                pairs.push((a.key, b.key));
            }
        }
        pairs
    }

    /// Narrow phase between two colliders
    ///
    /// The contact normal points from `b` toward `a`. Polygon sets only
    /// collide with circles; they are used for static terrain.
    fn detect(a: &Collider, b: &Collider) -> Option<Contact> {
        match (a, b) {
            (Collider::Circle(a), Collider::Circle(b)) => circle_vs_circle(a, b),
            (Collider::Circle(circle), Collider::Rect(rect)) => circle_vs_aabb(circle, rect),
            (Collider::Rect(rect), Collider::Circle(circle)) => {
                circle_vs_aabb(circle, rect).map(Contact::flipped)
            }
            (Collider::Circle(circle), Collider::Polygon(poly)) => circle_vs_polygon(circle, poly),
            (Collider::Polygon(poly), Collider::Circle(circle)) => {
                circle_vs_polygon(circle, poly).map(Contact::flipped)
            }
            (Collider::Rect(a), Collider::Rect(b)) => aabb_vs_aabb(a, b),
            (Collider::Polygon(_), _) | (_, Collider::Polygon(_)) => None,
        }
    }

    /// Contact between two bodies, if they may collide and overlap
    pub fn contact(&self, a: BodyKey, b: BodyKey) -> Option<Contact> {
        let body_a = self.bodies.get(a)?;
        let body_b = self.bodies.get(b)?;
        if !body_a.filter.collides_with(&body_b.filter) {
            return None;
        }
        Self::detect(&body_a.collider, &body_b.collider).filter(Contact::is_colliding)
    }

    /// All pairs of bodies currently in contact
    pub fn contacts(&self) -> Vec<(BodyKey, BodyKey, Contact)> {
        self.candidate_pairs()
            .into_iter()
            .filter_map(|(a, b)| self.contact(a, b).map(|c| (a, b, c)))
            .collect()
    }

    /// Resolve collisions between all candidate pairs
    fn resolve_collisions(&mut self) {
        for (key_a, key_b) in self.candidate_pairs() {
            if let Some(contact) = self.contact(key_a, key_b) {
                self.resolve_pair(key_a, key_b, &contact);
            }
        }
    }

    /// Separate two bodies and apply the contact impulse
    fn resolve_pair(&mut self, key_a: BodyKey, key_b: BodyKey, contact: &Contact) {
        let Some([a, b]) = self.bodies.get_disjoint_mut([key_a, key_b]) else {
            return;
        };

        let inv_a = a.inverse_mass();
        let inv_b = b.inverse_mass();
        let inv_total = inv_a + inv_b;
        if inv_total <= 0.0 {
            return;
        }

        // Position correction split by inverse mass
        let correction = contact.normal * (contact.penetration / inv_total);
        if inv_a > 0.0 {
            a.apply_correction(correction * inv_a);
        }
        if inv_b > 0.0 {
            b.apply_correction(-correction * inv_b);
        }

        let relative = a.velocity - b.velocity;
        let along_normal = relative.dot(contact.normal);
        if along_normal >= 0.0 {
            // Already separating
            return;
        }

        let combined = a.material.combine(&b.material);
        let impulse = -(1.0 + combined.restitution) * along_normal / inv_total;
        a.velocity += contact.normal * (impulse * inv_a);
        b.velocity -= contact.normal * (impulse * inv_b);

        // Coulomb friction along the tangent
        if combined.friction > 0.0 {
            let tangent = contact.normal.perp();
            let slide = (a.velocity - b.velocity).dot(tangent);
            let max_friction = combined.friction * impulse;
            let friction_impulse = (-slide / inv_total).clamp(-max_friction, max_friction);
            a.velocity += tangent * (friction_impulse * inv_a);
            b.velocity -= tangent * (friction_impulse * inv_b);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
