//! Collision shapes for 2D physics
//!
//! Colliders store absolute world coordinates and are translated together
//! with their body.

use snowglobe_math::{vertices, Vec2, VertexSet};

/// A circle defined by center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Create a new circle at the given center with the given radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point is inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }

    /// Area of the disc
    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    /// Bounding box of the circle
    pub fn bounds(&self) -> Aabb {
        let r = Vec2::new(self.radius, self.radius);
        Aabb::new(self.center - r, self.center + r)
    }
}

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with the given width and height
    pub fn from_center_size(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width * 0.5, height * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Full size in each dimension
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Area of the rectangle
    pub fn area(&self) -> f32 {
        let size = self.size();
        size.x * size.y
    }

    /// Check if a point is inside the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Get the closest point on (or in) the AABB to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    /// Check if two AABBs overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Smallest AABB containing both
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            self.min.min_components(other.min),
            self.max.max_components(other.max),
        )
    }

    /// The four corners in outline order
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}

/// One or more polygon outlines forming a single rigid shape
///
/// Parts may be concave. Used for terrain built from vertex-set assets.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonSet {
    parts: Vec<VertexSet>,
    bounds: Aabb,
}

impl PolygonSet {
    /// Build from parts already in world coordinates
    ///
    /// Parts with fewer than three points cannot enclose anything and are dropped.
    pub fn new(parts: Vec<VertexSet>) -> Self {
        let parts: Vec<VertexSet> = parts.into_iter().filter(|p| p.len() >= 3).collect();
        let bounds = parts
            .iter()
            .filter_map(|p| vertices::bounds(p))
            .map(|(min, max)| Aabb::new(min, max))
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Aabb::new(Vec2::ZERO, Vec2::ZERO));
        Self { parts, bounds }
    }

    /// The polygon parts
    pub fn parts(&self) -> &[VertexSet] {
        &self.parts
    }

    /// Bounding box of all parts
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Area-weighted centroid of all parts
    pub fn centroid(&self) -> Vec2 {
        vertices::compound_centroid(&self.parts)
    }

    /// Total area of all parts
    pub fn area(&self) -> f32 {
        self.parts.iter().map(|p| vertices::area(p)).sum()
    }

    /// Check if a point lies inside any part
    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds.contains(point) && self.parts.iter().any(|p| vertices::contains(p, point))
    }

    /// Move every part by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        for part in &mut self.parts {
            for v in part.iter_mut() {
                *v += delta;
            }
        }
        self.bounds = Aabb::new(self.bounds.min + delta, self.bounds.max + delta);
    }
}

/// Collision shape of a body
#[derive(Clone, Debug, PartialEq)]
pub enum Collider {
    Circle(Circle),
    Rect(Aabb),
    Polygon(PolygonSet),
}

impl Collider {
    /// Geometric center of the collider
    pub fn center(&self) -> Vec2 {
        match self {
            Collider::Circle(c) => c.center,
            Collider::Rect(r) => r.center(),
            Collider::Polygon(p) => p.centroid(),
        }
    }

    /// Bounding box used by the broad phase
    pub fn bounds(&self) -> Aabb {
        match self {
            Collider::Circle(c) => c.bounds(),
            Collider::Rect(r) => *r,
            Collider::Polygon(p) => p.bounds(),
        }
    }

    /// Area of the shape (used for mass)
    pub fn area(&self) -> f32 {
        match self {
            Collider::Circle(c) => c.area(),
            Collider::Rect(r) => r.area(),
            Collider::Polygon(p) => p.area(),
        }
    }

    /// Check if a point lies inside the shape
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Collider::Circle(c) => c.contains(point),
            Collider::Rect(r) => r.contains(point),
            Collider::Polygon(p) => p.contains(point),
        }
    }

    /// Radius if this is a circle
    pub fn radius(&self) -> Option<f32> {
        match self {
            Collider::Circle(c) => Some(c.radius),
            _ => None,
        }
    }

    /// Move the collider by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Collider::Circle(c) => c.center += delta,
            Collider::Rect(r) => {
                r.min += delta;
                r.max += delta;
            }
            Collider::Polygon(p) => p.translate(delta),
        }
    }
}
