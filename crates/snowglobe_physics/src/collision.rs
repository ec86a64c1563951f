//! Collision detection for 2D shapes
//!
//! Provides narrow-phase tests between circles, rectangles and polygon sets,
//! plus collision filtering via category layers and masks.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::shapes::{Aabb, Circle, PolygonSet};
use snowglobe_math::{vertices, Vec2};

bitflags! {
    /// Collision layers for filtering which bodies can collide
    ///
    /// A body with an empty layer set (the passive category) matches no mask
    /// and therefore never collides.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Static scenery: walls, buildings, trees
        const TERRAIN = 1 << 0;
        /// Foreground snow
        const FRONT = 1 << 1;
        /// Middle-distance snow
        const MIDDLE = 1 << 2;
        /// Background snow
        const BACK = 1 << 3;
        /// All layers (collide with everything)
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision category of a body in the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Decorative only, collides with nothing
    Passive,
    /// Immovable scenery
    Terrain,
    /// Depth layer closest to the viewer
    Front,
    Middle,
    /// Depth layer furthest from the viewer
    Back,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 5] = [
        Category::Passive,
        Category::Terrain,
        Category::Front,
        Category::Middle,
        Category::Back,
    ];

    /// The snow depth layers, front to back
    pub const DEPTH_LAYERS: [Category; 3] = [Category::Front, Category::Middle, Category::Back];

    /// The layer bit this category occupies
    pub fn layer(self) -> CollisionLayer {
        match self {
            Category::Passive => CollisionLayer::empty(),
            Category::Terrain => CollisionLayer::TERRAIN,
            Category::Front => CollisionLayer::FRONT,
            Category::Middle => CollisionLayer::MIDDLE,
            Category::Back => CollisionLayer::BACK,
        }
    }

    /// Whether this category is one of the snow depth layers
    pub fn is_depth_layer(self) -> bool {
        matches!(self, Category::Front | Category::Middle | Category::Back)
    }

    /// Collision filter for a body of this category
    ///
    /// Depth layers collide with terrain and with their own layer only.
    pub fn filter(self) -> CollisionFilter {
        match self {
            Category::Passive => CollisionFilter::passive(),
            Category::Terrain => CollisionFilter::terrain(),
            depth => CollisionFilter::new(depth.layer(), CollisionLayer::TERRAIN | depth.layer()),
        }
    }
}

/// Collision filter determining what a body collides with
///
/// Two bodies A and B collide if:
/// - (A.layer & B.mask) != 0, AND
/// - (B.layer & A.mask) != 0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Which layer(s) this body belongs to
    pub layer: CollisionLayer,
    /// Which layer(s) this body can collide with
    pub mask: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            layer: CollisionLayer::TERRAIN,
            mask: CollisionLayer::ALL,
        }
    }
}

impl CollisionFilter {
    /// Create a new collision filter with specified layer and mask
    pub fn new(layer: CollisionLayer, mask: CollisionLayer) -> Self {
        Self { layer, mask }
    }

    /// Check if this filter allows collision with another filter
    pub fn collides_with(&self, other: &Self) -> bool {
        self.layer.intersects(other.mask) && other.layer.intersects(self.mask)
    }

    /// Filter for static scenery: detected by every layer
    pub fn terrain() -> Self {
        Self {
            layer: CollisionLayer::TERRAIN,
            mask: CollisionLayer::ALL,
        }
    }

    /// Filter for decorative bodies that never collide
    pub fn passive() -> Self {
        Self {
            layer: CollisionLayer::empty(),
            mask: CollisionLayer::empty(),
        }
    }

    /// Filter used by the pointer when picking bodies to drag
    pub fn pointer() -> Self {
        Self::default()
    }
}

/// Contact information from a collision
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// Point of contact
    pub point: Vec2,
    /// Normal pointing from the second shape toward the first
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }

    /// The same contact seen from the other shape
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Test circle vs circle collision
///
/// The normal points from `b` toward `a`. Concentric circles are separated
/// straight up.
pub fn circle_vs_circle(a: &Circle, b: &Circle) -> Option<Contact> {
    let delta = a.center - b.center;
    let dist_sq = delta.length_squared();
    let min_dist = a.radius + b.radius;

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 0.0001 { delta / dist } else { -Vec2::Y };
    let point = b.center + normal * b.radius;
    Some(Contact::new(point, normal, min_dist - dist))
}

/// Test circle vs AABB collision
///
/// The normal points from the AABB toward the circle.
pub fn circle_vs_aabb(circle: &Circle, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.closest_point(circle.center);
    let delta = circle.center - closest;
    let dist_squared = delta.length_squared();

    if dist_squared >= circle.radius * circle.radius {
        return None;
    }

    let dist = dist_squared.sqrt();
    if dist > 0.0001 {
        let penetration = circle.radius - dist;
        return Some(Contact::new(closest, delta / dist, penetration));
    }

    // Center inside the AABB: escape along the shortest axis
    let to_min = circle.center - aabb.min;
    let to_max = aabb.max - circle.center;

    let mut min_dist = to_min.x;
    let mut normal = -Vec2::X;
    if to_max.x < min_dist {
        min_dist = to_max.x;
        normal = Vec2::X;
    }
    if to_min.y < min_dist {
        min_dist = to_min.y;
        normal = -Vec2::Y;
    }
    if to_max.y < min_dist {
        min_dist = to_max.y;
        normal = Vec2::Y;
    }

    let point = circle.center + normal * min_dist;
    Some(Contact::new(point, normal, circle.radius + min_dist))
}

/// Test circle vs polygon set collision
///
/// Each part is tested independently and the deepest contact wins. The
/// normal points from the polygon toward the circle.
pub fn circle_vs_polygon(circle: &Circle, polygon: &PolygonSet) -> Option<Contact> {
    if !circle.bounds().intersects(&polygon.bounds()) {
        return None;
    }

    let mut deepest: Option<Contact> = None;
    for part in polygon.parts() {
        let Some(closest) = vertices::closest_point_on_boundary(part, circle.center) else {
            continue;
        };
        let delta = circle.center - closest;
        let dist = delta.length();
        let inside = vertices::contains(part, circle.center);

        let contact = if inside {
            let normal = if dist > 0.0001 {
                -delta / dist
            } else {
                (circle.center - vertices::centroid(part)).normalized()
            };
            Contact::new(closest, normal, circle.radius + dist)
        } else if dist < circle.radius && dist > 0.0001 {
            Contact::new(closest, delta / dist, circle.radius - dist)
        } else {
            continue;
        };

        if deepest.map_or(true, |d| contact.penetration > d.penetration) {
            deepest = Some(contact);
        }
    }
    deepest
}

/// Test AABB vs AABB collision
///
/// Returns the minimum-translation contact; the normal points from `b` toward `a`.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let overlap_x = a.max.x.min(b.max.x) - a.min.x.max(b.min.x);
    let overlap_y = a.max.y.min(b.max.y) - a.min.y.max(b.min.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let delta = a.center() - b.center();
    let (normal, penetration) = if overlap_x < overlap_y {
        (if delta.x >= 0.0 { Vec2::X } else { -Vec2::X }, overlap_x)
    } else {
        (if delta.y >= 0.0 { Vec2::Y } else { -Vec2::Y }, overlap_y)
    };

    let point = a.closest_point(b.center());
    Some(Contact::new(point, normal, penetration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_filters() {
        let front = Category::Front.filter();
        assert_eq!(front.layer, CollisionLayer::FRONT);
        assert_eq!(front.mask, CollisionLayer::TERRAIN | CollisionLayer::FRONT);

        assert!(front.collides_with(&Category::Front.filter()));
        assert!(front.collides_with(&Category::Terrain.filter()));
        assert!(!front.collides_with(&Category::Middle.filter()));
        assert!(!front.collides_with(&Category::Back.filter()));
        assert!(!Category::Middle.filter().collides_with(&Category::Back.filter()));
    }

    #[test]
    fn test_passive_collides_with_nothing() {
        let passive = Category::Passive.filter();
        for category in Category::ALL {
            assert!(!passive.collides_with(&category.filter()), "{:?}", category);
        }
    }

    #[test]
    fn test_pointer_picks_depth_layers_only() {
        let pointer = CollisionFilter::pointer();
        for category in Category::DEPTH_LAYERS {
            assert!(pointer.collides_with(&category.filter()));
        }
        assert!(!pointer.collides_with(&Category::Passive.filter()));
    }

    #[test]
    fn test_is_depth_layer() {
        assert!(Category::Front.is_depth_layer());
        assert!(!Category::Terrain.is_depth_layer());
        assert!(!Category::Passive.is_depth_layer());
    }

    #[test]
    fn test_circle_vs_circle() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Circle::new(Vec2::new(1.5, 0.0), 1.0);
        let contact = circle_vs_circle(&a, &b).unwrap();
        assert!((contact.penetration - 0.5).abs() < 1e-6);
        // Pointing from b toward a
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));

        let far = Circle::new(Vec2::new(3.0, 0.0), 1.0);
        assert!(circle_vs_circle(&a, &far).is_none());
    }

    #[test]
    fn test_circle_vs_circle_concentric() {
        let a = Circle::new(Vec2::new(2.0, 2.0), 1.0);
        let contact = circle_vs_circle(&a, &a).unwrap();
        assert_eq!(contact.normal, -Vec2::Y);
        assert_eq!(contact.penetration, 2.0);
    }

    #[test]
    fn test_circle_vs_aabb_outside() {
        let wall = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 700.0));
        let flake = Circle::new(Vec2::new(5.0, 100.0), 2.0);
        let contact = circle_vs_aabb(&flake, &wall).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_vs_aabb_center_inside() {
        let wall = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(4.0, 700.0));
        let flake = Circle::new(Vec2::new(3.0, 100.0), 2.0);
        let contact = circle_vs_aabb(&flake, &wall).unwrap();
        // Nearest edge is the right one at x = 4
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_circle_vs_polygon() {
        let roof = PolygonSet::new(vec![vec![
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 10.0),
        ]]);

        // Resting just above the left slope
        let flake = Circle::new(Vec2::new(4.0, 5.0), 1.0);
        let contact = circle_vs_polygon(&flake, &roof).unwrap();
        assert!(contact.normal.y < 0.0, "normal should push upward");
        assert!(contact.normal.x < 0.0);

        // Deep inside the roof
        let buried = Circle::new(Vec2::new(10.0, 8.0), 1.0);
        let contact = circle_vs_polygon(&buried, &roof).unwrap();
        assert!(contact.penetration > 1.0);

        let clear = Circle::new(Vec2::new(10.0, -5.0), 1.0);
        assert!(circle_vs_polygon(&clear, &roof).is_none());
    }

    #[test]
    fn test_aabb_vs_aabb() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.5, 0.0), Vec2::new(3.5, 2.0));
        let contact = aabb_vs_aabb(&a, &b).unwrap();
        assert_eq!(contact.normal, -Vec2::X);
        assert!((contact.penetration - 0.5).abs() < 1e-6);

        let c = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));
        assert!(aabb_vs_aabb(&a, &c).is_none());
    }

    #[test]
    fn test_contact_flipped() {
        let contact = Contact::new(Vec2::ZERO, Vec2::X, 0.5).flipped();
        assert_eq!(contact.normal, -Vec2::X);
        assert!(contact.is_colliding());
    }
}
