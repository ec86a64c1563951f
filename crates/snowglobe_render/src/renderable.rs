//! Renderable geometry - bridges the Scene to GPU buffers
//!
//! This module tessellates bodies into flat-coloured triangles in canvas
//! units, ready for [`ShapePipeline::upload`](crate::pipeline::ShapePipeline::upload).

use snowglobe_core::{FillStyle, Rgba, Scene};
use snowglobe_math::{vertices, Vec2};
use snowglobe_physics::{Aabb, Collider};

use crate::pipeline::ShapeVertex;

/// Fewest segments used for a circle
const MIN_CIRCLE_SEGMENTS: usize = 12;
/// Most segments used for a circle
const MAX_CIRCLE_SEGMENTS: usize = 48;

/// What to draw beyond the filled bodies
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Outline every collider, including invisible ones
    pub show_colliders: bool,
    /// Outline colour
    pub collider_color: Rgba,
    /// Colour of the line between the pointer and a dragged body
    pub constraint_color: Rgba,
    /// Width of outlines and the drag line in canvas units
    pub line_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_colliders: false,
            collider_color: [0.6, 1.0, 0.6, 0.8],
            constraint_color: [0.9, 0.9, 0.9, 0.8],
            line_width: 1.0,
        }
    }
}

/// Triangle list for one frame
#[derive(Clone, Debug, Default)]
pub struct SceneGeometry {
    /// Vertices, three per triangle
    pub vertices: Vec<ShapeVertex>,
}

impl SceneGeometry {
    /// Create empty geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Tessellate every visible body of a scene
    ///
    /// Bodies are drawn in insertion order, so later bodies paint over
    /// earlier ones.
    pub fn from_scene(scene: &Scene, options: &RenderOptions) -> Self {
        let mut geometry = Self::new();

        for (_key, body, style) in scene.styled_bodies() {
            if let FillStyle::Solid(color) = style {
                geometry.add_collider(&body.collider, color);
            }
        }

        if options.show_colliders {
            for (_key, body, _style) in scene.styled_bodies() {
                geometry.add_outline(&body.collider, options.collider_color, options.line_width);
            }
        }

        let physics = scene.physics();
        let pointer = physics.pointer();
        if let Some(body) = pointer.body().and_then(|key| physics.get_body(key)) {
            geometry.add_line(
                body.position,
                pointer.position(),
                options.line_width,
                options.constraint_color,
            );
        }

        geometry
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgba) {
        self.vertices.extend_from_slice(&[
            ShapeVertex::new(a.to_array(), color),
            ShapeVertex::new(b.to_array(), color),
            ShapeVertex::new(c.to_array(), color),
        ]);
    }

    /// Fill a collider shape
    pub fn add_collider(&mut self, collider: &Collider, color: Rgba) {
        match collider {
            Collider::Circle(circle) => self.add_circle(circle.center, circle.radius, color),
            Collider::Rect(rect) => self.add_rect(rect, color),
            Collider::Polygon(polygon) => {
                for part in polygon.parts() {
                    self.add_polygon(part, color);
                }
            }
        }
    }

    /// Filled circle as a triangle fan
    pub fn add_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let ring = circle_points(center, radius);
        for i in 0..ring.len() {
            let next = (i + 1) % ring.len();
            self.push_triangle(center, ring[i], ring[next], color);
        }
    }

    /// Filled axis-aligned rectangle
    pub fn add_rect(&mut self, rect: &Aabb, color: Rgba) {
        let [a, b, c, d] = rect.corners();
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Filled simple polygon (may be concave)
    pub fn add_polygon(&mut self, points: &[Vec2], color: Rgba) {
        for [a, b, c] in triangulate(points) {
            self.push_triangle(points[a], points[b], points[c], color);
        }
    }

    /// Line segment as a quad
    pub fn add_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let direction = to - from;
        if direction.length_squared() <= f32::EPSILON {
            return;
        }
        let offset = direction.normalized().perp() * (width * 0.5);
        self.push_triangle(from + offset, to + offset, to - offset, color);
        self.push_triangle(from + offset, to - offset, from - offset, color);
    }

    /// Closed outline through `points`
    pub fn add_loop(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        for i in 0..points.len() {
            let next = (i + 1) % points.len();
            self.add_line(points[i], points[next], width, color);
        }
    }

    /// Outline of a collider shape
    pub fn add_outline(&mut self, collider: &Collider, color: Rgba, width: f32) {
        match collider {
            Collider::Circle(circle) => {
                self.add_loop(&circle_points(circle.center, circle.radius), width, color)
            }
            Collider::Rect(rect) => self.add_loop(&rect.corners(), width, color),
            Collider::Polygon(polygon) => {
                for part in polygon.parts() {
                    self.add_loop(part, width, color);
                }
            }
        }
    }
}

/// Points around a circle, more for bigger circles
fn circle_points(center: Vec2, radius: f32) -> Vec<Vec2> {
    let segments = ((radius * 2.0).ceil() as usize).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS);
    (0..segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Ear-clipping triangulation of a simple polygon
///
/// Returns index triples into `points`. Degenerate input yields whatever
/// ears could be found.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::new();
    if points.len() < 3 {
        return triangles;
    }

    // Orient to positive signed area so ears are the convex corners
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    if vertices::signed_area(points) < 0.0 {
        remaining.reverse();
    }

    let mut guard = 0;
    while remaining.len() > 3 && guard < points.len() * points.len() {
        guard += 1;
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let (a, b, c) = (
                remaining[(i + n - 1) % n],
                remaining[i],
                remaining[(i + 1) % n],
            );
            is_ear(points, &remaining, a, b, c)
        });

        match ear {
            Some(i) => {
                triangles.push([remaining[(i + n - 1) % n], remaining[i], remaining[(i + 1) % n]]);
                remaining.remove(i);
            }
            None => break,
        }
    }

    if remaining.len() == 3 {
        triangles.push([remaining[0], remaining[1], remaining[2]]);
    }
    triangles
}

fn is_ear(points: &[Vec2], remaining: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (points[a], points[b], points[c]);
    if (pb - pa).cross(pc - pb) <= 0.0 {
        return false;
    }
    remaining
        .iter()
        .filter(|&&i| i != a && i != b && i != c)
        .all(|&i| !in_triangle(points[i], pa, pb, pc))
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}
