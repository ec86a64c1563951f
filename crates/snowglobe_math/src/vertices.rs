//! Vertex sets: ordered 2D points describing a closed polygon outline
//!
//! The outline is implicitly closed (the last point connects back to the
//! first). Polygons may be concave; nothing here assumes convexity.

use crate::Vec2;

/// An ordered polygon outline
pub type VertexSet = Vec<Vec2>;

/// Scale every point of a vertex set about `origin`
pub fn scale(vertices: &[Vec2], scale_x: f32, scale_y: f32, origin: Vec2) -> VertexSet {
    vertices
        .iter()
        .map(|&v| {
            let delta = v - origin;
            origin + Vec2::new(delta.x * scale_x, delta.y * scale_y)
        })
        .collect()
}

/// Uniformly scale a list of vertex sets about the coordinate origin
pub fn scale_sets(sets: &[VertexSet], factor: f32) -> Vec<VertexSet> {
    sets.iter()
        .map(|set| scale(set, factor, factor, Vec2::ZERO))
        .collect()
}

/// Translate every point of a vertex set
pub fn translate(vertices: &[Vec2], offset: Vec2) -> VertexSet {
    vertices.iter().map(|&v| v + offset).collect()
}

/// Signed area (positive for clockwise outlines in y-down coordinates)
pub fn signed_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        twice_area += a.cross(b);
    }
    twice_area * 0.5
}

/// Unsigned area
pub fn area(vertices: &[Vec2]) -> f32 {
    signed_area(vertices).abs()
}

/// Mean of the points, used when the outline is degenerate
pub fn mean(vertices: &[Vec2]) -> Vec2 {
    if vertices.is_empty() {
        return Vec2::ZERO;
    }
    let sum = vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
    sum / vertices.len() as f32
}

/// Area centroid of a polygon
///
/// Falls back to the mean of the points for degenerate (zero-area) outlines.
pub fn centroid(vertices: &[Vec2]) -> Vec2 {
    let a = signed_area(vertices);
    if a.abs() < f32::EPSILON {
        return mean(vertices);
    }

    let mut c = Vec2::ZERO;
    for (i, &p) in vertices.iter().enumerate() {
        let q = vertices[(i + 1) % vertices.len()];
        let cross = p.cross(q);
        c += (p + q) * cross;
    }
    c / (6.0 * a)
}

/// Area-weighted centroid of several parts treated as one shape
pub fn compound_centroid(sets: &[VertexSet]) -> Vec2 {
    let mut total_area = 0.0;
    let mut weighted = Vec2::ZERO;
    for set in sets {
        let a = area(set);
        weighted += centroid(set) * a;
        total_area += a;
    }

    if total_area > f32::EPSILON {
        weighted / total_area
    } else {
        let all: Vec<Vec2> = sets.iter().flatten().copied().collect();
        mean(&all)
    }
}

/// Axis-aligned bounds as (min, max); `None` for an empty set
pub fn bounds(vertices: &[Vec2]) -> Option<(Vec2, Vec2)> {
    let first = *vertices.first()?;
    Some(vertices.iter().skip(1).fold((first, first), |(min, max), &v| {
        (min.min_components(v), max.max_components(v))
    }))
}

/// Even-odd point-in-polygon test
pub fn contains(vertices: &[Vec2], point: Vec2) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Closest point to `point` on the segment `a`-`b`
pub fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Closest point to `point` on the polygon outline
pub fn closest_point_on_boundary(vertices: &[Vec2], point: Vec2) -> Option<Vec2> {
    let n = vertices.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(vertices[0]);
    }

    let mut best = vertices[0];
    let mut best_dist = f32::INFINITY;
    for i in 0..n {
        let candidate = closest_point_on_segment(vertices[i], vertices[(i + 1) % n], point);
        let dist = (candidate - point).length_squared();
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> VertexSet {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ]
    }

    #[test]
    fn test_area_and_centroid() {
        let sq = square(2.0);
        assert_eq!(area(&sq), 4.0);
        let c = centroid(&sq);
        assert!((c.x - 1.0).abs() < 1e-5);
        assert!((c.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_signed_area_winding() {
        let mut sq = square(1.0);
        let a = signed_area(&sq);
        sq.reverse();
        assert_eq!(signed_area(&sq), -a);
    }

    #[test]
    fn test_degenerate_centroid_uses_mean() {
        let line = vec![Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)];
        assert_eq!(centroid(&line), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_compound_centroid_weights_by_area() {
        // Big square at origin, small square far away
        let big = square(4.0);
        let small = translate(&square(1.0), Vec2::new(10.0, 0.0));
        let c = compound_centroid(&[big, small]);
        // (16 * 2 + 1 * 10.5) / 17
        assert!((c.x - 42.5 / 17.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_about_origin() {
        let scaled = scale(&square(10.0), 0.5, 2.0, Vec2::ZERO);
        assert_eq!(scaled[2], Vec2::new(5.0, 20.0));

        let about_center = scale(&square(2.0), 2.0, 2.0, Vec2::new(1.0, 1.0));
        assert_eq!(about_center[0], Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn test_scale_roundtrip_within_tolerance() {
        let original = vec![square(1000.0), translate(&square(37.5), Vec2::new(-12.25, 401.0))];
        let restored = scale_sets(&scale_sets(&original, 0.15), 1.0 / 0.15);
        for (set_a, set_b) in original.iter().zip(&restored) {
            for (a, b) in set_a.iter().zip(set_b) {
                assert!((a.x - b.x).abs() < 1e-2);
                assert!((a.y - b.y).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds(&[]), None);
        let (min, max) = bounds(&square(3.0)).unwrap();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_contains_concave() {
        // U shape: the notch between the arms is outside
        let u = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(0.0, 3.0),
        ];
        assert!(contains(&u, Vec2::new(0.5, 1.0)));
        assert!(contains(&u, Vec2::new(1.5, 2.5)));
        assert!(!contains(&u, Vec2::new(1.5, 1.0)));
        assert!(!contains(&u, Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn test_closest_point_on_boundary() {
        let sq = square(2.0);
        let p = closest_point_on_boundary(&sq, Vec2::new(1.0, -3.0)).unwrap();
        assert_eq!(p, Vec2::new(1.0, 0.0));

        // From inside, nearest edge wins
        let p = closest_point_on_boundary(&sq, Vec2::new(1.8, 1.0)).unwrap();
        assert!((p.x - 2.0).abs() < 1e-6);
    }
}
