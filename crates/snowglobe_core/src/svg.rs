//! SVG path sampling
//!
//! Turns `<path d="...">` outlines into vertex sets. The path is walked by
//! arc length: curved segments are sampled every `sample_length` units,
//! and every segment contributes its end point. Close commands contribute
//! nothing, and a point equal to the previous one is dropped.

use std::fmt;

use snowglobe_math::{Vec2, VertexSet};
use svgtypes::{SimplePathSegment, SimplifyingPathParser};

/// Arc-length distance between samples on curved segments
pub const DEFAULT_SAMPLE_LENGTH: f32 = 15.0;

/// Polyline resolution used to measure curves
const CURVE_STEPS: usize = 32;

/// Error converting SVG markup to vertex sets
#[derive(Debug)]
pub enum SvgError {
    /// The document is not well-formed XML
    Xml(roxmltree::Error),
    /// A `d` attribute could not be parsed
    PathData(String),
}

impl fmt::Display for SvgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgError::Xml(err) => write!(f, "SVG XML error: {}", err),
            SvgError::PathData(msg) => write!(f, "SVG path data error: {}", msg),
        }
    }
}

impl std::error::Error for SvgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgError::Xml(err) => Some(err),
            SvgError::PathData(_) => None,
        }
    }
}

impl From<roxmltree::Error> for SvgError {
    fn from(err: roxmltree::Error) -> Self {
        SvgError::Xml(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SegmentKind {
    Move,
    Line,
    Curve,
    Close,
}

/// One path command, flattened to a polyline with cumulative lengths
struct Segment {
    kind: SegmentKind,
    points: Vec<Vec2>,
    lengths: Vec<f32>,
}

impl Segment {
    fn new(kind: SegmentKind, points: Vec<Vec2>) -> Self {
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                total += point.distance(points[i - 1]);
            }
            lengths.push(total);
        }
        Self {
            kind,
            points,
            lengths,
        }
    }

    fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point emitted when the walk leaves this segment
    fn end_point(&self) -> Option<Vec2> {
        match self.kind {
            SegmentKind::Close => None,
            _ => self.points.last().copied(),
        }
    }

    /// Point at `distance` along this segment
    fn point_at(&self, distance: f32) -> Vec2 {
        let i = self.lengths.partition_point(|&l| l < distance);
        if i == 0 {
            return self.points[0];
        }
        if i >= self.points.len() {
            return self.points[self.points.len() - 1];
        }
        let (l0, l1) = (self.lengths[i - 1], self.lengths[i]);
        let t = if l1 > l0 { (distance - l0) / (l1 - l0) } else { 0.0 };
        self.points[i - 1].lerp(self.points[i], t)
    }
}

fn quadratic(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

fn flatten(curve: impl Fn(f32) -> Vec2) -> Vec<Vec2> {
    (0..=CURVE_STEPS)
        .map(|i| curve(i as f32 / CURVE_STEPS as f32))
        .collect()
}

/// Parse path data into absolute segments
fn segments(data: &str) -> Result<Vec<Segment>, SvgError> {
    let mut segments = Vec::new();
    let mut current = Vec2::ZERO;
    let mut subpath_start = Vec2::ZERO;

    for segment in SimplifyingPathParser::from(data) {
        let segment = segment.map_err(|err| SvgError::PathData(err.to_string()))?;
        let next = match segment {
            SimplePathSegment::MoveTo { x, y } => {
                let to = Vec2::new(x as f32, y as f32);
                subpath_start = to;
                Segment::new(SegmentKind::Move, vec![to])
            }
            SimplePathSegment::LineTo { x, y } => {
                let to = Vec2::new(x as f32, y as f32);
                Segment::new(SegmentKind::Line, vec![current, to])
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                let from = current;
                let ctrl = Vec2::new(x1 as f32, y1 as f32);
                let to = Vec2::new(x as f32, y as f32);
                Segment::new(
                    SegmentKind::Curve,
                    flatten(|t| quadratic(from, ctrl, to, t)),
                )
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let from = current;
                let c1 = Vec2::new(x1 as f32, y1 as f32);
                let c2 = Vec2::new(x2 as f32, y2 as f32);
                let to = Vec2::new(x as f32, y as f32);
                Segment::new(
                    SegmentKind::Curve,
                    flatten(|t| cubic(from, c1, c2, to, t)),
                )
            }
            SimplePathSegment::ClosePath => {
                Segment::new(SegmentKind::Close, vec![current, subpath_start])
            }
        };

        current = next.points.last().copied().unwrap_or(current);
        segments.push(next);
    }

    Ok(segments)
}

/// Append a sample unless it repeats the previous point or returns to the first
///
/// The outline is closed implicitly, so an explicit return to the start
/// would only add a zero-length edge.
fn push_point(points: &mut VertexSet, point: Vec2) {
    if points.last() != Some(&point) && points.first() != Some(&point) {
        points.push(point);
    }
}

/// Sample one path's `d` attribute into a vertex set
pub fn sample_path(data: &str, sample_length: f32) -> Result<VertexSet, SvgError> {
    if sample_length.is_nan() || sample_length <= 0.0 {
        return Err(SvgError::PathData(format!(
            "sample length must be positive, got {}",
            sample_length
        )));
    }

    let segments = segments(data)?;
    let starts: Vec<f32> = segments
        .iter()
        .scan(0.0, |acc, segment| {
            let start = *acc;
            *acc += segment.length();
            Some(start)
        })
        .collect();
    let total: f32 = segments.iter().map(Segment::length).sum();

    let mut points = VertexSet::new();
    let mut flushed = 0;
    let mut step = 0usize;

    loop {
        let distance = step as f32 * sample_length;
        if distance >= total {
            break;
        }
        step += 1;

        // The segment whose span [start, start + length) holds this sample
        let Some(index) = (0..segments.len())
            .find(|&i| distance < starts[i] + segments[i].length())
        else {
            break;
        };

        while flushed < index {
            if let Some(end) = segments[flushed].end_point() {
                push_point(&mut points, end);
            }
            flushed += 1;
        }

        let segment = &segments[index];
        if segment.kind == SegmentKind::Curve {
            push_point(&mut points, segment.point_at(distance - starts[index]));
        }
    }

    for segment in &segments[flushed..] {
        if let Some(end) = segment.end_point() {
            push_point(&mut points, end);
        }
    }

    Ok(points)
}

/// Convert every `<path>` of an SVG document, in document order
pub fn vertex_sets_from_svg(svg: &str, sample_length: f32) -> Result<Vec<VertexSet>, SvgError> {
    let document = roxmltree::Document::parse(svg)?;

    document
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "path")
        .map(|node| sample_path(node.attribute("d").unwrap_or(""), sample_length))
        .collect()
}
