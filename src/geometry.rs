//! Plane geometry for the editor.
//!
//! Coordinates are container-relative pixels with the y axis pointing down.
//! Polygons travel through this module as flat `[x0, y0, x1, y1, ...]` lists,
//! the same shape that `Polygon::points` returns and `Polygon::set_points`
//! accepts. A polygon is always implicitly closed.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

/// A point in container space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A relative movement. Shares the point layout.
pub type Delta = Point;

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point moved by `delta`.
    #[must_use]
    pub fn offset(self, delta: Delta) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y }
    }

    /// Vector from `origin` to this point.
    #[must_use]
    pub fn delta_from(self, origin: Point) -> Delta {
        Self { x: self.x - origin.x, y: self.y - origin.y }
    }

    /// Scale each axis independently.
    #[must_use]
    pub fn scale(self, width_factor: f64, height_factor: f64) -> Self {
        Self { x: self.x * width_factor, y: self.y * height_factor }
    }
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn half(self) -> Self {
        Self { width: self.width / 2.0, height: self.height / 2.0 }
    }
}

/// An ordered pair of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Middle point of a segment.
#[must_use]
pub fn midpoint(segment: LineSegment) -> Point {
    let LineSegment { start, end } = segment;
    Point::new(start.x + (end.x - start.x) / 2.0, start.y + (end.y - start.y) / 2.0)
}

/// Strict counter-clockwise test for three points. Collinear triples are not CCW.
fn ccw(p1: Point, p2: Point, p3: Point) -> bool {
    (p3.y - p1.y) * (p2.x - p1.x) > (p2.y - p1.y) * (p3.x - p1.x)
}

/// Whether two segments cross.
///
/// Each segment's endpoints must straddle the other's supporting line.
/// Collinear and overlapping segments report `false`: no orientation triple
/// is strictly counter-clockwise, so neither straddle test can pass.
#[must_use]
pub fn segments_intersect(a: LineSegment, b: LineSegment) -> bool {
    ccw(a.start, b.start, b.end) != ccw(a.end, b.start, b.end)
        && ccw(a.start, a.end, b.start) != ccw(a.start, a.end, b.end)
}

/// Pair up a flat coordinate list. A trailing odd value is ignored.
#[must_use]
pub fn points_from_flat(points: &[f64]) -> Vec<Point> {
    points.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1])).collect()
}

/// Inverse of [`points_from_flat`].
#[must_use]
pub fn flatten_points(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Edges of the closed polygon described by `points`.
///
/// Edge `i` runs from vertex `i` to vertex `i + 1`; the last edge closes the
/// ring back to vertex 0. An N-vertex polygon yields N edges.
#[must_use]
pub fn generate_segments(points: &[f64]) -> Vec<LineSegment> {
    let vertices = points_from_flat(points);
    let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) else {
        return Vec::new();
    };
    let mut segments: Vec<LineSegment> =
        vertices.windows(2).map(|pair| LineSegment::new(pair[0], pair[1])).collect();
    segments.push(LineSegment::new(last, first));
    segments
}

/// Position at which `point` should be spliced into `points` (in vertices).
///
/// Picks the edge whose midpoint is nearest and returns the index right after
/// its first vertex. The first edge with a strictly smaller distance wins.
/// Returns `None` for an empty polygon.
#[must_use]
pub fn find_insert_index(points: &[f64], point: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, segment) in generate_segments(points).into_iter().enumerate() {
        let dist = distance(midpoint(segment), point);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            best = Some((index + 1, dist));
        }
    }
    best.map(|(index, _)| index)
}

/// Whether the closed polygon has no crossing non-adjacent edges.
///
/// Adjacent edges (including the closing edge and edge 0) share a vertex and
/// are never compared. Stops at the first crossing pair.
#[must_use]
pub fn is_simple_polygon(points: &[f64]) -> bool {
    let segments = generate_segments(points);
    let count = segments.len();
    for i in 0..count.saturating_sub(2) {
        let end = if i > 0 { count } else { count - 1 };
        for j in (i + 2)..end {
            if segments_intersect(segments[i], segments[j]) {
                return false;
            }
        }
    }
    true
}
