//! Drag constraint policies.
//!
//! Every draggable primitive describes its current footprint as a
//! [`Constraint`]. Clamping is pure: it takes the proposed movement and the
//! container's pixel bounds and returns the movement that keeps the footprint
//! inside `[0, width] x [0, height]`. Nothing is mutated here; callers apply
//! the returned delta themselves.

#[cfg(test)]
#[path = "constraint_test.rs"]
mod constraint_test;

use crate::consts::MIN_RECT_SIZE;
use crate::geometry::{Delta, Point, Size};

/// The footprint a drag must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Box with an origin and a size; the whole box stays inside.
    Rect { origin: Point, size: Size },
    /// Zero-footprint point (a vertex or handle center).
    Point { center: Point },
    /// Expand handle of a rectangle: the delta is added to the rectangle's
    /// size. The far edge stays inside and the size stays at least one pixel.
    Resize { origin: Point, size: Size },
}

impl Constraint {
    /// Clamp `delta` against this footprint.
    #[must_use]
    pub fn clamp(&self, delta: Delta, bounds: Size) -> Delta {
        match *self {
            Self::Rect { origin, size } => Delta::new(
                clamp_span(origin.x, size.width, delta.x, bounds.width),
                clamp_span(origin.y, size.height, delta.y, bounds.height),
            ),
            Self::Point { center } => Delta::new(
                clamp_span(center.x, 0.0, delta.x, bounds.width),
                clamp_span(center.y, 0.0, delta.y, bounds.height),
            ),
            Self::Resize { origin, size } => Delta::new(
                clamp_growth(origin.x, size.width, delta.x, bounds.width),
                clamp_growth(origin.y, size.height, delta.y, bounds.height),
            ),
        }
    }
}

/// Clamp one axis of a span `[start, start + len]` moving by `delta`.
fn clamp_span(start: f64, len: f64, delta: f64, limit: f64) -> f64 {
    if start + delta < 0.0 {
        -start
    } else if start + len + delta > limit {
        limit - start - len
    } else {
        delta
    }
}

/// Clamp one axis of a size change for a span anchored at `start`.
fn clamp_growth(start: f64, len: f64, delta: f64, limit: f64) -> f64 {
    if len + delta < MIN_RECT_SIZE {
        if len > MIN_RECT_SIZE { MIN_RECT_SIZE - len } else { 0.0 }
    } else if start + len + delta > limit {
        limit - start - len
    } else {
        delta
    }
}

/// Clamp `delta` through every constraint in order.
///
/// Each step sees the delta as already clamped by the previous ones, so a
/// later constraint can only tighten the movement, never loosen it.
#[must_use]
pub fn clamp_all<I>(constraints: I, delta: Delta, bounds: Size) -> Delta
where
    I: IntoIterator<Item = Constraint>,
{
    constraints.into_iter().fold(delta, |delta, c| c.clamp(delta, bounds))
}
