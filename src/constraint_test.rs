#![allow(clippy::float_cmp)]

use super::*;

fn bounds() -> Size {
    Size::new(200.0, 100.0)
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Constraint {
    Constraint::Rect { origin: Point::new(x, y), size: Size::new(w, h) }
}

fn point(x: f64, y: f64) -> Constraint {
    Constraint::Point { center: Point::new(x, y) }
}

fn resize(x: f64, y: f64, w: f64, h: f64) -> Constraint {
    Constraint::Resize { origin: Point::new(x, y), size: Size::new(w, h) }
}

fn d(x: f64, y: f64) -> Delta {
    Delta::new(x, y)
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_inside_move_is_unchanged() {
    assert_eq!(rect(10.0, 10.0, 20.0, 20.0).clamp(d(5.0, -5.0), bounds()), d(5.0, -5.0));
}

#[test]
fn rect_clamps_left_and_top() {
    assert_eq!(rect(10.0, 4.0, 20.0, 20.0).clamp(d(-30.0, -9.0), bounds()), d(-10.0, -4.0));
}

#[test]
fn rect_clamps_right_and_bottom_by_far_edge() {
    assert_eq!(rect(150.0, 60.0, 40.0, 30.0).clamp(d(50.0, 50.0), bounds()), d(10.0, 10.0));
}

#[test]
fn rect_axes_are_independent() {
    assert_eq!(rect(0.0, 10.0, 20.0, 20.0).clamp(d(-5.0, 7.0), bounds()), d(0.0, 7.0));
}

#[test]
fn rect_at_boundary_pushed_outward_gets_zero() {
    assert_eq!(rect(0.0, 0.0, 20.0, 20.0).clamp(d(-3.0, -3.0), bounds()), d(0.0, 0.0));
    assert_eq!(rect(180.0, 80.0, 20.0, 20.0).clamp(d(3.0, 3.0), bounds()), d(0.0, 0.0));
}

// =============================================================
// Point
// =============================================================

#[test]
fn point_may_reach_the_edge_exactly() {
    assert_eq!(point(190.0, 95.0).clamp(d(20.0, 20.0), bounds()), d(10.0, 5.0));
}

#[test]
fn point_clamps_at_origin() {
    assert_eq!(point(3.0, 2.0).clamp(d(-10.0, -10.0), bounds()), d(-3.0, -2.0));
}

#[test]
fn point_at_boundary_pushed_outward_gets_zero() {
    assert_eq!(point(200.0, 0.0).clamp(d(1.0, -1.0), bounds()), d(0.0, 0.0));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_grow_is_limited_by_container_edge() {
    assert_eq!(resize(100.0, 50.0, 50.0, 30.0).clamp(d(100.0, 100.0), bounds()), d(50.0, 20.0));
}

#[test]
fn resize_shrink_keeps_one_pixel() {
    assert_eq!(resize(10.0, 10.0, 50.0, 30.0).clamp(d(-80.0, -80.0), bounds()), d(-49.0, -29.0));
}

#[test]
fn resize_already_minimal_cannot_shrink() {
    assert_eq!(resize(10.0, 10.0, 1.0, 0.5).clamp(d(-5.0, -5.0), bounds()), d(0.0, 0.0));
}

#[test]
fn resize_allows_free_change_inside() {
    assert_eq!(resize(10.0, 10.0, 50.0, 30.0).clamp(d(-10.0, 15.0), bounds()), d(-10.0, 15.0));
}

// =============================================================
// clamp_all
// =============================================================

#[test]
fn clamp_all_takes_the_tightest_constraint() {
    let vertices = [point(10.0, 50.0), point(4.0, 60.0), point(30.0, 20.0)];
    assert_eq!(clamp_all(vertices, d(-20.0, 0.0), bounds()), d(-4.0, 0.0));
}

#[test]
fn clamp_all_later_constraints_never_loosen() {
    // First vertex tightens to -2; the second alone would allow -8.
    let vertices = [point(2.0, 50.0), point(8.0, 50.0)];
    assert_eq!(clamp_all(vertices, d(-10.0, 0.0), bounds()), d(-2.0, 0.0));
}

#[test]
fn clamp_all_empty_is_identity() {
    assert_eq!(clamp_all(Vec::new(), d(-10.0, 3.0), bounds()), d(-10.0, 3.0));
}

#[test]
fn clamped_rect_never_leaves_bounds() {
    let deltas = [-500.0, -37.5, -1.0, 0.0, 0.25, 12.0, 999.0];
    let b = bounds();
    for &dx in &deltas {
        for &dy in &deltas {
            let (x, y, w, h) = (30.0, 40.0, 50.0, 20.0);
            let c = rect(x, y, w, h).clamp(d(dx, dy), b);
            assert!(x + c.x >= 0.0 && x + c.x + w <= b.width, "dx {dx}");
            assert!(y + c.y >= 0.0 && y + c.y + h <= b.height, "dy {dy}");
        }
    }
}
