#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::CLASS_HIDDEN;

const BOUNDS: Size = Size { width: 400.0, height: 300.0 };

fn handle(orientation: Orientation, x: f64, y: f64) -> Handle {
    let opts = ShapeOptions { orientation: Some(orientation), ..ShapeOptions::rect(x, y, 12.0, 12.0) };
    Handle::from_options(&opts, false).unwrap()
}

// =============================================================
// Orientation / HandleRole
// =============================================================

#[test]
fn vertical_lock_zeroes_x() {
    assert_eq!(Orientation::Vertical.lock(Delta::new(5.0, 7.0)), Delta::new(0.0, 7.0));
}

#[test]
fn horizontal_lock_zeroes_y() {
    assert_eq!(Orientation::Horizontal.lock(Delta::new(5.0, 7.0)), Delta::new(5.0, 0.0));
}

#[test]
fn handle_roles_map_to_orientation_and_slot() {
    assert_eq!(HandleRole::Top.orientation(), Orientation::Vertical);
    assert_eq!(HandleRole::Left.orientation(), Orientation::Horizontal);
    for (i, role) in HandleRole::ALL.iter().enumerate() {
        assert_eq!(role.index(), i);
    }
}

#[test]
fn shape_value_serializes_untagged() {
    let size = serde_json::to_value(ShapeValue::Size { width: 2.0, height: 3.0 }).unwrap();
    assert_eq!(size, serde_json::json!({ "width": 2.0, "height": 3.0 }));
    let points = serde_json::to_value(ShapeValue::Points(vec![1.0, 2.0])).unwrap();
    assert_eq!(points, serde_json::json!([1.0, 2.0]));
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_writes_geometry_attributes() {
    let rect = Rect::new(&ShapeOptions::rect(10.0, 20.0, 30.0, 40.0));
    let el = rect.element();
    assert_eq!(el.tag(), "rect");
    assert_eq!(el.attr("x"), Some("10"));
    assert_eq!(el.attr("y"), Some("20"));
    assert_eq!(el.attr("width"), Some("30"));
    assert_eq!(el.attr("height"), Some("40"));
}

#[test]
fn rect_missing_geometry_defaults_to_zero() {
    let rect = Rect::new(&ShapeOptions::default());
    assert_eq!(rect.origin(), Point::ZERO);
    assert_eq!(rect.size(), Size::new(0.0, 0.0));
}

#[test]
fn rect_non_finite_position_becomes_zero() {
    let mut rect = Rect::new(&ShapeOptions::rect(1.0, 1.0, 5.0, 5.0));
    rect.set_x(f64::NAN);
    rect.set_y(f64::INFINITY);
    assert_eq!(rect.origin(), Point::ZERO);
    assert_eq!(rect.element().attr("x"), Some("0"));
}

#[test]
fn rect_drag_within_clamps_to_bounds() {
    let mut rect = Rect::new(&ShapeOptions::rect(350.0, 10.0, 40.0, 20.0));
    let applied = rect.drag_within(Delta::new(50.0, -30.0), BOUNDS);
    assert_eq!(applied, Delta::new(10.0, -10.0));
    assert_eq!(rect.origin(), Point::new(360.0, 0.0));
}

#[test]
fn rect_value_absolute_and_relative() {
    let rect = Rect::new(&ShapeOptions::rect(0.0, 0.0, 100.0, 150.0));
    assert_eq!(rect.value(false, BOUNDS), ShapeValue::Size { width: 100.0, height: 150.0 });
    assert_eq!(rect.value(true, BOUNDS), ShapeValue::Size { width: 0.25, height: 0.5 });
}

#[test]
fn rect_scale_multiplies_every_field() {
    let mut rect = Rect::new(&ShapeOptions::rect(10.0, 20.0, 30.0, 40.0));
    rect.scale(2.0, 0.5);
    assert_eq!(rect.origin(), Point::new(20.0, 10.0));
    assert_eq!(rect.size(), Size::new(60.0, 20.0));
}

#[test]
fn rect_hide_uses_hidden_class() {
    let mut rect = Rect::new(&ShapeOptions::default());
    rect.hide();
    assert!(rect.element().has_class(CLASS_HIDDEN));
}

// =============================================================
// Vertex
// =============================================================

#[test]
fn vertex_center_is_box_origin_plus_half_size() {
    let v = Vertex::new(Point::new(50.0, 60.0), Size::new(12.0, 12.0), false);
    assert_eq!(v.box_origin(), Point::new(44.0, 54.0));
    assert_eq!(v.center(), Point::new(50.0, 60.0));
    assert!(v.element().has_class(CLASS_VERTEX));
    assert!(!v.element().has_class(CLASS_TOUCH_CONTROL));
}

#[test]
fn vertex_touch_mode_adds_touch_class() {
    let v = Vertex::new(Point::ZERO, Size::new(12.0, 12.0), true);
    assert!(v.element().has_class(CLASS_TOUCH_CONTROL));
}

#[test]
fn vertex_clamps_on_center_not_box() {
    let mut v = Vertex::new(Point::new(395.0, 5.0), Size::new(12.0, 12.0), false);
    let applied = v.drag_within(Delta::new(20.0, -20.0), BOUNDS);
    assert_eq!(applied, Delta::new(5.0, -5.0));
    assert_eq!(v.center(), Point::new(400.0, 0.0));
}

// =============================================================
// Handle
// =============================================================

#[test]
fn handle_requires_orientation() {
    let opts = ShapeOptions::rect(0.0, 0.0, 12.0, 12.0);
    assert!(matches!(Handle::from_options(&opts, false), Err(ShapeError::MissingOrientation)));
}

#[test]
fn handle_carries_type_class() {
    let h = handle(Orientation::Horizontal, 0.0, 0.0);
    assert!(h.element().has_class(CLASS_RECT_CONTROL));
    assert!(h.element().has_class("svg-rectangle-control_type_horizontal"));
}

#[test]
fn vertical_handle_moves_only_vertically() {
    let mut h = handle(Orientation::Vertical, 100.0, 100.0);
    h.drag_within(Delta::new(30.0, 15.0), BOUNDS);
    assert_eq!(h.origin(), Point::new(100.0, 115.0));
}

#[test]
fn horizontal_handle_moves_only_horizontally() {
    let mut h = handle(Orientation::Horizontal, 100.0, 100.0);
    h.drag_within(Delta::new(30.0, 15.0), BOUNDS);
    assert_eq!(h.origin(), Point::new(130.0, 100.0));
}

#[test]
fn handle_center_stays_inside_bounds() {
    // Center at (6, 106); dragging far up stops at y = 0.
    let mut h = handle(Orientation::Vertical, 0.0, 100.0);
    h.drag_within(Delta::new(0.0, -500.0), BOUNDS);
    assert_eq!(h.center().y, 0.0);
    assert_eq!(h.origin().y, -6.0);
}
