#![allow(clippy::float_cmp)]

use super::*;
use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::shape::HandleRole;

fn container() -> Container {
    let mut c = Container::new();
    c.observe_size(Size::new(200.0, 100.0));
    c
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::Rect(Rect::new(&ShapeOptions::rect(x, y, w, h)))
}

fn resizable(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::ResizableRect(ResizableRect::new(&ShapeOptions::rect(x, y, w, h), &EditorConfig::default()).unwrap())
}

fn bordered(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::BorderedRect(BorderedRect::new(&ShapeOptions::rect(x, y, w, h), &EditorConfig::default()).unwrap())
}

fn square_polygon() -> Shape {
    let mut p = Polygon::new(&ShapeOptions::default(), &EditorConfig::default());
    p.set_points(&[10.0, 10.0, 50.0, 10.0, 50.0, 50.0, 10.0, 50.0]);
    Shape::Polygon(p)
}

fn ids(c: &Container) -> Vec<ElementId> {
    c.instances(None).map(Shape::id).collect()
}

// =============================================================
// Construction and membership
// =============================================================

#[test]
fn new_container_is_fluid_svg() {
    let c = Container::new();
    assert_eq!(c.element().tag(), "svg");
    assert!(c.element().has_class(CLASS_CONTAINER));
    assert!(!c.element().is_draggable());
    assert_eq!(c.bounds(), Size::default());
}

#[test]
fn append_get_remove() {
    let mut c = container();
    let id = c.append(rect(0.0, 0.0, 10.0, 10.0));
    assert!(c.get(id).is_some());
    assert!(c.remove(id).is_some());
    assert!(c.get(id).is_none());
    assert!(c.remove(id).is_none());
}

#[test]
fn instances_filter_by_kind() {
    let mut c = container();
    c.append(rect(0.0, 0.0, 10.0, 10.0));
    c.append(square_polygon());
    c.append(square_polygon());
    assert_eq!(c.instances(None).count(), 3);
    assert_eq!(c.instances(Some(ShapeKind::Polygon)).count(), 2);
    assert_eq!(c.instances(Some(ShapeKind::BorderedRect)).count(), 0);
}

#[test]
fn shape_kind_parses_api_names() {
    assert_eq!("resizableRect".parse::<ShapeKind>().unwrap(), ShapeKind::ResizableRect);
    assert_eq!("polygon".parse::<ShapeKind>().unwrap(), ShapeKind::Polygon);
    assert!(matches!("circle".parse::<ShapeKind>(), Err(ShapeError::UnknownKind(name)) if name == "circle"));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn single_active_invariant() {
    let mut c = container();
    let a = c.append(square_polygon());
    let b = c.append(square_polygon());
    assert!(c.set_active_element(a));
    assert!(c.set_active_element(b));
    assert_eq!(c.active_element(), Some(b));
    assert!(!c.get(a).unwrap().as_styled().is_active());
    assert!(c.get(b).unwrap().as_styled().is_active());
    let active_count = c.instances(None).filter(|s| s.as_styled().is_active()).count();
    assert_eq!(active_count, 1);
}

#[test]
fn selecting_active_element_again_changes_nothing() {
    let mut c = container();
    let a = c.append(square_polygon());
    assert!(c.set_active_element(a));
    assert!(!c.set_active_element(a));
    assert!(!c.set_active_element(uuid::Uuid::new_v4()));
    assert_eq!(c.active_element(), Some(a));
}

#[test]
fn activation_brings_composite_to_front() {
    let mut c = container();
    let a = c.append(resizable(10.0, 10.0, 20.0, 20.0));
    let b = c.append(rect(0.0, 0.0, 5.0, 5.0));
    c.set_active_element(a);
    assert_eq!(ids(&c), vec![b, a]);
}

#[test]
fn plain_rect_activation_keeps_order() {
    let mut c = container();
    let a = c.append(rect(0.0, 0.0, 5.0, 5.0));
    let b = c.append(rect(0.0, 0.0, 5.0, 5.0));
    c.set_active_element(a);
    assert_eq!(ids(&c), vec![a, b]);
}

#[test]
fn deactivate_active_element_clears() {
    let mut c = container();
    let a = c.append(square_polygon());
    c.set_active_element(a);
    c.deactivate_active_element();
    assert_eq!(c.active_element(), None);
    assert!(!c.get(a).unwrap().as_styled().is_active());
}

// =============================================================
// Removal and visibility
// =============================================================

#[test]
fn remove_active_instance_respects_kind() {
    let mut c = container();
    let a = c.append(square_polygon());
    c.set_active_element(a);
    assert!(c.remove_active_instance(Some(ShapeKind::ResizableRect)).is_none());
    let removed = c.remove_active_instance(Some(ShapeKind::Polygon)).unwrap();
    assert!(!removed.as_styled().is_active());
    assert_eq!(c.active_element(), None);
    assert!(c.remove_active_instance(None).is_none());
}

#[test]
fn remove_all_instances_by_kind() {
    let mut c = container();
    c.append(rect(0.0, 0.0, 5.0, 5.0));
    let p = c.append(square_polygon());
    c.append(square_polygon());
    c.set_active_element(p);
    assert_eq!(c.remove_all_instances(Some(ShapeKind::Polygon)), 2);
    assert_eq!(c.active_element(), None);
    assert_eq!(c.instances(None).count(), 1);
    assert_eq!(c.remove_all_instances(None), 1);
    assert_eq!(c.instances(None).count(), 0);
}

#[test]
fn toggle_hide_deactivates_and_show_restores() {
    let mut c = container();
    let p = c.append(square_polygon());
    let r = c.append(rect(0.0, 0.0, 5.0, 5.0));
    c.set_active_element(p);
    c.toggle_all_instances(false, Some(ShapeKind::Polygon));
    assert_eq!(c.active_element(), None);
    assert!(c.get(p).unwrap().as_styled().is_hidden());
    assert!(!c.get(r).unwrap().as_styled().is_hidden());
    c.toggle_all_instances(true, None);
    assert!(!c.get(p).unwrap().as_styled().is_hidden());
}

// =============================================================
// Resize fan-out
// =============================================================

#[test]
fn first_observation_only_stores_baseline() {
    let mut c = Container::new();
    assert!(!c.observe_size(Size::new(200.0, 100.0)));
    assert_eq!(c.bounds(), Size::new(200.0, 100.0));
}

#[test]
fn unchanged_size_does_nothing() {
    let mut c = container();
    assert!(!c.observe_size(Size::new(200.0, 100.0)));
}

#[test]
fn doubling_width_doubles_x_and_width() {
    let mut c = container();
    let id = c.append(bordered(20.0, 30.0, 40.0, 50.0));
    assert!(c.observe_size(Size::new(400.0, 100.0)));
    let Some(Shape::BorderedRect(b)) = c.get(id) else {
        panic!("expected bordered rect");
    };
    assert_eq!(b.rect().origin(), Point::new(40.0, 30.0));
    assert_eq!(b.rect().size(), Size::new(80.0, 50.0));
    assert_eq!(c.bounds(), Size::new(400.0, 100.0));
}

#[test]
fn plain_rect_is_not_resized() {
    let mut c = container();
    let id = c.append(rect(20.0, 30.0, 40.0, 50.0));
    c.observe_size(Size::new(400.0, 200.0));
    let Some(Shape::Rect(r)) = c.get(id) else {
        panic!("expected rect");
    };
    assert_eq!(r.origin(), Point::new(20.0, 30.0));
    assert_eq!(r.size(), Size::new(40.0, 50.0));
}

#[test]
fn polygon_points_scale_with_container() {
    let mut c = container();
    let id = c.append(square_polygon());
    c.observe_size(Size::new(400.0, 50.0));
    let p = c.get(id).unwrap().as_polygon().unwrap();
    assert_eq!(p.points(), vec![20.0, 5.0, 100.0, 5.0, 100.0, 25.0, 20.0, 25.0]);
}

#[test]
fn zero_baseline_is_replaced_without_rescale() {
    let mut c = Container::new();
    c.observe_size(Size::new(0.0, 0.0));
    let id = c.append(bordered(20.0, 30.0, 40.0, 50.0));
    assert!(!c.observe_size(Size::new(400.0, 100.0)));
    assert_eq!(c.value_of(id, false), Some(ShapeValue::Size { width: 40.0, height: 50.0 }));
}

#[test]
fn hidden_container_round_trip_keeps_geometry() {
    let mut c = container();
    let id = c.append(bordered(20.0, 30.0, 40.0, 50.0));
    assert!(!c.observe_size(Size::new(0.0, 0.0)));
    assert_eq!(c.bounds(), Size::new(200.0, 100.0));
    assert!(!c.observe_size(Size::new(200.0, 100.0)));
    let Some(Shape::BorderedRect(b)) = c.get(id) else {
        panic!("expected bordered rect");
    };
    assert_eq!(b.rect().origin(), Point::new(20.0, 30.0));
    assert_eq!(b.rect().size(), Size::new(40.0, 50.0));
}

#[test]
fn collapsed_axis_is_ignored() {
    let mut c = container();
    let id = c.append(bordered(20.0, 30.0, 40.0, 50.0));
    assert!(!c.observe_size(Size::new(400.0, 0.0)));
    assert!(c.observe_size(Size::new(400.0, 100.0)));
    assert_eq!(c.value_of(id, false), Some(ShapeValue::Size { width: 80.0, height: 50.0 }));
}

// =============================================================
// Drag routing
// =============================================================

#[test]
fn drag_body_is_clamped_to_bounds() {
    let mut c = container();
    let id = c.append(rect(150.0, 10.0, 40.0, 20.0));
    let applied = c.drag(DragTarget { shape: id, part: Part::Body }, Delta::new(50.0, 0.0));
    assert_eq!(applied, Some(Delta::new(10.0, 0.0)));
}

#[test]
fn drag_handle_routes_to_resizable() {
    let mut c = container();
    let id = c.append(resizable(50.0, 20.0, 60.0, 40.0));
    let target = DragTarget { shape: id, part: Part::Handle(HandleRole::Bottom) };
    c.drag(target, Delta::new(0.0, 10.0)).unwrap();
    assert_eq!(c.value_of(id, false), Some(ShapeValue::Size { width: 60.0, height: 50.0 }));
}

#[test]
fn border_is_not_a_drag_target() {
    let mut c = container();
    let id = c.append(bordered(20.0, 20.0, 40.0, 40.0));
    let target = DragTarget { shape: id, part: Part::Border };
    assert!(!c.is_draggable(target));
    assert!(c.drag(target, Delta::new(5.0, 5.0)).is_none());
}

#[test]
fn non_draggable_shape_does_not_move() {
    let mut c = container();
    let opts = ShapeOptions { is_draggable: false, ..ShapeOptions::rect(10.0, 10.0, 10.0, 10.0) };
    let id = c.append(Shape::Rect(Rect::new(&opts)));
    assert!(c.drag(DragTarget { shape: id, part: Part::Body }, Delta::new(5.0, 5.0)).is_none());
}

#[test]
fn mismatched_part_is_ignored() {
    let mut c = container();
    let id = c.append(rect(10.0, 10.0, 10.0, 10.0));
    let target = DragTarget { shape: id, part: Part::Handle(HandleRole::Top) };
    assert!(c.drag(target, Delta::new(5.0, 5.0)).is_none());
}

// =============================================================
// Simplicity and values
// =============================================================

#[test]
fn check_simple_highlights_complex_polygon() {
    let mut c = container();
    let mut p = Polygon::new(&ShapeOptions::default(), &EditorConfig::default());
    p.set_points(&[0.0, 0.0, 50.0, 50.0, 50.0, 0.0, 0.0, 50.0]);
    let id = c.append(Shape::Polygon(p));
    assert_eq!(c.check_simple(id, false), Some(false));
    assert_eq!(c.active_element(), None);
    assert_eq!(c.check_simple(id, true), Some(false));
    assert_eq!(c.active_element(), Some(id));
}

#[test]
fn check_simple_on_non_polygon_is_none() {
    let mut c = container();
    let id = c.append(rect(0.0, 0.0, 5.0, 5.0));
    assert_eq!(c.check_simple(id, true), None);
}

#[test]
fn value_of_relative_uses_bounds() {
    let mut c = container();
    let id = c.append(rect(0.0, 0.0, 50.0, 25.0));
    assert_eq!(c.value_of(id, true), Some(ShapeValue::Size { width: 0.25, height: 0.25 }));
}

#[test]
fn layers_follow_draw_order() {
    let mut c = container();
    let a = c.append(rect(0.0, 0.0, 5.0, 5.0));
    let b = c.append(square_polygon());
    let shapes: Vec<ElementId> = c.layers().map(|l| l.target.shape).collect();
    assert_eq!(shapes[0], a);
    assert_eq!(shapes.len(), 6);
    assert!(shapes[1..].iter().all(|s| *s == b));
}
