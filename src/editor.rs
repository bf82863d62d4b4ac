//! Editor core: routes pointer input to the container and reports what the
//! host must do next.
//!
//! `EditorCore` holds no browser state. Every input method returns a list of
//! [`Action`]s; the browser binding in [`crate::dom`] turns them into body
//! class changes, window listener attach/detach and frame requests.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::collections::HashMap;

use log::debug;

use crate::bordered::BorderedRect;
use crate::config::EditorConfig;
use crate::container::{Container, Shape, ShapeKind};
use crate::element::{ElementId, ShapeOptions};
use crate::error::ShapeError;
use crate::geometry::{Point, Size};
use crate::gesture::{Button, DoubleTap, GestureTracker, PointerSample};
use crate::polygon::Polygon;
use crate::resizable::ResizableRect;
use crate::shape::{DragTarget, Part, Rect, ShapeValue};

/// Side effects requested by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Element state changed; sync nodes on the next frame.
    RenderNeeded,
    /// Add or remove the body's "unselectable" class.
    SetUnselectable(bool),
    /// A drag started: listen for move/up/cancel on the window.
    CaptureStarted,
    /// The drag ended: stop listening on the window.
    CaptureEnded,
    /// Stop the triggering event from bubbling further.
    StopPropagation,
    /// Suppress the event's default, e.g. page scroll during a touch drag.
    PreventDefault,
    /// The active element changed.
    SelectionChanged(Option<ElementId>),
}

/// Browser-independent editor state.
pub struct EditorCore {
    pub container: Container,
    pub config: EditorConfig,
    gesture: GestureTracker,
    container_tap: DoubleTap,
    vertex_taps: HashMap<ElementId, DoubleTap>,
}

impl EditorCore {
    /// A new editor over a container of the given pixel size.
    #[must_use]
    pub fn new(config: EditorConfig, size: Size) -> Self {
        let mut container = Container::new();
        container.observe_size(size);
        Self {
            container,
            container_tap: DoubleTap::new(config.double_tap_ms),
            config,
            gesture: GestureTracker::new(),
            vertex_taps: HashMap::new(),
        }
    }

    // --- Shapes ---

    pub fn add_rect(&mut self, options: &ShapeOptions) -> ElementId {
        self.container.append(Shape::Rect(Rect::new(options)))
    }

    pub fn add_polygon(&mut self, options: &ShapeOptions) -> ElementId {
        self.container.append(Shape::Polygon(Polygon::new(options, &self.config)))
    }

    /// # Errors
    ///
    /// `MissingProperty` unless the options carry a full box.
    pub fn add_resizable_rect(&mut self, options: &ShapeOptions) -> Result<ElementId, ShapeError> {
        let shape = ResizableRect::new(options, &self.config)?;
        Ok(self.container.append(Shape::ResizableRect(shape)))
    }

    /// # Errors
    ///
    /// `MissingProperty` unless the options carry a full box.
    pub fn add_bordered_rect(&mut self, options: &ShapeOptions) -> Result<ElementId, ShapeError> {
        let shape = BorderedRect::new(options, &self.config)?;
        Ok(self.container.append(Shape::BorderedRect(shape)))
    }

    /// Replace a polygon's vertices. `false` for unknown ids or odd input.
    pub fn set_polygon_points(&mut self, id: ElementId, points: &[f64]) -> bool {
        let replaced = self
            .container
            .get_mut(id)
            .and_then(Shape::as_polygon_mut)
            .is_some_and(|p| p.set_points(points));
        if replaced {
            self.prune_vertex_taps();
        }
        replaced
    }

    pub fn select(&mut self, id: ElementId) -> Vec<Action> {
        if self.container.set_active_element(id) {
            vec![Action::SelectionChanged(Some(id)), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        if self.container.active_element().is_none() {
            return Vec::new();
        }
        self.container.deactivate_active_element();
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    pub fn remove_active(&mut self, kind: Option<ShapeKind>) -> Vec<Action> {
        if self.container.remove_active_instance(kind).is_none() {
            return Vec::new();
        }
        self.prune_vertex_taps();
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    pub fn remove_all(&mut self, kind: Option<ShapeKind>) -> Vec<Action> {
        let had_active = self.container.active_element().is_some();
        if self.container.remove_all_instances(kind) == 0 {
            return Vec::new();
        }
        self.prune_vertex_taps();
        let mut actions = Vec::new();
        if had_active && self.container.active_element().is_none() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn toggle_all(&mut self, visible: bool, kind: Option<ShapeKind>) -> Vec<Action> {
        let had_active = self.container.active_element().is_some();
        self.container.toggle_all_instances(visible, kind);
        let mut actions = Vec::new();
        if had_active && self.container.active_element().is_none() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Whether polygon `id` is simple; see [`Container::check_simple`].
    pub fn check_simple(&mut self, id: ElementId, highlight: bool) -> Option<bool> {
        self.container.check_simple(id, highlight)
    }

    #[must_use]
    pub fn value_of(&self, id: ElementId, relative: bool) -> Option<ShapeValue> {
        self.container.value_of(id, relative)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    // --- Input ---

    /// Pointer pressed on `target` (or on empty container space).
    ///
    /// Composite shapes are selected whichever of their parts was hit. A
    /// draggable part then starts a drag gesture.
    pub fn on_pointer_down(&mut self, target: Option<DragTarget>, sample: PointerSample) -> Vec<Action> {
        let Some(target) = target else {
            return Vec::new();
        };
        if sample.button == Button::Secondary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.container.get(target.shape).is_some_and(Shape::raises_on_activate) {
            actions.extend(self.select(target.shape));
        }
        if self.container.is_draggable(target) && self.gesture.begin(target, sample) {
            actions.push(Action::SetUnselectable(true));
            actions.push(Action::CaptureStarted);
        }
        actions
    }

    /// Pointer moved. In touch mode a move that belongs to a drag also asks
    /// the host to cancel the event's default scrolling.
    pub fn on_pointer_move(&mut self, sample: PointerSample) -> Vec<Action> {
        let Some((target, delta)) = self.gesture.track(sample) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.config.touch {
            actions.push(Action::PreventDefault);
        }
        if self.container.drag(target, delta).is_some() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Pointer released or the gesture was cancelled.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match self.gesture.end() {
            Some(_) => vec![Action::SetUnselectable(false), Action::CaptureEnded],
            None => Vec::new(),
        }
    }

    /// The container element was measured at `size`.
    pub fn on_viewport_resize(&mut self, size: Size) -> Vec<Action> {
        if self.container.observe_size(size) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Native double click at container-relative `point`.
    ///
    /// On a vertex it removes the vertex. Anywhere else it adds a point to
    /// the active polygon.
    pub fn on_double_click(&mut self, target: Option<DragTarget>, point: Point) -> Vec<Action> {
        if let Some(DragTarget { shape, part: Part::Vertex(vertex) }) = target {
            let mut actions = vec![Action::StopPropagation];
            if self.remove_vertex(shape, vertex) {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }
        self.add_point_to_active(point)
    }

    /// Touch start at container-relative `point`, `now_ms` from the page
    /// clock. Emulates double click with per-element double-tap windows.
    pub fn on_tap(&mut self, target: Option<DragTarget>, point: Point, now_ms: f64) -> Vec<Action> {
        if let Some(DragTarget { shape, part: Part::Vertex(vertex) }) = target {
            let window = self.config.double_tap_ms;
            let tap = self.vertex_taps.entry(vertex).or_insert_with(|| DoubleTap::new(window));
            if tap.tap(now_ms) {
                let mut actions = vec![Action::StopPropagation];
                if self.remove_vertex(shape, vertex) {
                    actions.push(Action::RenderNeeded);
                }
                return actions;
            }
        }
        if self.container_tap.tap(now_ms) {
            let mut actions = vec![Action::StopPropagation];
            actions.extend(self.add_point_to_active(point));
            return actions;
        }
        Vec::new()
    }

    fn remove_vertex(&mut self, shape: ElementId, vertex: ElementId) -> bool {
        let removed = self
            .container
            .get_mut(shape)
            .and_then(Shape::as_polygon_mut)
            .is_some_and(|p| p.remove_vertex(vertex));
        if removed {
            self.vertex_taps.remove(&vertex);
        }
        removed
    }

    /// Forget double-tap state for vertices that no longer exist.
    fn prune_vertex_taps(&mut self) {
        let container = &self.container;
        self.vertex_taps.retain(|vertex, _| {
            container
                .instances(Some(ShapeKind::Polygon))
                .filter_map(Shape::as_polygon)
                .any(|p| p.vertex(*vertex).is_some())
        });
    }

    fn add_point_to_active(&mut self, point: Point) -> Vec<Action> {
        let Some(active) = self.container.active_element() else {
            return Vec::new();
        };
        let added = self
            .container
            .get_mut(active)
            .and_then(Shape::as_polygon_mut)
            .and_then(|p| p.add_point(point));
        match added {
            Some(vertex) => {
                debug!("editor: added vertex {vertex} to polygon {active}");
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }
}
