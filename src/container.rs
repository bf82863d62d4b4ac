//! Top-level shape store.
//!
//! The container owns every shape drawn inside one `<svg>` element. It keeps
//! the single-active-element invariant, decides draw order, routes drags to
//! the right shape part, and rescales all resizable shapes when the element
//! changes pixel size.

#[cfg(test)]
#[path = "container_test.rs"]
mod container_test;

use std::str::FromStr;

use log::debug;

use crate::bordered::BorderedRect;
use crate::consts::CLASS_CONTAINER;
use crate::element::{Element, ElementId, ShapeOptions, Styled};
use crate::error::ShapeError;
use crate::geometry::{Delta, Size};
use crate::polygon::Polygon;
use crate::resizable::ResizableRect;
use crate::shape::{DragTarget, Draggable, Layer, Part, Rect, Resizable, ShapeValue};

/// Discriminant used to filter instances by shape type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Polygon,
    ResizableRect,
    BorderedRect,
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    /// Accepts the camelCase names used by the JavaScript API.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "rect" => Ok(Self::Rect),
            "polygon" => Ok(Self::Polygon),
            "resizableRect" => Ok(Self::ResizableRect),
            "borderedRect" => Ok(Self::BorderedRect),
            other => Err(ShapeError::UnknownKind(other.to_string())),
        }
    }
}

/// A top-level shape.
#[derive(Debug, Clone)]
pub enum Shape {
    Rect(Rect),
    Polygon(Polygon),
    ResizableRect(ResizableRect),
    BorderedRect(BorderedRect),
}

impl Shape {
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect(_) => ShapeKind::Rect,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::ResizableRect(_) => ShapeKind::ResizableRect,
            Self::BorderedRect(_) => ShapeKind::BorderedRect,
        }
    }

    #[must_use]
    pub fn as_styled(&self) -> &dyn Styled {
        match self {
            Self::Rect(s) => s,
            Self::Polygon(s) => s,
            Self::ResizableRect(s) => s,
            Self::BorderedRect(s) => s,
        }
    }

    pub fn as_styled_mut(&mut self) -> &mut dyn Styled {
        match self {
            Self::Rect(s) => s,
            Self::Polygon(s) => s,
            Self::ResizableRect(s) => s,
            Self::BorderedRect(s) => s,
        }
    }

    pub fn as_draggable_mut(&mut self) -> &mut dyn Draggable {
        match self {
            Self::Rect(s) => s,
            Self::Polygon(s) => s,
            Self::ResizableRect(s) => s,
            Self::BorderedRect(s) => s,
        }
    }

    /// `None` for shapes that keep their geometry when the container resizes.
    pub fn as_resizable_mut(&mut self) -> Option<&mut dyn Resizable> {
        match self {
            Self::Rect(_) => None,
            Self::Polygon(s) => Some(s),
            Self::ResizableRect(s) => Some(s),
            Self::BorderedRect(s) => Some(s),
        }
    }

    #[must_use]
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.as_styled().id()
    }

    /// Composite shapes move to the top of the draw order when selected.
    #[must_use]
    pub fn raises_on_activate(&self) -> bool {
        !matches!(self, Self::Rect(_))
    }

    #[must_use]
    pub fn value(&self, relative: bool, bounds: Size) -> ShapeValue {
        match self {
            Self::Rect(s) => s.value(relative, bounds),
            Self::Polygon(s) => s.value(relative, bounds),
            Self::ResizableRect(s) => s.value(relative, bounds),
            Self::BorderedRect(s) => s.value(relative, bounds),
        }
    }

    /// Every drawn element of the shape, in draw order.
    #[must_use]
    pub fn layers(&self) -> Box<dyn Iterator<Item = Layer<'_>> + '_> {
        match self {
            Self::Rect(s) => Box::new(std::iter::once(Layer {
                target: DragTarget { shape: s.id(), part: Part::Body },
                element: s.element(),
            })),
            Self::Polygon(s) => Box::new(s.layers()),
            Self::ResizableRect(s) => Box::new(s.layers()),
            Self::BorderedRect(s) => Box::new(s.layers()),
        }
    }

    /// Drag one part of the shape. `None` when the part does not belong to it
    /// or does not move.
    fn drag_part(&mut self, part: Part, delta: Delta, bounds: Size) -> Option<Delta> {
        match (self, part) {
            (shape, Part::Body) => Some(shape.as_draggable_mut().drag_within(delta, bounds)),
            (Self::Polygon(p), Part::Vertex(id)) => p.drag_vertex(id, delta, bounds),
            (Self::ResizableRect(r), Part::Handle(role)) => Some(r.drag_handle(role, delta, bounds)),
            (Self::BorderedRect(b), Part::BorderControl) => Some(b.drag_control(delta, bounds)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Container {
    element: Element,
    children: Vec<Shape>,
    active: Option<ElementId>,
    size: Option<Size>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        let options =
            ShapeOptions { is_draggable: false, ..ShapeOptions::default() }.with_default_class(CLASS_CONTAINER);
        Self { element: Element::with_options("svg", &options), children: Vec::new(), active: None, size: None }
    }

    /// Add a shape on top of the draw order. Returns its id.
    pub fn append(&mut self, shape: Shape) -> ElementId {
        let id = shape.id();
        self.children.push(shape);
        id
    }

    /// Detach a shape. Clears the selection if it was active.
    pub fn remove(&mut self, id: ElementId) -> Option<Shape> {
        let index = self.children.iter().position(|s| s.id() == id)?;
        let mut shape = self.children.remove(index);
        if self.active == Some(id) {
            shape.as_styled_mut().deactivate();
            self.active = None;
        }
        Some(shape)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Shape> {
        self.children.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Shape> {
        self.children.iter_mut().find(|s| s.id() == id)
    }

    /// Shapes in draw order, optionally filtered by kind.
    pub fn instances(&self, kind: Option<ShapeKind>) -> impl Iterator<Item = &Shape> {
        self.children.iter().filter(move |s| kind.is_none_or(|k| s.kind() == k))
    }

    #[must_use]
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    /// Make `id` the single active shape.
    ///
    /// Returns whether the selection changed. Selecting the already active
    /// shape or an unknown id changes nothing.
    pub fn set_active_element(&mut self, id: ElementId) -> bool {
        let Some(shape) = self.get(id) else {
            return false;
        };
        if shape.as_styled().is_active() {
            return false;
        }
        self.deactivate_active_element();
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        shape.as_styled_mut().activate();
        let raise = shape.raises_on_activate();
        self.active = Some(id);
        if raise {
            self.bring_to_front(id);
        }
        debug!("container: active element {id}");
        true
    }

    pub fn deactivate_active_element(&mut self) {
        let Some(id) = self.active.take() else {
            return;
        };
        if let Some(shape) = self.get_mut(id) {
            shape.as_styled_mut().deactivate();
        }
    }

    /// Remove the active shape if it matches `kind` (any kind when `None`).
    pub fn remove_active_instance(&mut self, kind: Option<ShapeKind>) -> Option<Shape> {
        let id = self.active?;
        let matches = self.get(id).is_some_and(|s| kind.is_none_or(|k| s.kind() == k));
        if matches { self.remove(id) } else { None }
    }

    /// Remove every shape of `kind` (every shape when `None`). Returns how
    /// many were removed.
    pub fn remove_all_instances(&mut self, kind: Option<ShapeKind>) -> usize {
        let ids: Vec<ElementId> = self.instances(kind).map(Shape::id).collect();
        ids.into_iter().filter_map(|id| self.remove(id)).count()
    }

    /// Show or hide every shape of `kind`. Hidden shapes are deactivated first.
    pub fn toggle_all_instances(&mut self, visible: bool, kind: Option<ShapeKind>) {
        let ids: Vec<ElementId> = self.instances(kind).map(Shape::id).collect();
        for id in ids {
            if !visible && self.active == Some(id) {
                self.deactivate_active_element();
            }
            if let Some(shape) = self.get_mut(id) {
                let styled = shape.as_styled_mut();
                if visible {
                    styled.show();
                } else {
                    styled.deactivate();
                    styled.hide();
                }
            }
        }
    }

    /// Move a shape to the end of the draw order.
    pub fn bring_to_front(&mut self, id: ElementId) {
        if let Some(index) = self.children.iter().position(|s| s.id() == id) {
            let shape = self.children.remove(index);
            self.children.push(shape);
        }
    }

    /// Record the element's current pixel size and rescale children.
    ///
    /// The first observation only stores the baseline. An empty size (a
    /// hidden element) is ignored so the last real baseline is kept. Returns
    /// whether the children were rescaled.
    pub fn observe_size(&mut self, size: Size) -> bool {
        if self.size.is_some() && (size.width <= 0.0 || size.height <= 0.0) {
            debug!("container: ignoring empty size {size:?}");
            return false;
        }
        let Some(previous) = self.size.replace(size) else {
            return false;
        };
        if previous == size {
            return false;
        }
        if previous.width <= 0.0 || previous.height <= 0.0 {
            debug!("container: empty baseline {previous:?}, not rescaling");
            return false;
        }
        let width_factor = size.width / previous.width;
        let height_factor = size.height / previous.height;
        debug!("container: resize by {width_factor} x {height_factor}");
        for child in &mut self.children {
            if let Some(resizable) = child.as_resizable_mut() {
                resizable.resize(width_factor, height_factor);
            }
        }
        true
    }

    /// Drag bounds: the last observed pixel size.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.size.unwrap_or_default()
    }

    /// Whether polygon `id` is simple. With `highlight`, a polygon that is
    /// not gets selected. `None` when `id` is not a polygon.
    pub fn check_simple(&mut self, id: ElementId, highlight: bool) -> Option<bool> {
        let simple = self.get(id)?.as_polygon()?.is_simple();
        if !simple && highlight {
            self.set_active_element(id);
        }
        Some(simple)
    }

    #[must_use]
    pub fn value_of(&self, id: ElementId, relative: bool) -> Option<ShapeValue> {
        self.get(id).map(|s| s.value(relative, self.bounds()))
    }

    #[must_use]
    pub fn is_draggable(&self, target: DragTarget) -> bool {
        self.get(target.shape)
            .is_some_and(|s| s.layers().any(|l| l.target == target && l.element.is_draggable()))
    }

    /// Drag a shape part within the current bounds. Returns the applied
    /// movement, or `None` when the target is unknown or not draggable.
    pub fn drag(&mut self, target: DragTarget, delta: Delta) -> Option<Delta> {
        if !self.is_draggable(target) {
            return None;
        }
        let bounds = self.bounds();
        self.get_mut(target.shape)?.drag_part(target.part, delta, bounds)
    }

    /// Every drawn element of every shape, in draw order.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        self.children.iter().flat_map(Shape::layers)
    }
}

impl Styled for Container {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}
