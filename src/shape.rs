//! Shape capabilities and the primitive shapes they are built from.
//!
//! Capabilities are independent traits: [`crate::element::Styled`] for
//! anything with a node, [`Draggable`] for anything that follows the pointer,
//! [`Resizable`] for anything that rescales with its container. Composite
//! shapes (polygon, resizable rect, bordered rect) own primitives from this
//! module and delegate to them explicitly.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CLASS_RECT_CONTROL, CLASS_TOUCH_CONTROL, CLASS_VERTEX};
use crate::constraint::Constraint;
use crate::element::{Element, ElementId, ShapeOptions, Styled};
use crate::error::ShapeError;
use crate::geometry::{Delta, Point, Size};

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Something that follows pointer drags inside container bounds.
pub trait Draggable {
    /// Clamp a proposed movement so the result stays inside `bounds`.
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta;

    /// Apply a movement that has already been normalized.
    fn drag(&mut self, delta: Delta);

    /// Normalize then apply. Returns the movement actually applied.
    fn drag_within(&mut self, delta: Delta, bounds: Size) -> Delta {
        let delta = self.normalize_delta(delta, bounds);
        self.drag(delta);
        delta
    }
}

/// Something that rescales when its container changes pixel size.
pub trait Resizable {
    fn resize(&mut self, width_factor: f64, height_factor: f64);
}

// =============================================================================
// TARGETS AND VALUES
// =============================================================================

/// Handle orientation: which axis the handle moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Moves up and down; drives y and height.
    Vertical,
    /// Moves left and right; drives x and width.
    Horizontal,
}

impl Orientation {
    /// Drop the component of `delta` this orientation does not move along.
    #[must_use]
    pub fn lock(self, delta: Delta) -> Delta {
        match self {
            Self::Vertical => Delta::new(0.0, delta.y),
            Self::Horizontal => Delta::new(delta.x, 0.0),
        }
    }
}

/// Logical role of a resizable rectangle's handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    Top,
    Bottom,
    Right,
    Left,
}

impl HandleRole {
    /// All roles in storage and draw order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Right, Self::Left];

    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Top | Self::Bottom => Orientation::Vertical,
            Self::Right | Self::Left => Orientation::Horizontal,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Right => 2,
            Self::Left => 3,
        }
    }
}

/// Which piece of a shape an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// The shape's own node.
    Body,
    /// A polygon vertex.
    Vertex(ElementId),
    /// One of a resizable rectangle's handles.
    Handle(HandleRole),
    /// A bordered rectangle's cosmetic border.
    Border,
    /// A bordered rectangle's expand handle.
    BorderControl,
}

/// A shape piece the pointer can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTarget {
    /// Id of the top-level shape.
    pub shape: ElementId,
    pub part: Part,
}

/// One drawn element of a shape, in draw order.
#[derive(Debug, Clone, Copy)]
pub struct Layer<'a> {
    pub target: DragTarget,
    pub element: &'a Element,
}

/// Value reported to callers that persist shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShapeValue {
    /// Rectangle size.
    Size { width: f64, height: f64 },
    /// Polygon vertices, flat `[x0, y0, x1, y1, ...]`.
    Points(Vec<f64>),
}

// =============================================================================
// RECT
// =============================================================================

/// Axis-aligned box whose position is its top-left origin.
#[derive(Debug, Clone)]
pub struct Rect {
    element: Element,
    origin: Point,
    size: Size,
}

impl Rect {
    /// Build a `<rect>` from options. Missing geometry defaults to zero.
    #[must_use]
    pub fn new(options: &ShapeOptions) -> Self {
        let size = Size::new(options.width.unwrap_or(0.0), options.height.unwrap_or(0.0));
        let origin = Point::new(options.x.unwrap_or(0.0), options.y.unwrap_or(0.0));
        Self::with_geometry(options, origin, size)
    }

    #[must_use]
    pub fn with_geometry(options: &ShapeOptions, origin: Point, size: Size) -> Self {
        let mut rect = Self { element: Element::with_options("rect", options), origin, size };
        rect.set_width(size.width);
        rect.set_height(size.height);
        rect.set_x(origin.x);
        rect.set_y(origin.y);
        rect
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.origin.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.origin.y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_x(&mut self, x: f64) {
        self.origin.x = finite_or_zero(x);
        self.element.set_num("x", self.origin.x);
    }

    pub fn set_y(&mut self, y: f64) {
        self.origin.y = finite_or_zero(y);
        self.element.set_num("y", self.origin.y);
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.set_x(origin.x);
        self.set_y(origin.y);
    }

    pub fn set_width(&mut self, width: f64) {
        self.size.width = width;
        self.element.set_num("width", width);
    }

    pub fn set_height(&mut self, height: f64) {
        self.size.height = height;
        self.element.set_num("height", height);
    }

    /// Width and height, optionally as fractions of `bounds`.
    #[must_use]
    pub fn value(&self, relative: bool, bounds: Size) -> ShapeValue {
        if relative {
            ShapeValue::Size { width: self.size.width / bounds.width, height: self.size.height / bounds.height }
        } else {
            ShapeValue::Size { width: self.size.width, height: self.size.height }
        }
    }

    /// Scale origin and size by the container's resize factors.
    pub fn scale(&mut self, width_factor: f64, height_factor: f64) {
        self.set_x(self.origin.x * width_factor);
        self.set_y(self.origin.y * height_factor);
        self.set_width(self.size.width * width_factor);
        self.set_height(self.size.height * height_factor);
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

impl Styled for Rect {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Draggable for Rect {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        Constraint::Rect { origin: self.origin, size: self.size }.clamp(delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        self.set_origin(self.origin.offset(delta));
    }
}

// =============================================================================
// VERTEX
// =============================================================================

/// Polygon vertex control. Its logical position is the center of its box.
#[derive(Debug, Clone)]
pub struct Vertex {
    rect: Rect,
}

impl Vertex {
    #[must_use]
    pub fn new(center: Point, size: Size, touch: bool) -> Self {
        let options = ShapeOptions::default().with_default_class(CLASS_VERTEX);
        let half = size.half();
        let origin = Point::new(center.x - half.width, center.y - half.height);
        let mut rect = Rect::with_geometry(&options, origin, size);
        if touch {
            rect.element_mut().add_class(CLASS_TOUCH_CONTROL);
        }
        Self { rect }
    }

    /// Center point; always `box_origin + size / 2`.
    #[must_use]
    pub fn center(&self) -> Point {
        let half = self.rect.size().half();
        Point::new(self.rect.x() + half.width, self.rect.y() + half.height)
    }

    pub fn set_center(&mut self, center: Point) {
        let half = self.rect.size().half();
        self.rect.set_origin(Point::new(center.x - half.width, center.y - half.height));
    }

    #[must_use]
    pub fn box_origin(&self) -> Point {
        self.rect.origin()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    #[must_use]
    pub fn constraint(&self) -> Constraint {
        Constraint::Point { center: self.center() }
    }
}

impl Styled for Vertex {
    fn element(&self) -> &Element {
        self.rect.element()
    }

    fn element_mut(&mut self) -> &mut Element {
        self.rect.element_mut()
    }
}

impl Draggable for Vertex {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        self.constraint().clamp(delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        self.set_center(self.center().offset(delta));
    }
}

// =============================================================================
// HANDLE
// =============================================================================

/// Mid-edge resize handle. Positioned by its box origin; moves along one axis.
#[derive(Debug, Clone)]
pub struct Handle {
    rect: Rect,
    orientation: Orientation,
}

impl Handle {
    /// Build a handle from options; `orientation` is mandatory.
    ///
    /// # Errors
    ///
    /// Returns `MissingOrientation` if the options carry no orientation.
    pub fn from_options(options: &ShapeOptions, touch: bool) -> Result<Self, ShapeError> {
        let orientation = options.orientation.ok_or(ShapeError::MissingOrientation)?;
        let options = options.clone().with_default_class(CLASS_RECT_CONTROL);
        let mut rect = Rect::new(&options);
        rect.element_mut().add_class(&format!("{CLASS_RECT_CONTROL}_type_{}", orientation_name(orientation)));
        if touch {
            rect.element_mut().add_class(CLASS_TOUCH_CONTROL);
        }
        Ok(Self { rect, orientation })
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.rect.origin()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    #[must_use]
    pub fn center(&self) -> Point {
        let half = self.rect.size().half();
        Point::new(self.rect.x() + half.width, self.rect.y() + half.height)
    }

    pub fn set_x(&mut self, x: f64) {
        self.rect.set_x(x);
    }

    pub fn set_y(&mut self, y: f64) {
        self.rect.set_y(y);
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.rect.set_origin(origin);
    }
}

fn orientation_name(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Vertical => "vertical",
        Orientation::Horizontal => "horizontal",
    }
}

impl Styled for Handle {
    fn element(&self) -> &Element {
        self.rect.element()
    }

    fn element_mut(&mut self) -> &mut Element {
        self.rect.element_mut()
    }
}

impl Draggable for Handle {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        Constraint::Point { center: self.center() }.clamp(delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        let delta = self.orientation.lock(delta);
        self.rect.drag(delta);
    }
}
