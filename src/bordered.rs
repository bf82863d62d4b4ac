//! Rectangle with a cosmetic border and one expand handle.
//!
//! The border sits a fixed offset outside the rectangle and is never a drag
//! target. The control is centered on the border's bottom-right corner;
//! dragging it grows or shrinks the rectangle without ever flipping it.

#[cfg(test)]
#[path = "bordered_test.rs"]
mod bordered_test;

use crate::config::EditorConfig;
use crate::consts::{CLASS_BORDER, CLASS_BORDER_CONTROL, CLASS_BORDERED_RECT, CLASS_HIDDEN, CLASS_TOUCH_CONTROL};
use crate::constraint::Constraint;
use crate::element::{Element, ShapeOptions, Styled};
use crate::error::ShapeError;
use crate::geometry::{Delta, Point, Size};
use crate::shape::{DragTarget, Draggable, Layer, Part, Rect, Resizable, ShapeValue};

/// Axis whose geometry changed; `None` re-renders both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone)]
pub struct BorderedRect {
    rect: Rect,
    border: Element,
    control: Rect,
    offset: f64,
}

impl BorderedRect {
    /// # Errors
    ///
    /// `MissingProperty` unless `x`, `y`, `width` and `height` are all set.
    pub fn new(options: &ShapeOptions, config: &EditorConfig) -> Result<Self, ShapeError> {
        let (origin, size) = options.require_box("BorderedRect")?;
        let options = options.clone().with_default_class(CLASS_BORDERED_RECT);
        let rect = Rect::with_geometry(&options, origin, size);

        let border = Element::with_options(
            "rect",
            &ShapeOptions {
                is_draggable: false,
                css_class: Some(CLASS_BORDER.to_string()),
                background_color: Some("none".to_string()),
                ..ShapeOptions::default()
            },
        );

        let control_options = ShapeOptions::default().with_default_class(CLASS_BORDER_CONTROL);
        let mut control = Rect::with_geometry(&control_options, Point::ZERO, config.control);
        if config.touch {
            control.element_mut().add_class(CLASS_TOUCH_CONTROL);
        }

        let mut shape = Self { rect, border, control, offset: config.border_offset };
        shape.render_components(None);
        Ok(shape)
    }

    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[must_use]
    pub fn border(&self) -> &Element {
        &self.border
    }

    #[must_use]
    pub fn control(&self) -> &Rect {
        &self.control
    }

    pub fn set_width(&mut self, width: f64) {
        self.rect.set_width(width);
        self.render_components(Some(Axis::X));
    }

    pub fn set_height(&mut self, height: f64) {
        self.rect.set_height(height);
        self.render_components(Some(Axis::Y));
    }

    /// Place border and control around the rectangle.
    fn render_components(&mut self, axis: Option<Axis>) {
        let offset = self.offset;
        let half = self.control.size().half();
        let Point { x, y } = self.rect.origin();
        let Size { width, height } = self.rect.size();
        if axis != Some(Axis::X) {
            self.border.set_num("y", y - offset);
            self.border.set_num("height", height + 2.0 * offset);
            self.control.set_y(y + height + offset - half.height);
        }
        if axis != Some(Axis::Y) {
            self.border.set_num("x", x - offset);
            self.border.set_num("width", width + 2.0 * offset);
            self.control.set_x(x + width + offset - half.width);
        }
    }

    /// Drag the expand control. Returns the size change actually applied.
    pub fn drag_control(&mut self, delta: Delta, bounds: Size) -> Delta {
        let delta = Constraint::Resize { origin: self.rect.origin(), size: self.rect.size() }.clamp(delta, bounds);
        self.set_width(self.rect.width() + delta.x);
        self.set_height(self.rect.height() + delta.y);
        delta
    }

    #[must_use]
    pub fn value(&self, relative: bool, bounds: Size) -> ShapeValue {
        self.rect.value(relative, bounds)
    }

    /// Border, rectangle, control. The border is drawn underneath.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        let shape = self.id();
        [
            Layer { target: DragTarget { shape, part: Part::Border }, element: &self.border },
            Layer { target: DragTarget { shape, part: Part::Body }, element: self.rect.element() },
            Layer { target: DragTarget { shape, part: Part::BorderControl }, element: self.control.element() },
        ]
        .into_iter()
    }
}

impl Styled for BorderedRect {
    fn element(&self) -> &Element {
        self.rect.element()
    }

    fn element_mut(&mut self) -> &mut Element {
        self.rect.element_mut()
    }

    fn activate(&mut self) {
        self.rect.activate();
        self.border.activate();
        self.control.activate();
    }

    fn deactivate(&mut self) {
        self.rect.deactivate();
        self.border.deactivate();
        self.control.deactivate();
    }

    fn hide(&mut self) {
        self.rect.hide();
        self.border.add_class(CLASS_HIDDEN);
        self.control.hide();
    }

    fn show(&mut self) {
        self.rect.show();
        self.border.remove_class(CLASS_HIDDEN);
        self.control.show();
    }
}

impl Draggable for BorderedRect {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        self.rect.normalize_delta(delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        self.rect.drag(delta);
        self.render_components(None);
    }
}

impl Resizable for BorderedRect {
    fn resize(&mut self, width_factor: f64, height_factor: f64) {
        self.rect.scale(width_factor, height_factor);
        self.render_components(None);
    }
}
