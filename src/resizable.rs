//! Rectangle with four mid-edge resize handles.
//!
//! Handles live in fixed slots (top, bottom, right, left) but a handle may be
//! dragged past its opposite, so after a drag the rectangle is rebuilt from
//! whichever handle of the pair is currently smaller on its axis.

#[cfg(test)]
#[path = "resizable_test.rs"]
mod resizable_test;

use crate::config::EditorConfig;
use crate::consts::{CLASS_RECT_CONTROL, CLASS_RESIZABLE_RECT};
use crate::element::{Element, ShapeOptions, Styled};
use crate::error::ShapeError;
use crate::geometry::{Delta, Point, Size};
use crate::shape::{
    DragTarget, Draggable, Handle, HandleRole, Layer, Orientation, Part, Rect, Resizable, ShapeValue,
};

#[derive(Debug, Clone)]
pub struct ResizableRect {
    rect: Rect,
    handles: [Handle; 4],
    control: Size,
}

impl ResizableRect {
    /// # Errors
    ///
    /// `MissingProperty` unless `x`, `y`, `width` and `height` are all set.
    pub fn new(options: &ShapeOptions, config: &EditorConfig) -> Result<Self, ShapeError> {
        let (origin, size) = options.require_box("ResizableRect")?;
        let options = options.clone().with_default_class(CLASS_RESIZABLE_RECT);
        let rect = Rect::with_geometry(&options, origin, size);
        let control = config.control;
        let handles = HandleRole::ALL.map(|role| {
            let opts = ShapeOptions {
                width: Some(control.width),
                height: Some(control.height),
                css_class: Some(CLASS_RECT_CONTROL.to_string()),
                orientation: Some(role.orientation()),
                ..ShapeOptions::default()
            };
            Handle::from_options(&opts, config.touch)
        });
        let [top, bottom, right, left] = handles;
        let mut shape = Self { rect, handles: [top?, bottom?, right?, left?], control };
        shape.layout_handles();
        Ok(shape)
    }

    #[must_use]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[must_use]
    pub fn handle(&self, role: HandleRole) -> &Handle {
        &self.handles[role.index()]
    }

    /// Put every handle back on its edge midpoint.
    fn layout_handles(&mut self) {
        let half = self.control.half();
        let Point { x, y } = self.rect.origin();
        let Size { width, height } = self.rect.size();
        let mid_x = x + width / 2.0 - half.width;
        let mid_y = y + height / 2.0 - half.height;
        self.handles[HandleRole::Top.index()].set_origin(Point::new(mid_x, y - half.height));
        self.handles[HandleRole::Bottom.index()].set_origin(Point::new(mid_x, y + height - half.height));
        self.handles[HandleRole::Right.index()].set_origin(Point::new(x + width - half.width, mid_y));
        self.handles[HandleRole::Left.index()].set_origin(Point::new(x - half.width, mid_y));
    }

    /// Drag one handle and rebuild the rectangle along its axis.
    pub fn drag_handle(&mut self, role: HandleRole, delta: Delta, bounds: Size) -> Delta {
        let applied = self.handles[role.index()].drag_within(delta, bounds);
        self.update(role.orientation());
        applied
    }

    /// Rebuild position and size on one axis from that axis' handle pair.
    pub fn update(&mut self, orientation: Orientation) {
        let half = self.control.half();
        match orientation {
            Orientation::Vertical => {
                let a = self.handles[HandleRole::Top.index()].origin().y;
                let b = self.handles[HandleRole::Bottom.index()].origin().y;
                let (low, high) = if a >= b { (b, a) } else { (a, b) };
                self.rect.set_y(low + half.height);
                self.rect.set_height(high - low);
                let side_y = self.rect.y() + self.rect.height() / 2.0 - half.height;
                self.handles[HandleRole::Right.index()].set_y(side_y);
                self.handles[HandleRole::Left.index()].set_y(side_y);
            }
            Orientation::Horizontal => {
                let a = self.handles[HandleRole::Right.index()].origin().x;
                let b = self.handles[HandleRole::Left.index()].origin().x;
                let (low, high) = if a >= b { (b, a) } else { (a, b) };
                self.rect.set_x(low + half.width);
                self.rect.set_width(high - low);
                let side_x = self.rect.x() + self.rect.width() / 2.0 - half.width;
                self.handles[HandleRole::Top.index()].set_x(side_x);
                self.handles[HandleRole::Bottom.index()].set_x(side_x);
            }
        }
    }

    #[must_use]
    pub fn value(&self, relative: bool, bounds: Size) -> ShapeValue {
        self.rect.value(relative, bounds)
    }

    /// Rectangle first, then handles in slot order.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        let shape = self.id();
        let body = Layer { target: DragTarget { shape, part: Part::Body }, element: self.rect.element() };
        std::iter::once(body).chain(HandleRole::ALL.into_iter().map(move |role| Layer {
            target: DragTarget { shape, part: Part::Handle(role) },
            element: self.handles[role.index()].element(),
        }))
    }
}

impl Styled for ResizableRect {
    fn element(&self) -> &Element {
        self.rect.element()
    }

    fn element_mut(&mut self) -> &mut Element {
        self.rect.element_mut()
    }

    fn activate(&mut self) {
        self.rect.activate();
        for handle in &mut self.handles {
            handle.activate();
        }
    }

    fn deactivate(&mut self) {
        self.rect.deactivate();
        for handle in &mut self.handles {
            handle.deactivate();
        }
    }

    fn hide(&mut self) {
        self.rect.hide();
        for handle in &mut self.handles {
            handle.hide();
        }
    }

    fn show(&mut self) {
        self.rect.show();
        for handle in &mut self.handles {
            handle.show();
        }
    }
}

impl Draggable for ResizableRect {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        self.rect.normalize_delta(delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        self.rect.drag(delta);
        for handle in &mut self.handles {
            handle.set_origin(handle.origin().offset(delta));
        }
    }
}

impl Resizable for ResizableRect {
    fn resize(&mut self, width_factor: f64, height_factor: f64) {
        self.rect.scale(width_factor, height_factor);
        self.layout_handles();
    }
}
