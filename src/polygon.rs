//! Polygon editor.
//!
//! A polygon is an ordered ring of [`Vertex`] controls plus one `<polygon>`
//! element whose `points` attribute is re-rendered from the vertex centers
//! after every change. Vertex order is edge order is draw order.

#[cfg(test)]
#[path = "polygon_test.rs"]
mod polygon_test;

use log::debug;
use serde_json::Value;

use crate::config::EditorConfig;
use crate::consts::{CLASS_HIDDEN, CLASS_POLYGON, MIN_POLYGON_VERTICES};
use crate::constraint::clamp_all;
use crate::element::{Element, ElementId, ShapeOptions, Styled};
use crate::geometry::{self, Delta, Point, Size};
use crate::shape::{DragTarget, Draggable, Layer, Part, Resizable, ShapeValue, Vertex};

#[derive(Debug, Clone)]
pub struct Polygon {
    element: Element,
    vertices: Vec<Vertex>,
    control: Size,
    touch: bool,
}

impl Polygon {
    /// Build a polygon. `options.points` seeds the vertices when it is a
    /// valid flat coordinate list.
    #[must_use]
    pub fn new(options: &ShapeOptions, config: &EditorConfig) -> Self {
        let options = options.clone().with_default_class(CLASS_POLYGON);
        let mut polygon = Self {
            element: Element::with_options("polygon", &options),
            vertices: Vec::new(),
            control: config.control,
            touch: config.touch,
        };
        if let Some(points) = &options.points {
            polygon.set_points_value(points);
        }
        polygon.render();
        polygon
    }

    /// Replace every vertex. Odd-length input is ignored.
    ///
    /// Returns whether the vertices were replaced.
    pub fn set_points(&mut self, points: &[f64]) -> bool {
        if points.len() % 2 != 0 {
            debug!("polygon: ignoring odd-length point list ({} values)", points.len());
            return false;
        }
        let active = self.is_active();
        self.vertices = geometry::points_from_flat(points)
            .into_iter()
            .map(|center| self.new_vertex(center, active))
            .collect();
        self.render();
        true
    }

    /// [`Self::set_points`] for untyped input. Anything other than an array of
    /// numbers is ignored.
    pub fn set_points_value(&mut self, points: &Value) -> bool {
        let Some(items) = points.as_array() else {
            return false;
        };
        let flat: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
        match flat {
            Some(flat) => self.set_points(&flat),
            None => false,
        }
    }

    fn new_vertex(&self, center: Point, active: bool) -> Vertex {
        let mut vertex = Vertex::new(center, self.control, self.touch);
        if active {
            vertex.activate();
        }
        vertex
    }

    /// Write the vertex centers into the `points` attribute.
    pub fn render(&mut self) {
        let points: Vec<String> = self
            .vertices
            .iter()
            .map(|v| {
                let c = v.center();
                format!("{},{}", c.x, c.y)
            })
            .collect();
        self.element.set_attr("points", points.join(" "));
    }

    /// Vertex centers as a flat `[x0, y0, x1, y1, ...]` list.
    #[must_use]
    pub fn points(&self) -> Vec<f64> {
        let centers: Vec<Point> = self.vertices.iter().map(Vertex::center).collect();
        geometry::flatten_points(&centers)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex(&self, id: ElementId) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id() == id)
    }

    /// Insert a vertex next to the edge whose midpoint is nearest `point`.
    ///
    /// The new vertex starts active. Returns its id, or `None` when the
    /// polygon has no vertices to attach to.
    pub fn add_point(&mut self, point: Point) -> Option<ElementId> {
        let index = geometry::find_insert_index(&self.points(), point)?;
        let vertex = self.new_vertex(point, true);
        let id = vertex.id();
        self.vertices.insert(index, vertex);
        self.render();
        Some(id)
    }

    /// Remove a vertex unless that would leave fewer than the minimum.
    ///
    /// Returns whether a vertex was removed.
    pub fn remove_vertex(&mut self, id: ElementId) -> bool {
        let Some(index) = self.vertices.iter().position(|v| v.id() == id) else {
            return false;
        };
        if self.vertices.len() - 1 < MIN_POLYGON_VERTICES {
            debug!("polygon {}: keeping vertex, {} is the minimum", self.id(), MIN_POLYGON_VERTICES);
            return false;
        }
        self.vertices.remove(index);
        self.render();
        true
    }

    /// Whether no two non-adjacent edges cross.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        geometry::is_simple_polygon(&self.points())
    }

    /// Drag one vertex. Returns the applied movement, or `None` for an
    /// unknown vertex.
    pub fn drag_vertex(&mut self, id: ElementId, delta: Delta, bounds: Size) -> Option<Delta> {
        let vertex = self.vertices.iter_mut().find(|v| v.id() == id)?;
        let applied = vertex.drag_within(delta, bounds);
        self.render();
        Some(applied)
    }

    /// Flat coordinates, as fractions of `bounds` when `relative`.
    #[must_use]
    pub fn value(&self, relative: bool, bounds: Size) -> ShapeValue {
        let mut points = self.points();
        if relative {
            for pair in points.chunks_exact_mut(2) {
                pair[0] /= bounds.width;
                pair[1] /= bounds.height;
            }
        }
        ShapeValue::Points(points)
    }

    /// Polygon body first, then vertices in order.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        let shape = self.id();
        let body = Layer { target: DragTarget { shape, part: Part::Body }, element: &self.element };
        std::iter::once(body).chain(self.vertices.iter().map(move |v| Layer {
            target: DragTarget { shape, part: Part::Vertex(v.id()) },
            element: v.element(),
        }))
    }
}

impl Styled for Polygon {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn activate(&mut self) {
        self.element.activate();
        for vertex in &mut self.vertices {
            vertex.activate();
        }
    }

    fn deactivate(&mut self) {
        self.element.deactivate();
        for vertex in &mut self.vertices {
            vertex.deactivate();
        }
    }

    fn hide(&mut self) {
        self.element.add_class(CLASS_HIDDEN);
        for vertex in &mut self.vertices {
            vertex.hide();
        }
    }

    fn show(&mut self) {
        self.element.remove_class(CLASS_HIDDEN);
        for vertex in &mut self.vertices {
            vertex.show();
        }
    }
}

impl Draggable for Polygon {
    fn normalize_delta(&self, delta: Delta, bounds: Size) -> Delta {
        clamp_all(self.vertices.iter().map(Vertex::constraint), delta, bounds)
    }

    fn drag(&mut self, delta: Delta) {
        for vertex in &mut self.vertices {
            vertex.drag(delta);
        }
        self.render();
    }
}

impl Resizable for Polygon {
    fn resize(&mut self, width_factor: f64, height_factor: f64) {
        for vertex in &mut self.vertices {
            vertex.set_center(vertex.center().scale(width_factor, height_factor));
        }
        self.render();
    }
}
