//! Attribute-backed node mirror and construction options.
//!
//! Every visible piece of a shape (the rectangle itself, a polygon's path, a
//! vertex, a handle, a border) owns one [`Element`]. An element holds exactly
//! what the browser node should carry: a tag, string attributes and a class
//! list. Shapes update their elements as they move; the [`crate::dom`] layer
//! copies them onto real SVG nodes once per animation frame.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::consts::{CLASS_ACTIVE, CLASS_DEFAULT_BG, CLASS_DRAGGABLE, CLASS_HIDDEN};
use crate::error::ShapeError;
use crate::geometry::{Point, Size};
use crate::shape::Orientation;

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// Construction options shared by all shapes.
///
/// Geometry fields are optional here; shapes that cannot exist without them
/// report [`ShapeError::MissingProperty`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeOptions {
    /// Whether the shape follows pointer drags. Defaults to `true`.
    pub is_draggable: bool,
    /// Fill color. When absent the default background class is applied.
    pub background_color: Option<String>,
    /// Extra CSS classes, space separated. Replaces the shape's default class.
    pub css_class: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Polygon vertices as a flat `[x0, y0, x1, y1, ...]` array.
    pub points: Option<serde_json::Value>,
    /// Resize handle orientation.
    pub orientation: Option<Orientation>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            is_draggable: true,
            background_color: None,
            css_class: None,
            x: None,
            y: None,
            width: None,
            height: None,
            points: None,
            orientation: None,
        }
    }
}

impl ShapeOptions {
    /// Parse options from JSON. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if the JSON is malformed or mistyped.
    pub fn from_json(raw: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Options for a box at `(x, y)` with the given size.
    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x: Some(x), y: Some(y), width: Some(width), height: Some(height), ..Self::default() }
    }

    /// Use `class` unless the caller supplied their own.
    #[must_use]
    pub fn with_default_class(mut self, class: &str) -> Self {
        if self.css_class.is_none() {
            self.css_class = Some(class.to_string());
        }
        self
    }

    /// Read the full box geometry that `shape` cannot be built without.
    ///
    /// # Errors
    ///
    /// `MissingProperty` for the first absent field, `NonFinite` for NaN or
    /// infinite values.
    pub fn require_box(&self, shape: &'static str) -> Result<(Point, Size), ShapeError> {
        let width = require(shape, "width", self.width)?;
        let height = require(shape, "height", self.height)?;
        let x = require(shape, "x", self.x)?;
        let y = require(shape, "y", self.y)?;
        Ok((Point::new(x, y), Size::new(width, height)))
    }
}

fn require(shape: &'static str, field: &'static str, value: Option<f64>) -> Result<f64, ShapeError> {
    let value = value.ok_or(ShapeError::MissingProperty { shape, field })?;
    if value.is_finite() { Ok(value) } else { Err(ShapeError::NonFinite { field }) }
}

/// Mirror of one SVG node.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    tag: &'static str,
    attrs: BTreeMap<String, String>,
    active: bool,
    draggable: bool,
}

impl Element {
    /// A bare element with no classes or attributes.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self { id: Uuid::new_v4(), tag, attrs: BTreeMap::new(), active: false, draggable: false }
    }

    /// An element styled from construction options.
    #[must_use]
    pub fn with_options(tag: &'static str, options: &ShapeOptions) -> Self {
        let mut element = Self::new(tag);
        if let Some(class) = &options.css_class {
            element.add_class(class);
        }
        match &options.background_color {
            Some(color) => element.set_attr("fill", color.clone()),
            None => element.add_class(CLASS_DEFAULT_BG),
        }
        if options.is_draggable {
            element.draggable = true;
            element.add_class(CLASS_DRAGGABLE);
        }
        element
    }

    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    /// Attribute value by key.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// All attributes in key order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        self.attrs.insert(key.to_string(), value.into());
    }

    /// Store a numeric attribute. Whole numbers render without a fraction.
    pub fn set_num(&mut self, key: &str, value: f64) {
        self.set_attr(key, value.to_string());
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Add one or more space separated classes, skipping ones already present.
    pub fn add_class(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            if self.has_class(class) {
                continue;
            }
            let joined = match self.attr("class") {
                Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
                _ => class.to_string(),
            };
            self.set_attr("class", joined);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let kept: Vec<&str> = existing.split_whitespace().filter(|c| *c != class).collect();
        let kept = kept.join(" ");
        self.set_attr("class", kept);
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.add_class(CLASS_ACTIVE);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.remove_class(CLASS_ACTIVE);
    }
}

/// Something drawn through one primary element.
///
/// Composite shapes override the lifecycle methods to cascade to the parts
/// they own, calling the primary element's step explicitly.
pub trait Styled {
    fn element(&self) -> &Element;
    fn element_mut(&mut self) -> &mut Element;

    fn id(&self) -> ElementId {
        self.element().id()
    }

    fn is_active(&self) -> bool {
        self.element().is_active()
    }

    fn activate(&mut self) {
        self.element_mut().activate();
    }

    fn deactivate(&mut self) {
        self.element_mut().deactivate();
    }

    fn hide(&mut self) {
        self.element_mut().add_class(CLASS_HIDDEN);
    }

    fn show(&mut self) {
        self.element_mut().remove_class(CLASS_HIDDEN);
    }

    fn is_hidden(&self) -> bool {
        self.element().has_class(CLASS_HIDDEN)
    }
}
