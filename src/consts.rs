//! Shared constants for the editor crate.

// ── Geometry ────────────────────────────────────────────────────

/// Default width of vertex and handle controls, in pixels.
pub const CONTROL_WIDTH: f64 = 12.0;

/// Default height of vertex and handle controls, in pixels.
pub const CONTROL_HEIGHT: f64 = 12.0;

/// Outward offset of a bordered rectangle's border, in pixels.
pub const BORDER_OFFSET: f64 = 14.0;

/// Smallest width/height a bordered rectangle can be shrunk to.
pub const MIN_RECT_SIZE: f64 = 1.0;

/// A polygon never drops below this many vertices through removal.
pub const MIN_POLYGON_VERTICES: usize = 4;

// ── Interaction ─────────────────────────────────────────────────

/// Window in which a second tap counts as a double tap, in milliseconds.
pub const DOUBLE_TAP_MS: f64 = 300.0;

// ── Markup ──────────────────────────────────────────────────────

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Node attribute carrying the owning element's id, used to resolve event targets.
pub const ATTR_ELEMENT_ID: &str = "data-svgext-id";

pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_HIDDEN: &str = "svg-element_hidden";
pub const CLASS_DRAGGABLE: &str = "svg_draggable";
pub const CLASS_DEFAULT_BG: &str = "svg_bg-color_default";
pub const CLASS_TOUCH_CONTROL: &str = "svg-control_type_touch";
pub const CLASS_UNSELECTABLE: &str = "unselectable";

pub const CLASS_CONTAINER: &str = "svg-container_fluid";
pub const CLASS_POLYGON: &str = "svg-polygon";
pub const CLASS_VERTEX: &str = "svg-polygon-vertex";
pub const CLASS_RESIZABLE_RECT: &str = "svg-resizable-rectangle";
pub const CLASS_RECT_CONTROL: &str = "svg-rectangle-control";
pub const CLASS_BORDERED_RECT: &str = "svg-bordered-rect";
pub const CLASS_BORDER: &str = "svg-border";
pub const CLASS_BORDER_CONTROL: &str = "svg-border-control";
