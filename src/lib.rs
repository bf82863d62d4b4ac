//! Interactive shape editing for SVG documents embedded in a web page.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interaction core of an SVG editor: dragging and resizing rectangles,
//! reshaping polygons vertex by vertex, keeping polygons simple, and rescaling
//! every shape when the hosting `<svg>` changes its pixel size. The browser
//! binding in [`dom`] is deliberately thin: it mirrors [`element::Element`]
//! state onto real nodes and forwards DOM events to [`editor::EditorCore`],
//! which is plain Rust and fully testable without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Testable [`editor::EditorCore`]: input routing and host actions |
//! | [`dom`] | web-sys binding that mounts the core on an `<svg>` element |
//! | [`container`] | Top-level shape store, active selection, resize fan-out |
//! | [`polygon`] | Polygon editor: vertex insert/remove, simplicity check |
//! | [`resizable`] | Rectangle with four mid-edge resize handles |
//! | [`bordered`] | Rectangle with a cosmetic border and one expand handle |
//! | [`shape`] | Capability traits, plain rect, vertex and handle primitives |
//! | [`element`] | Attribute-backed node mirror and construction options |
//! | [`gesture`] | Pointer gesture state machine, double tap, frame throttle |
//! | [`constraint`] | Pure drag clamping policies |
//! | [`geometry`] | Points, sizes, segments and polygon math |
//! | [`config`] | Editor configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Shared constants (control size, class names, etc.) |

pub mod bordered;
pub mod config;
pub mod constraint;
pub mod consts;
pub mod container;
pub mod dom;
pub mod editor;
pub mod element;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod polygon;
pub mod resizable;
pub mod shape;
