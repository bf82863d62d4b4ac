//! Error types.
//!
//! Construction problems surface immediately as [`ShapeError`]. Operations
//! that are merely inapplicable (odd point lists, refused vertex removal, a
//! drag with nothing to move) are not errors and return `false` or `None`.

use wasm_bindgen::JsValue;

/// Error returned when a shape or configuration cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    /// A geometry field the shape cannot exist without was not provided.
    #[error("missing property: {field} is required by {shape}")]
    MissingProperty { shape: &'static str, field: &'static str },
    /// A resize handle was requested without an orientation.
    #[error("handle orientation must be set")]
    MissingOrientation,
    /// A geometry field was NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    /// The options or configuration JSON did not parse.
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
    /// A shape kind name was not recognized.
    #[error("unknown shape kind: {0}")]
    UnknownKind(String),
}

/// Error returned by the browser binding.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// No global `window` (not running in a browser main thread).
    #[error("window is not available")]
    NoWindow,
    /// The window has no document or the document has no body.
    #[error("document is not available")]
    NoDocument,
    /// A DOM call threw.
    #[error("dom call failed: {0}")]
    Js(String),
    /// An element id passed in from JavaScript did not parse.
    #[error("invalid element id: {0}")]
    InvalidId(#[from] uuid::Error),
    /// A shape value could not be encoded for the caller.
    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),
    /// A shape could not be constructed.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<ShapeError> for JsValue {
    fn from(err: ShapeError) -> Self {
        DomError::from(err).into()
    }
}
