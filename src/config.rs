//! Editor configuration.
//!
//! The interaction mode (mouse or touch) is decided by the host once, at
//! construction, and flows down to every shape that needs it. Nothing in the
//! crate sniffs the platform on its own.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BORDER_OFFSET, CONTROL_HEIGHT, CONTROL_WIDTH, DOUBLE_TAP_MS};
use crate::error::ShapeError;
use crate::geometry::Size;

/// Tunables shared by the container and every shape it creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Touch input: touch events, double-tap emulation, larger controls via CSS.
    pub touch: bool,
    /// Size of vertex and handle controls.
    pub control: Size,
    /// Outward offset of a bordered rectangle's border.
    pub border_offset: f64,
    /// Double-tap window in milliseconds.
    pub double_tap_ms: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            touch: false,
            control: Size::new(CONTROL_WIDTH, CONTROL_HEIGHT),
            border_offset: BORDER_OFFSET,
            double_tap_ms: DOUBLE_TAP_MS,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` if the JSON is malformed or a value has the
    /// wrong type.
    pub fn from_json(raw: &str) -> Result<Self, ShapeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Default configuration for a touch device.
    #[must_use]
    pub fn touch() -> Self {
        Self { touch: true, ..Self::default() }
    }
}
