//! Engine configuration.

use crate::style::{BACKGROUND_COLOR, SerializableColor, StyleConfig};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Settings fixed when a canvas is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Raster buffer width in document pixels.
    pub document_width: u32,
    /// Raster buffer height in document pixels.
    pub document_height: u32,
    /// Initial size of the host surface.
    pub viewport_size: Size,
    /// Color the raster buffer starts with and the eraser restores.
    pub background: SerializableColor,
    /// Hit tolerance for pointer targeting, in document units.
    pub hit_tolerance: f64,
    /// Initial style settings.
    pub style: StyleConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            document_width: 3000,
            document_height: 3000,
            viewport_size: Size::new(1200.0, 800.0),
            background: BACKGROUND_COLOR,
            hit_tolerance: 2.0,
            style: StyleConfig::default(),
        }
    }
}
