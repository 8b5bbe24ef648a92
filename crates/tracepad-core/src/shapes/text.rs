//! Text label element.

use super::ShapeTrait;
use crate::element::ElementId;
use crate::style::SerializableColor;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Default width of a newly created label.
pub const DEFAULT_TEXT_WIDTH: f64 = 200.0;
/// Default height of a newly created label.
pub const DEFAULT_TEXT_HEIGHT: f64 = 30.0;

/// An editable text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub(crate) id: ElementId,
    /// Top-left corner of the text box.
    pub position: Point,
    /// Rotation angle in degrees (around the top-left corner).
    #[serde(default)]
    pub rotation: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name as understood by the renderer.
    pub font_family: String,
    /// Text color.
    pub fill: SerializableColor,
    /// The text content. Empty while a new label is first being typed.
    pub content: String,
}

impl TextLabel {
    /// Create an empty label with the default box size.
    pub fn new(
        id: ElementId,
        position: Point,
        font_size: f64,
        font_family: impl Into<String>,
        fill: SerializableColor,
    ) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            width: DEFAULT_TEXT_WIDTH,
            height: DEFAULT_TEXT_HEIGHT,
            font_size,
            font_family: font_family.into(),
            fill,
            content: String::new(),
        }
    }

    /// Whether the label has no content yet.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl ShapeTrait for TextLabel {
    fn id(&self) -> &ElementId {
        &self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        self.local_bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn local_path(&self) -> BezPath {
        self.local_bounds().to_path(0.1)
    }
}
