//! Unified element model: shapes and text labels under one id space.

use crate::shapes::{Shape, ShapeKind, ShapeTrait, TextLabel};
use crate::style::SerializableColor;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh id with the given prefix, e.g. `shape_3f2a...`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Element family, used for mode filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Shape(ShapeKind),
    Text,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Shape(kind) => kind.name(),
            ElementKind::Text => "text",
        }
    }
}

/// Anything that lives in the element store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Shape(Shape),
    Text(TextLabel),
}

impl Element {
    pub fn id(&self) -> &ElementId {
        match self {
            Element::Shape(s) => s.id(),
            Element::Text(t) => t.id(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Shape(s) => ElementKind::Shape(s.kind()),
            Element::Text(_) => ElementKind::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text(_))
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Element::Shape(_))
    }

    pub fn as_text(&self) -> Option<&TextLabel> {
        match self {
            Element::Text(t) => Some(t),
            Element::Shape(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Element::Shape(s) => Some(s),
            Element::Text(_) => None,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Element::Shape(s) => s.position(),
            Element::Text(t) => t.position,
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Element::Shape(s) => s.rotation(),
            Element::Text(t) => t.rotation,
        }
    }

    /// Bounding box in document coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Shape(s) => s.bounds(),
            Element::Text(t) => t.bounds(),
        }
    }

    /// Check if a document-space point hits this element.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Element::Shape(s) => s.hit_test(point, tolerance),
            Element::Text(t) => t.hit_test(point, tolerance),
        }
    }

    /// Outline in document coordinates.
    pub fn to_path(&self) -> BezPath {
        match self {
            Element::Shape(s) => s.to_path(),
            Element::Text(t) => t.to_path(),
        }
    }

    /// Merge the applicable fields of `patch` into this element.
    pub fn apply(&mut self, patch: &ElementPatch) {
        match self {
            Element::Shape(shape) => patch.apply_to_shape(shape),
            Element::Text(label) => patch.apply_to_text(label),
        }
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}

impl From<TextLabel> for Element {
    fn from(label: TextLabel) -> Self {
        Element::Text(label)
    }
}

/// A partial update. `None` leaves a field untouched; fields that do not
/// exist on the target's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub position: Option<Point>,
    pub rotation: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub points: Option<Vec<Point>>,
    pub closed: Option<bool>,
    pub tension: Option<f64>,
    pub fill: Option<SerializableColor>,
    pub stroke: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub content: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
}

impl ElementPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    fn apply_to_shape(&self, shape: &mut Shape) {
        if let Some(position) = self.position {
            shape.set_position(position);
        }
        if let Some(rotation) = self.rotation {
            shape.set_rotation(rotation);
        }
        let style = shape.style_mut();
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(stroke) = self.stroke {
            style.stroke = stroke;
        }
        if let Some(stroke_width) = self.stroke_width {
            style.stroke_width = stroke_width;
        }

        match shape {
            Shape::Rectangle(rect) => {
                if let Some(width) = self.width {
                    rect.width = width;
                }
                if let Some(height) = self.height {
                    rect.height = height;
                }
            }
            Shape::Ellipse(ellipse) => {
                if let Some(radius) = self.radius {
                    ellipse.radius = radius;
                }
            }
            Shape::Polyline(line) => {
                if let Some(points) = &self.points {
                    line.points = points.clone();
                }
                if let Some(closed) = self.closed {
                    line.closed = closed;
                }
                if let Some(tension) = self.tension {
                    line.tension = tension;
                }
            }
            Shape::Arrow(arrow) => {
                if let Some(points) = &self.points {
                    arrow.points = points.clone();
                }
                if let Some(closed) = self.closed {
                    arrow.closed = closed;
                }
                if let Some(tension) = self.tension {
                    arrow.tension = tension;
                }
            }
        }
    }

    fn apply_to_text(&self, label: &mut TextLabel) {
        if let Some(position) = self.position {
            label.position = position;
        }
        if let Some(rotation) = self.rotation {
            label.rotation = rotation;
        }
        if let Some(width) = self.width {
            label.width = width;
        }
        if let Some(height) = self.height {
            label.height = height;
        }
        if let Some(fill) = self.fill {
            label.fill = fill;
        }
        if let Some(content) = &self.content {
            label.content = content.clone();
        }
        if let Some(font_size) = self.font_size {
            label.font_size = font_size;
        }
        if let Some(font_family) = &self.font_family {
            label.font_family = font_family.clone();
        }
    }
}
