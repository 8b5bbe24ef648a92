//! Interaction modes, raster tools and shape presets.

use crate::element::ElementId;
use crate::shapes::{Arrow, Ellipse, Polyline, Rectangle, Shape, ShapeStyle};
use crate::style::{SerializableColor, StyleConfig};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Top-level interaction mode, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Freehand raster painting.
    #[default]
    Draw,
    /// Text labels.
    Write,
    /// Vector shapes.
    Shapes,
}

impl Mode {
    /// Whether elements can be selected and transformed in this mode.
    pub fn allows_transform(&self) -> bool {
        !matches!(self, Mode::Draw)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Draw => "draw",
            Mode::Write => "write",
            Mode::Shapes => "shapes",
        }
    }
}

/// Raster tool used in draw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RasterTool {
    #[default]
    Brush,
    Eraser,
}

impl RasterTool {
    /// Tool bound to a numeric shortcut key.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(RasterTool::Brush),
            2 => Some(RasterTool::Eraser),
            _ => None,
        }
    }
}

/// Offset from the click point to a new shape's position.
pub const SHAPE_CLICK_OFFSET: Vec2 = Vec2::new(50.0, 50.0);

/// Shape templates offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShapePreset {
    #[default]
    Rectangle,
    Square,
    Circle,
    Line,
    Arrow,
    Triangle,
    Star,
    Heart,
}

const TRIANGLE_POINTS: [f64; 8] = [50.0, 0.0, 0.0, 100.0, 100.0, 100.0, 50.0, 0.0];

const STAR_POINTS: [f64; 22] = [
    50.0, 0.0, 61.0, 35.0, 98.0, 35.0, 68.0, 57.0, 79.0, 91.0, 50.0, 70.0, 21.0, 91.0, 32.0,
    57.0, 2.0, 35.0, 39.0, 35.0, 50.0, 0.0,
];

const HEART_POINTS: [f64; 22] = [
    50.0, 20.0, 60.0, 10.0, 70.0, 20.0, 80.0, 30.0, 70.0, 50.0, 50.0, 70.0, 30.0, 50.0, 20.0,
    30.0, 30.0, 20.0, 40.0, 10.0, 50.0, 20.0,
];

const HEART_TENSION: f64 = 0.5;

impl ShapePreset {
    pub fn all() -> &'static [ShapePreset] {
        &[
            ShapePreset::Rectangle,
            ShapePreset::Square,
            ShapePreset::Circle,
            ShapePreset::Line,
            ShapePreset::Arrow,
            ShapePreset::Triangle,
            ShapePreset::Star,
            ShapePreset::Heart,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShapePreset::Rectangle => "Rectangle",
            ShapePreset::Square => "Square",
            ShapePreset::Circle => "Circle",
            ShapePreset::Line => "Line",
            ShapePreset::Arrow => "Arrow",
            ShapePreset::Triangle => "Triangle",
            ShapePreset::Star => "Star",
            ShapePreset::Heart => "Heart",
        }
    }

    /// Build a new shape for a click at `click` (document space).
    pub fn create(&self, id: ElementId, click: Point, style: &StyleConfig) -> Shape {
        let position = click - SHAPE_CLICK_OFFSET;
        let mut shape_style = ShapeStyle {
            fill: style.shape_fill,
            stroke: style.shape_stroke,
            stroke_width: style.stroke_width,
        };

        let closed = |coords: &[f64], tension: f64| {
            let mut line = Polyline::from_flat(id.clone(), position, coords);
            line.closed = true;
            line.tension = tension;
            Shape::Polyline(line)
        };

        let mut shape = match self {
            ShapePreset::Rectangle => Shape::Rectangle(Rectangle::new(id.clone(), position, 100.0, 80.0)),
            ShapePreset::Square => Shape::Rectangle(Rectangle::new(id.clone(), position, 80.0, 80.0)),
            ShapePreset::Circle => Shape::Ellipse(Ellipse::new(id.clone(), position, 50.0)),
            ShapePreset::Line => {
                shape_style.fill = SerializableColor::transparent();
                Shape::Polyline(Polyline::from_flat(id.clone(), position, &[0.0, 0.0, 100.0, 0.0]))
            }
            ShapePreset::Arrow => {
                // Arrowheads are filled with the stroke color.
                shape_style.fill = style.shape_stroke;
                Shape::Arrow(Arrow::new(
                    id.clone(),
                    position,
                    vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
                ))
            }
            ShapePreset::Triangle => closed(&TRIANGLE_POINTS, 0.0),
            ShapePreset::Star => closed(&STAR_POINTS, 0.0),
            ShapePreset::Heart => closed(&HEART_POINTS, HEART_TENSION),
        };

        *shape.style_mut() = shape_style;
        shape
    }
}
