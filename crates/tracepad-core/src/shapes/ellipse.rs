//! Ellipse shape.

use super::{ShapeStyle, ShapeTrait};
use crate::element::ElementId;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circular ellipse centered on its position.
///
/// Resizing scales the single radius uniformly, so the shape never becomes
/// elongated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ElementId,
    /// Center point.
    pub position: Point,
    /// Radius.
    pub radius: f64,
    /// Rotation angle in degrees (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(id: ElementId, center: Point, radius: f64) -> Self {
        Self {
            id,
            position: center,
            radius,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Ellipse {
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
        Rect::new(-self.radius, -self.radius, self.radius, self.radius)
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        let dist = point.to_vec2().hypot();
        if self.style.fill.a > 0 {
            dist <= self.radius + tolerance
        } else {
            let reach = tolerance + self.style.stroke_width / 2.0;
            (dist - self.radius).abs() <= reach
        }
    }

    fn local_path(&self) -> BezPath {
        Circle::new(Point::ZERO, self.radius).to_path(0.1)
    }
}
