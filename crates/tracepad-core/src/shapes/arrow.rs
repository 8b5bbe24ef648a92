//! Arrow shape.

use super::{ShapeStyle, ShapeTrait, point_to_polyline_dist, points_bounds, spline_path};
use crate::element::ElementId;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Default arrowhead length.
pub const DEFAULT_POINTER_LENGTH: f64 = 10.0;
/// Default arrowhead width.
pub const DEFAULT_POINTER_WIDTH: f64 = 10.0;

/// A polyline with an arrowhead at its last point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ElementId,
    /// Origin of the local frame; points are relative to it.
    pub position: Point,
    /// Vertices in the local frame.
    pub points: Vec<Point>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub tension: f64,
    /// Arrowhead length along the final segment.
    pub pointer_length: f64,
    /// Arrowhead width across the final segment.
    pub pointer_width: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arrow {
    /// Create a new arrow through `points`.
    pub fn new(id: ElementId, position: Point, points: Vec<Point>) -> Self {
        Self {
            id,
            position,
            points,
            closed: false,
            tension: 0.0,
            pointer_length: DEFAULT_POINTER_LENGTH,
            pointer_width: DEFAULT_POINTER_WIDTH,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Arrowhead triangle (tip, left, right) in the local frame.
    pub fn head(&self) -> Option<[Point; 3]> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let tip = self.points[n - 1];
        let dir = tip - self.points[n - 2];
        let len = dir.hypot();
        if len < f64::EPSILON {
            return None;
        }
        let unit = dir / len;
        let normal = kurbo::Vec2::new(-unit.y, unit.x);
        let base = tip - unit * self.pointer_length;
        let half = self.pointer_width / 2.0;
        Some([tip, base + normal * half, base - normal * half])
    }
}

impl ShapeTrait for Arrow {
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
        let mut bounds = points_bounds(&self.points);
        if let Some(head) = self.head() {
            for p in head {
                bounds = bounds.union_pt(p);
            }
        }
        bounds
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        if point_to_polyline_dist(point, &self.points) <= reach {
            return true;
        }
        match self.head() {
            Some([tip, left, right]) => {
                point_to_polyline_dist(point, &[tip, left, right, tip]) <= reach
            }
            None => false,
        }
    }

    fn local_path(&self) -> BezPath {
        let mut path = spline_path(&self.points, self.closed, self.tension);
        if let Some([tip, left, right]) = self.head() {
            path.move_to(left);
            path.line_to(tip);
            path.line_to(right);
            path.close_path();
        }
        path
    }
}
