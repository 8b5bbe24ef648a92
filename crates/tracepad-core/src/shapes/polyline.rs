//! Polyline shape.

use super::{ShapeStyle, ShapeTrait, point_to_polyline_dist, points_bounds, spline_path};
use crate::element::ElementId;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An open or closed sequence of points, optionally smoothed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ElementId,
    /// Origin of the local frame; points are relative to it.
    pub position: Point,
    /// Vertices in the local frame.
    pub points: Vec<Point>,
    /// Whether the last point connects back to the first.
    #[serde(default)]
    pub closed: bool,
    /// Curve tension (0 = straight segments).
    #[serde(default)]
    pub tension: f64,
    /// Rotation angle in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polyline {
    /// Create a new open polyline.
    pub fn new(id: ElementId, position: Point, points: Vec<Point>) -> Self {
        Self {
            id,
            position,
            points,
            closed: false,
            tension: 0.0,
            rotation: 0.0,
            style: ShapeStyle::default(),
        }
    }

    /// Build from a flat `[x0, y0, x1, y1, ...]` coordinate list.
    pub fn from_flat(id: ElementId, position: Point, coords: &[f64]) -> Self {
        Self::new(id, position, points_from_flat(coords))
    }

    /// Vertices with the closing segment appended when closed.
    pub(crate) fn outline(&self) -> Vec<Point> {
        let mut pts = self.points.clone();
        if self.closed {
            if let (Some(&first), Some(&last)) = (pts.first(), pts.last()) {
                if first != last {
                    pts.push(first);
                }
            }
        }
        pts
    }
}

/// Convert a flat coordinate list into points. A trailing odd value is ignored.
pub(crate) fn points_from_flat(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect()
}

impl ShapeTrait for Polyline {
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
        points_bounds(&self.points)
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        if point_to_polyline_dist(point, &self.outline()) <= reach {
            return true;
        }
        self.closed && self.style.fill.a > 0 && self.local_path().contains(point)
    }

    fn local_path(&self) -> BezPath {
        spline_path(&self.points, self.closed, self.tension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SerializableColor;

    #[test]
    fn test_from_flat() {
        let line = Polyline::from_flat(ElementId::from("l"), Point::ZERO, &[0.0, 0.0, 100.0, 0.0, 7.0]);
        assert_eq!(line.points, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn test_hit_test_open_line() {
        let line = Polyline::from_flat(ElementId::from("l"), Point::new(10.0, 10.0), &[0.0, 0.0, 100.0, 0.0]);
        assert!(line.hit_test(Point::new(60.0, 11.0), 0.0));
        assert!(!line.hit_test(Point::new(60.0, 20.0), 2.0));
    }

    #[test]
    fn test_hit_test_closed_filled_interior() {
        let mut tri = Polyline::from_flat(
            ElementId::from("t"),
            Point::ZERO,
            &[50.0, 0.0, 0.0, 100.0, 100.0, 100.0, 50.0, 0.0],
        );
        tri.closed = true;
        assert!(tri.hit_test(Point::new(50.0, 60.0), 0.0));

        tri.style.fill = SerializableColor::transparent();
        assert!(!tri.hit_test(Point::new(50.0, 60.0), 0.0));
    }

    #[test]
    fn test_outline_closes_once() {
        let mut square = Polyline::from_flat(
            ElementId::from("s"),
            Point::ZERO,
            &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
        );
        square.closed = true;
        assert_eq!(square.outline().len(), 4);
    }
}
