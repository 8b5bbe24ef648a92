//! Vector element definitions.

mod arrow;
mod ellipse;
mod polyline;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use ellipse::Ellipse;
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use text::TextLabel;

use crate::element::ElementId;
use crate::style::SerializableColor;
use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// Paint properties shared by every shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: SerializableColor,
    pub stroke: SerializableColor,
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: SerializableColor::rgb(0x3b, 0x82, 0xf6),
            stroke: SerializableColor::white(),
            stroke_width: 2.0,
        }
    }
}

/// Shape discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Polyline,
    Arrow,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polyline => "polyline",
            ShapeKind::Arrow => "arrow",
        }
    }
}

/// Geometry common to shapes and text labels.
///
/// Every element has a local frame: translated to `position`, rotated by
/// `rotation` degrees around it. Kind-specific geometry is expressed in that
/// frame; the provided methods map it into document space.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &ElementId;

    /// Anchor of the local frame in document space.
    fn position(&self) -> Point;

    /// Rotation in degrees around `position`.
    fn rotation(&self) -> f64;

    /// Bounding box in the local (unrotated) frame.
    fn local_bounds(&self) -> Rect;

    /// Check if a point in the local frame hits this element.
    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool;

    /// Outline in the local frame.
    fn local_path(&self) -> BezPath;

    /// Local frame to document space.
    fn local_transform(&self) -> Affine {
        Affine::translate(self.position().to_vec2())
            * Affine::rotate(self.rotation().to_radians())
    }

    /// Axis-aligned bounding box in document coordinates.
    fn bounds(&self) -> Rect {
        self.local_transform()
            .transform_rect_bbox(self.local_bounds())
    }

    /// Check if a point (in document coordinates) hits this element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.local_transform().inverse() * point;
        self.hit_test_local(local, tolerance)
    }

    /// Outline in document coordinates, for renderers.
    fn to_path(&self) -> BezPath {
        let mut path = self.local_path();
        path.apply_affine(self.local_transform());
        path
    }
}

/// Enum wrapper for all shape kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Polyline(Polyline),
    Arrow(Arrow),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Arrow(_) => ShapeKind::Arrow,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polyline(s) => s,
            Shape::Arrow(s) => s,
        }
    }

    pub fn id(&self) -> &ElementId {
        self.as_trait().id()
    }

    pub fn position(&self) -> Point {
        self.as_trait().position()
    }

    pub fn rotation(&self) -> f64 {
        self.as_trait().rotation()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_trait().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => &s.style,
            Shape::Ellipse(s) => &s.style,
            Shape::Polyline(s) => &s.style,
            Shape::Arrow(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => &mut s.style,
            Shape::Ellipse(s) => &mut s.style,
            Shape::Polyline(s) => &mut s.style,
            Shape::Arrow(s) => &mut s.style,
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.position = position,
            Shape::Ellipse(s) => s.position = position,
            Shape::Polyline(s) => s.position = position,
            Shape::Arrow(s) => s.position = position,
        }
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Shape::Rectangle(s) => s.rotation = rotation,
            Shape::Ellipse(s) => s.rotation = rotation,
            Shape::Polyline(s) => s.rotation = rotation,
            Shape::Arrow(s) => s.rotation = rotation,
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [single] => (point - *single).hypot(),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Build a path through `points`, smoothed as a cardinal spline when
/// `tension` is non-zero.
pub(crate) fn spline_path(points: &[Point], closed: bool, tension: f64) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);

    let n = points.len();
    if tension.abs() < f64::EPSILON || n < 3 {
        for &p in &points[1..] {
            path.line_to(p);
        }
        if closed {
            path.close_path();
        }
        return path;
    }

    // Incoming and outgoing control point for each vertex.
    let controls = |prev: Point, cur: Point, next: Point| -> (Point, Point) {
        let d01 = (cur - prev).hypot();
        let d12 = (next - cur).hypot();
        let total = d01 + d12;
        if total < f64::EPSILON {
            return (cur, cur);
        }
        let fa = tension * d01 / total;
        let fb = tension * d12 / total;
        let span = next - prev;
        (cur - span * fa, cur + span * fb)
    };

    if closed {
        let ctrl: Vec<(Point, Point)> = (0..n)
            .map(|i| controls(points[(i + n - 1) % n], points[i], points[(i + 1) % n]))
            .collect();
        for i in 0..n {
            let j = (i + 1) % n;
            path.curve_to(ctrl[i].1, ctrl[j].0, points[j]);
        }
        path.close_path();
    } else {
        let ctrl: Vec<(Point, Point)> = (1..n - 1)
            .map(|i| controls(points[i - 1], points[i], points[i + 1]))
            .collect();
        path.quad_to(ctrl[0].0, points[1]);
        for i in 1..n - 2 {
            path.curve_to(ctrl[i - 1].1, ctrl[i].0, points[i + 1]);
        }
        path.quad_to(ctrl[n - 3].1, points[n - 1]);
    }
    path
}

/// Bounding box of a point list (zero rect at origin when empty).
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(&first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .fold(Rect::from_points(first, first), |acc, &p| acc.union_pt(p))
}
