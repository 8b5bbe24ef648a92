//! Viewport mapping between screen space and document space.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Convert a screen point to document coordinates for the given pan offset.
pub fn to_document(screen_point: Point, offset: Vec2) -> Point {
    screen_point - offset
}

/// Convert a document point to screen coordinates for the given pan offset.
pub fn to_screen(document_point: Point, offset: Vec2) -> Point {
    document_point + offset
}

/// The visible window onto the fixed document.
///
/// Only the pan offset and the size of the host surface live here. Stored
/// geometry never sees the offset; it is applied when mapping pointer input
/// in and when a renderer maps elements out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current pan translation (document origin in screen space).
    pub offset: Vec2,
    /// Size of the host surface in screen pixels.
    pub size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Size::new(1200.0, 800.0),
        }
    }
}

impl Viewport {
    /// Create a viewport of the given surface size with no pan.
    pub fn new(size: Size) -> Self {
        Self {
            offset: Vec2::ZERO,
            size,
        }
    }

    /// Convert a screen point to document coordinates.
    pub fn screen_to_document(&self, screen_point: Point) -> Point {
        to_document(screen_point, self.offset)
    }

    /// Convert a document point to screen coordinates.
    pub fn document_to_screen(&self, document_point: Point) -> Point {
        to_screen(document_point, self.offset)
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Reset the pan offset to the document origin.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }

    /// Resize the host surface. The document extent is unaffected.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Size::new(width.max(0.0), height.max(0.0));
    }

    /// The part of the document currently visible on screen.
    pub fn visible_document_rect(&self) -> Rect {
        let origin = self.screen_to_document(Point::ZERO);
        Rect::from_origin_size(origin, self.size)
    }

    /// Document point at the middle of the visible surface.
    pub fn document_center(&self) -> Point {
        self.visible_document_rect().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.offset, Vec2::ZERO);
        let screen = Point::new(100.0, 200.0);
        assert_eq!(viewport.screen_to_document(screen), screen);
    }

    #[test]
    fn test_screen_to_document_with_offset() {
        let mut viewport = Viewport::default();
        viewport.offset = Vec2::new(50.0, 100.0);
        let doc = viewport.screen_to_document(Point::new(100.0, 200.0));
        assert!((doc.x - 50.0).abs() < f64::EPSILON);
        assert!((doc.y - 100.0).abs() < f64::EPSILON);
    }

    // Exact equality holds only for values f64 represents exactly.
    #[test]
    fn test_roundtrip_conversion() {
        let offsets = [
            Vec2::ZERO,
            Vec2::new(30.0, -20.0),
            Vec2::new(-1250.5, 3.25),
        ];
        let points = [
            Point::new(123.0, 456.0),
            Point::new(-7.5, 0.0),
            Point::new(2999.0, 2999.0),
        ];
        for offset in offsets {
            for p in points {
                assert_eq!(to_document(to_screen(p, offset), offset), p);
                assert_eq!(to_screen(to_document(p, offset), offset), p);
            }
        }
    }

    #[test]
    fn test_roundtrip_conversion_fractional() {
        let offsets = [Vec2::new(0.1, 0.2), Vec2::new(-0.3, 1e-7)];
        let points = [Point::new(0.2, 0.1), Point::new(2999.7, -0.3)];
        for offset in offsets {
            for p in points {
                let back = to_document(to_screen(p, offset), offset);
                assert!((back.x - p.x).abs() < 1e-9);
                assert!((back.y - p.y).abs() < 1e-9);
                let back = to_screen(to_document(p, offset), offset);
                assert!((back.x - p.x).abs() < 1e-9);
                assert!((back.y - p.y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_pan_and_reset() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(10.0, 20.0));
        viewport.pan(Vec2::new(-4.0, 0.0));
        assert!((viewport.offset.x - 6.0).abs() < f64::EPSILON);
        assert!((viewport.offset.y - 20.0).abs() < f64::EPSILON);

        viewport.reset();
        assert_eq!(viewport.offset, Vec2::ZERO);
    }

    #[test]
    fn test_visible_rect_follows_pan() {
        let mut viewport = Viewport::new(Size::new(400.0, 300.0));
        viewport.pan(Vec2::new(-100.0, -50.0));
        let visible = viewport.visible_document_rect();
        assert!((visible.x0 - 100.0).abs() < f64::EPSILON);
        assert!((visible.y0 - 50.0).abs() < f64::EPSILON);
        assert!((visible.width() - 400.0).abs() < f64::EPSILON);

        let center = viewport.document_center();
        assert!((center.x - 300.0).abs() < f64::EPSILON);
        assert!((center.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_keeps_offset() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(5.0, 5.0));
        viewport.set_size(640.0, 480.0);
        assert_eq!(viewport.offset, Vec2::new(5.0, 5.0));
        assert!((viewport.size.width - 640.0).abs() < f64::EPSILON);
    }
}
