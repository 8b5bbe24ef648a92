//! Persistent raster layer for freehand strokes.
//!
//! The pixel buffer lives in document space, has a fixed extent chosen at
//! construction and is only ever written by [`RasterSurface`] itself.
//! Renderers get read access through [`RasterSurface::pixel`] and
//! [`RasterSurface::region`].

use crate::shapes::point_to_segment_dist;
use crate::style::{SerializableColor, StyleConfig};
use crate::tools::RasterTool;
use image::{Rgba, RgbaImage, imageops};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Smallest radius a dab can have, so that hairline strokes still cover
/// the pixel they pass through.
const MIN_DAB_RADIUS: f64 = 0.5;

/// How a stroke composites onto the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Brush {
    /// Source-over `color` with a round tip of diameter `width`.
    Paint { color: SerializableColor, width: f64 },
    /// Restore the background with a round tip of diameter `width`.
    Erase { width: f64 },
}

impl Brush {
    /// Brush for the style's active raster tool.
    pub fn from_style(style: &StyleConfig) -> Self {
        match style.raster_tool {
            RasterTool::Brush => Brush::Paint {
                color: style.brush_color,
                width: style.brush_size,
            },
            RasterTool::Eraser => Brush::Erase {
                width: style.eraser_size,
            },
        }
    }

    pub fn width(&self) -> f64 {
        match *self {
            Brush::Paint { width, .. } | Brush::Erase { width } => width,
        }
    }

    fn radius(&self) -> f64 {
        let half = self.width() / 2.0;
        if half.is_finite() {
            half.max(MIN_DAB_RADIUS)
        } else {
            MIN_DAB_RADIUS
        }
    }
}

/// Stroke state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum StrokeState {
    #[default]
    Idle,
    Drawing {
        /// Brush captured when the stroke began.
        brush: Brush,
        /// Last recorded point of the stroke.
        last: Point,
    },
}

/// The raster stroke layer.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    background: SerializableColor,
    state: StrokeState,
    /// Pixel-space area touched since the last [`RasterSurface::take_dirty`].
    dirty: Option<Rect>,
}

impl RasterSurface {
    /// Create a surface of the given extent filled with `background`.
    pub fn new(width: u32, height: u32, background: SerializableColor) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_rgba(background)),
            background,
            state: StrokeState::Idle,
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn background(&self) -> SerializableColor {
        self.background
    }

    /// Full document extent.
    pub fn extent(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f64, self.height() as f64)
    }

    /// Check if a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Start a stroke at `point`. Nothing is painted until the stroke is extended.
    pub fn begin_stroke(&mut self, point: Point, brush: Brush) {
        if self.is_drawing() {
            log::debug!("begin_stroke while drawing; previous stroke ended");
        }
        self.state = StrokeState::Drawing { brush, last: point };
    }

    /// Paint the segment from the last recorded point to `point`.
    pub fn extend_stroke(&mut self, point: Point) {
        let StrokeState::Drawing { brush, last } = self.state else {
            return;
        };
        self.paint_segment(last, point, brush);
        self.state = StrokeState::Drawing { brush, last: point };
    }

    /// Finish the current stroke. Safe to call when idle.
    pub fn end_stroke(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Paint a single round dab of `color`.
    pub fn draw(&mut self, point: Point, color: SerializableColor, width: f64) {
        self.paint_segment(point, point, Brush::Paint { color, width });
    }

    /// Restore the background within `radius` of `point`.
    pub fn erase(&mut self, point: Point, radius: f64) {
        self.paint_segment(point, point, Brush::Erase { width: radius * 2.0 });
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        let bg = to_rgba(self.background);
        for pixel in self.image.pixels_mut() {
            *pixel = bg;
        }
        self.state = StrokeState::Idle;
        self.mark_dirty(self.extent());
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        self.image.get_pixel_checked(x, y).map(|p| from_rgba(*p))
    }

    /// Check if the pixel at `(x, y)` shows the untouched background.
    pub fn is_background(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y) == Some(self.background)
    }

    /// Number of pixels that differ from the background.
    pub fn painted_pixel_count(&self) -> usize {
        let bg = to_rgba(self.background);
        self.image.pixels().filter(|p| **p != bg).count()
    }

    /// Copy of the pixels inside `rect` (document space, clipped to the buffer).
    pub fn region(&self, rect: Rect) -> RgbaImage {
        let Some((x0, y0, x1, y1)) = self.pixel_span(rect) else {
            return RgbaImage::new(0, 0);
        };
        imageops::crop_imm(&self.image, x0, y0, x1 - x0, y1 - y0).to_image()
    }

    /// Area touched since the last call to [`RasterSurface::take_dirty`].
    pub fn dirty_rect(&self) -> Option<Rect> {
        self.dirty
    }

    /// Return and reset the touched area.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    fn mark_dirty(&mut self, rect: Rect) {
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(rect),
            None => rect,
        });
    }

    /// Clip a document rect to integer pixel bounds `[x0, x1) × [y0, y1)`.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let clipped = rect.abs().intersect(self.extent());
        if clipped.width() <= 0.0 || clipped.height() <= 0.0 {
            return None;
        }
        let x0 = clipped.x0.floor() as u32;
        let y0 = clipped.y0.floor() as u32;
        let x1 = (clipped.x1.ceil() as u32).min(self.width());
        let y1 = (clipped.y1.ceil() as u32).min(self.height());
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Rasterize a round-capped segment: every pixel whose center lies within
    /// the brush radius of `a→b` is composited once.
    fn paint_segment(&mut self, a: Point, b: Point, brush: Brush) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let radius = brush.radius();
        let reach = Rect::from_points(a, b).inflate(radius, radius);
        let Some((x0, y0, x1, y1)) = self.pixel_span(reach) else {
            return;
        };

        let background = to_rgba(self.background);
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if point_to_segment_dist(center, a, b) > radius {
                    continue;
                }
                let pixel = self.image.get_pixel_mut(x, y);
                *pixel = match brush {
                    Brush::Paint { color, .. } => source_over(*pixel, to_rgba(color)),
                    Brush::Erase { .. } => background,
                };
            }
        }
        self.mark_dirty(Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64));
    }
}

fn to_rgba(color: SerializableColor) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn from_rgba(pixel: Rgba<u8>) -> SerializableColor {
    let [r, g, b, a] = pixel.0;
    SerializableColor::new(r, g, b, a)
}

/// Composite `src` over `dst` (straight alpha).
fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst.0[3] as u32;
    let inv = 255 - sa;
    // Output alpha scaled by 255.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| -> u8 {
        let num = s as u32 * sa * 255 + d as u32 * da * inv;
        ((num + out_a / 2) / out_a) as u8
    };
    Rgba([
        channel(src.0[0], dst.0[0]),
        channel(src.0[1], dst.0[1]),
        channel(src.0[2], dst.0[2]),
        ((out_a + 127) / 255) as u8,
    ])
}
