//! Single selection and the resize/rotate transform gesture.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{CanvasError, CanvasResult};
use crate::shapes::Shape;
use crate::store::ElementStore;
use crate::tools::Mode;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Minimum width, height or radius of a shape after a resize.
pub const SHAPE_MIN_SIZE: f64 = 5.0;
/// Minimum width of a text label after a resize.
pub const TEXT_MIN_WIDTH: f64 = 30.0;
/// Minimum height of a text label after a resize.
pub const TEXT_MIN_HEIGHT: f64 = 20.0;

/// Node attributes reported by the host's transform handles.
///
/// Scale is relative to the element's committed geometry and is folded
/// into that geometry on commit, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    /// New anchor position (document space).
    pub position: Point,
    /// New rotation in degrees.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl NodeTransform {
    /// Unscaled transform at the given position and rotation.
    pub fn identity(position: Point, rotation: f64) -> Self {
        Self {
            position,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// An in-progress transform.
#[derive(Debug, Clone, PartialEq)]
struct TransformGesture {
    id: ElementId,
    current: NodeTransform,
}

/// Holds at most one selected element and at most one transform gesture.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<ElementId>,
    gesture: Option<TransformGesture>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected element id.
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Whether a transform gesture is in progress.
    pub fn is_transforming(&self) -> bool {
        self.gesture.is_some()
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Does nothing in modes without transform handles.
    pub fn select(
        &mut self,
        id: Option<&ElementId>,
        mode: Mode,
        store: &ElementStore,
    ) -> CanvasResult<()> {
        if !mode.allows_transform() {
            log::debug!("Selection ignored in {} mode", mode.name());
            return Ok(());
        }
        match id {
            Some(id) if !store.contains(id) => Err(CanvasError::NotFound(id.clone())),
            id => {
                self.set_selected(id.cloned());
                Ok(())
            }
        }
    }

    /// Replace the selection without the mode check.
    pub(crate) fn set_selected(&mut self, id: Option<ElementId>) {
        if self.selected != id {
            self.gesture = None;
        }
        self.selected = id;
    }

    /// Begin a transform gesture on `id`, selecting it.
    pub fn start_transform(&mut self, id: &ElementId, store: &ElementStore) -> CanvasResult<()> {
        let element = store
            .get(id)
            .ok_or_else(|| CanvasError::NotFound(id.clone()))?;
        self.selected = Some(id.clone());
        self.gesture = Some(TransformGesture {
            id: id.clone(),
            current: NodeTransform::identity(element.position(), element.rotation()),
        });
        Ok(())
    }

    /// Record the latest node attributes of the gesture.
    pub fn update_transform(&mut self, scale_x: f64, scale_y: f64, rotation: f64, position: Point) {
        match &mut self.gesture {
            Some(gesture) => {
                gesture.current = NodeTransform {
                    position,
                    rotation,
                    scale_x,
                    scale_y,
                };
            }
            None => log::debug!("update_transform without an active gesture"),
        }
    }

    /// Fold the gesture into the element's geometry and end it.
    pub fn commit_transform(&mut self, store: &mut ElementStore) -> CanvasResult<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        let element = store
            .get(&gesture.id)
            .ok_or_else(|| CanvasError::NotFound(gesture.id.clone()))?;
        let patch = transform_patch(element, &gesture.current);
        store.update(&gesture.id, &patch)
    }

    /// Drop the gesture without touching the store.
    pub fn cancel_transform(&mut self) {
        self.gesture = None;
    }

    /// Drop every reference to a deleted element.
    pub fn forget(&mut self, id: &ElementId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        if self.gesture.as_ref().is_some_and(|g| &g.id == id) {
            self.gesture = None;
        }
    }

    /// Clear the selection and any gesture.
    pub fn clear(&mut self) {
        self.selected = None;
        self.gesture = None;
    }
}

/// Compute the patch that applies a finished transform to `element`.
///
/// Rectangles and text scale per axis; ellipses and point lists scale
/// uniformly by the larger factor. Sizes never go below the floors.
pub fn transform_patch(element: &Element, node: &NodeTransform) -> ElementPatch {
    let sx = finite_or(node.scale_x, 1.0);
    let sy = finite_or(node.scale_y, 1.0);
    let uniform = sx.max(sy);

    let mut patch = ElementPatch {
        position: Some(if node.position.is_finite() {
            node.position
        } else {
            element.position()
        }),
        rotation: Some(finite_or(node.rotation, element.rotation())),
        ..ElementPatch::default()
    };

    match element {
        Element::Shape(Shape::Rectangle(rect)) => {
            patch.width = Some((rect.width * sx).max(SHAPE_MIN_SIZE));
            patch.height = Some((rect.height * sy).max(SHAPE_MIN_SIZE));
        }
        Element::Shape(Shape::Ellipse(ellipse)) => {
            patch.radius = Some((ellipse.radius * uniform).max(SHAPE_MIN_SIZE));
        }
        Element::Shape(Shape::Polyline(line)) => {
            patch.points = Some(scale_points(&line.points, uniform));
        }
        Element::Shape(Shape::Arrow(arrow)) => {
            patch.points = Some(scale_points(&arrow.points, uniform));
        }
        Element::Text(label) => {
            patch.width = Some((label.width * sx).max(TEXT_MIN_WIDTH));
            patch.height = Some((label.height * sy).max(TEXT_MIN_HEIGHT));
        }
    }
    patch
}

fn scale_points(points: &[Point], factor: f64) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point::new(p.x * factor, p.y * factor))
        .collect()
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
