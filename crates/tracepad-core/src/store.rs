//! The element store: every shape and text label, keyed by id.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::{CanvasError, CanvasResult};
use crate::shapes::ShapeKind;
use kurbo::Point;
use std::collections::HashMap;

/// Ordered collection of elements.
///
/// The store knows nothing about selection or editing. Callers that hold ids
/// are responsible for dropping them when an element goes away.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    /// All elements, keyed by id.
    elements: HashMap<ElementId, Element>,
    /// Insertion order (back to front).
    order: Vec<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element at the front.
    pub fn insert(&mut self, element: impl Into<Element>) -> CanvasResult<ElementId> {
        let element = element.into();
        let id = element.id().clone();
        if self.elements.contains_key(&id) {
            log::error!("Refusing to insert duplicate element id {id}");
            return Err(CanvasError::DuplicateId(id));
        }
        self.order.push(id.clone());
        self.elements.insert(id.clone(), element);
        Ok(id)
    }

    /// Merge `patch` into an existing element.
    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> CanvasResult<()> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| CanvasError::NotFound(id.clone()))?;
        element.apply(patch);
        Ok(())
    }

    /// Move an element to a new position.
    pub fn move_to(&mut self, id: &ElementId, position: Point) -> CanvasResult<()> {
        self.update(id, &ElementPatch::position(position))
    }

    /// Remove an element. Removing an unknown id does nothing.
    pub fn delete(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.elements.remove(id)?;
        self.order.retain(|other| other != id);
        Some(removed)
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.order.clear();
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Elements in insertion order.
    pub fn all(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Front-most element under a document-space point.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<&Element> {
        self.all()
            .rev()
            .find(|element| element.hit_test(point, tolerance))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of shapes of any kind.
    pub fn shape_count(&self) -> usize {
        self.elements.values().filter(|e| e.is_shape()).count()
    }

    /// Number of shapes of one kind.
    pub fn count_kind(&self, kind: ShapeKind) -> usize {
        self.elements
            .values()
            .filter_map(Element::as_shape)
            .filter(|shape| shape.kind() == kind)
            .count()
    }

    pub fn text_count(&self) -> usize {
        self.elements.values().filter(|e| e.is_text()).count()
    }
}
