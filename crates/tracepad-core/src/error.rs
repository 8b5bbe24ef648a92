//! Error types for canvas operations.

use crate::element::ElementId;
use thiserror::Error;

/// Canvas errors.
///
/// Id-reference failures are expected under fast interaction (a queued event
/// can race a delete) and are absorbed by the dispatcher. Only
/// [`CanvasError::DuplicateId`] signals a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("Element already exists: {0}")]
    DuplicateId(ElementId),
    #[error("Element not found: {0}")]
    NotFound(ElementId),
    #[error("Element is not a text label: {0}")]
    NotText(ElementId),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
