//! Tracepad Core Library
//!
//! Platform-agnostic canvas interaction engine: a raster stroke layer,
//! vector shapes and text labels driven by one pointer model.

pub mod canvas;
pub mod config;
pub mod element;
pub mod error;
pub mod input;
pub mod raster;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod style;
pub mod text_edit;
pub mod tools;
pub mod viewport;

pub use canvas::{Canvas, CanvasStatus, SceneNode};
pub use config::CanvasConfig;
pub use element::{Element, ElementId, ElementKind, ElementPatch};
pub use error::{CanvasError, CanvasResult};
pub use input::{ClickTracker, Key, KeyEvent, Modifiers, PointerEvent};
pub use raster::{Brush, RasterSurface};
pub use selection::{NodeTransform, SelectionController};
pub use store::ElementStore;
pub use style::{SerializableColor, StyleConfig};
pub use text_edit::{EditExit, EditSession, PLACEHOLDER_TEXT, TextEditor};
pub use tools::{Mode, RasterTool, ShapePreset};
pub use viewport::Viewport;
