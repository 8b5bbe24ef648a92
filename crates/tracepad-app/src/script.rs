//! Scripted host commands.
//!
//! A script is a JSON array of commands, each tagged with `"cmd"`:
//!
//! ```json
//! [
//!   { "cmd": "mode", "mode": "shapes" },
//!   { "cmd": "click", "x": 200.0, "y": 150.0 },
//!   { "cmd": "click", "x": 200.0, "y": 150.0 },
//!   { "cmd": "drag_end", "element": 0, "x": 10.0, "y": 10.0 }
//! ]
//! ```
//!
//! Elements are addressed by their index in draw order or by id.

use serde::Deserialize;
use tracepad_core::{ElementId, Mode, NodeTransform, PointerEvent, StyleConfig};

/// Reference to an element from a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ElementRef {
    /// Position in draw order.
    Index(usize),
    Id(ElementId),
}

/// One host action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    /// Switch the interaction mode.
    Mode { mode: Mode },
    /// Raw pointer event, screen coordinates.
    Pointer(PointerEvent),
    /// Press and release at a screen point. Two quick clicks in the same
    /// place also deliver a double-click.
    Click { x: f64, y: f64 },
    /// Press-drag-release through screen points.
    Drag { points: Vec<[f64; 2]> },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
        #[serde(default)]
        in_text_input: bool,
    },
    /// Replace the draft of the open text edit.
    Text { content: String },
    FocusLost,
    AddText,
    Pan { dx: f64, dy: f64 },
    ResetView,
    Resize { width: f64, height: f64 },
    TransformEnd {
        element: ElementRef,
        transform: NodeTransform,
    },
    DragEnd { element: ElementRef, x: f64, y: f64 },
    DeleteSelected,
    ClearAll,
    /// Replace the style settings and restyle the selected element.
    /// Missing fields take their defaults.
    Style { style: StyleConfig },
}

/// Parse a script.
pub fn parse_script(json: &str) -> Result<Vec<HostCommand>, serde_json::Error> {
    serde_json::from_str(json)
}
